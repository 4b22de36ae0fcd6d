//! Helper utilities for common operations.

/// Current UNIX time in milliseconds, or 0 if the clock is before the epoch.
pub fn current_timestamp_millis() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_millis() as u64)
		.unwrap_or(0)
}
