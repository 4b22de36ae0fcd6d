//! Transaction record types.
//!
//! A `TransactionRecord` is the observed lifecycle of one submitted
//! transaction. Records carry no behavior; the lifecycle store is the only
//! place their fields change.

use crate::ClassifiedError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one tracked transaction.
///
/// Identifiers are allocated by the lifecycle store when a transaction is
/// initialized and are unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(u64);

impl SubmissionId {
	/// Wraps a raw identifier value. Only the store should allocate these.
	#[doc(hidden)]
	pub fn new(value: u64) -> Self {
		Self(value)
	}

	/// Returns the raw identifier value.
	pub fn as_u64(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for SubmissionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "tx-{}", self.0)
	}
}

/// On-chain transaction hash as reported by the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(pub String);

impl TransactionHash {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for TransactionHash {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Lifecycle status of a tracked transaction.
///
/// Valid progressions are `Initialized -> Pending -> Mined`,
/// `Initialized -> Pending -> Error` and `Initialized -> Error`.
/// `Mined` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
	/// The transaction was handed to the submission service.
	Initialized,
	/// The network accepted the transaction into the pending pool.
	Pending,
	/// The transaction was included in a block.
	Mined,
	/// The transaction failed, either before or after broadcast.
	Error,
}

impl TransactionStatus {
	/// Returns true for statuses no transition may leave.
	pub fn is_terminal(&self) -> bool {
		matches!(self, TransactionStatus::Mined | TransactionStatus::Error)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TransactionStatus::Initialized => "initialized",
			TransactionStatus::Pending => "pending",
			TransactionStatus::Mined => "mined",
			TransactionStatus::Error => "error",
		}
	}
}

impl fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Broad category of a failed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
	/// The transaction was broadcast and then reverted or dropped.
	Failed,
	/// The transaction never reached the network.
	NotSent,
}

impl ErrorType {
	/// Derives the category from whether a hash was known when the failure arrived.
	pub fn from_hash_known(hash_known: bool) -> Self {
		if hash_known {
			ErrorType::Failed
		} else {
			ErrorType::NotSent
		}
	}
}

impl fmt::Display for ErrorType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ErrorType::Failed => f.write_str("failed"),
			ErrorType::NotSent => f.write_str("not sent"),
		}
	}
}

/// Observed lifecycle of one submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
	/// Store-allocated identifier of this transaction.
	pub id: SubmissionId,
	/// Submission timestamp reported by the submission service, in milliseconds.
	pub submitted_at: u64,
	/// Current lifecycle status.
	pub status: TransactionStatus,
	/// Description supplied by the initiator. Never changes after creation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// On-chain hash, set once the network accepts the transaction.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hash: Option<TransactionHash>,
	/// Normalized failure description, set only in `Error`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<ClassifiedError>,
	/// Failure category, set only in `Error`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_type: Option<ErrorType>,
}

impl TransactionRecord {
	/// Creates a freshly initialized record.
	pub fn initialized(id: SubmissionId, submitted_at: u64, message: Option<String>) -> Self {
		Self {
			id,
			submitted_at,
			status: TransactionStatus::Initialized,
			message,
			hash: None,
			error: None,
			error_type: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_initialized_record_has_no_hash_or_error() {
		let record = TransactionRecord::initialized(
			SubmissionId::new(1),
			100,
			Some("Vote for proposal X".to_string()),
		);

		assert_eq!(record.status, TransactionStatus::Initialized);
		assert!(record.hash.is_none());
		assert!(record.error.is_none());
		assert!(record.error_type.is_none());
	}

	#[test]
	fn test_terminal_statuses() {
		assert!(!TransactionStatus::Initialized.is_terminal());
		assert!(!TransactionStatus::Pending.is_terminal());
		assert!(TransactionStatus::Mined.is_terminal());
		assert!(TransactionStatus::Error.is_terminal());
	}

	#[test]
	fn test_error_type_from_hash() {
		assert_eq!(ErrorType::from_hash_known(true), ErrorType::Failed);
		assert_eq!(ErrorType::from_hash_known(false), ErrorType::NotSent);
		assert_eq!(ErrorType::NotSent.to_string(), "not sent");
	}

	#[test]
	fn test_record_serialization_skips_unset_fields() {
		let record = TransactionRecord::initialized(SubmissionId::new(7), 200, None);
		let json = serde_json::to_value(&record).unwrap();

		assert_eq!(json["id"], 7);
		assert_eq!(json["status"], "initialized");
		assert!(json.get("hash").is_none());
		assert!(json.get("error_type").is_none());
	}
}
