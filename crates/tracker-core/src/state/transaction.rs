//! Transaction status transition table.
//!
//! Records move through `Initialized -> Pending -> Mined`, or fail into
//! `Error` from either non-terminal status. A mined confirmation may overtake
//! the pending acknowledgment, so `Initialized -> Mined` is accepted as well.
//! `Pending -> Pending` is allowed so a repeated acknowledgment can be
//! handled idempotently by the store.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use tracker_types::TransactionStatus;

/// Static transition table - each status maps to its allowed next statuses.
static TRANSITIONS: Lazy<HashMap<TransactionStatus, HashSet<TransactionStatus>>> =
	Lazy::new(|| {
		let mut m = HashMap::new();
		m.insert(
			TransactionStatus::Initialized,
			HashSet::from([
				TransactionStatus::Pending,
				TransactionStatus::Mined,
				TransactionStatus::Error,
			]),
		);
		m.insert(
			TransactionStatus::Pending,
			HashSet::from([
				TransactionStatus::Pending,
				TransactionStatus::Mined,
				TransactionStatus::Error,
			]),
		);
		m.insert(TransactionStatus::Mined, HashSet::new()); // terminal
		m.insert(TransactionStatus::Error, HashSet::new()); // terminal
		m
	});

/// Checks if a status transition is allowed.
pub fn is_valid_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
	TRANSITIONS
		.get(&from)
		.is_some_and(|allowed| allowed.contains(&to))
}
