//! Event types for transaction lifecycle tracking.
//!
//! Two families live here. `LifecycleEvent` is what a submission service
//! emits for a single transaction, in the fixed order
//! `Initialized -> Pending -> (Mined | Error)` with `Error` allowed in place
//! of `Pending`. `TrackerEvent` is what the lifecycle store broadcasts after
//! it has committed a change.

use crate::{ClassifiedError, ErrorType, SubmissionId, TransactionHash};
use serde::{Deserialize, Serialize};

/// Action metadata attached to a transaction by the submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAction {
	/// Sender address; keys the record in the store.
	pub from: String,
	/// Contract method, when the service reports it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub method: Option<String>,
}

/// Transaction metadata carried by every lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMeta {
	pub action: TxAction,
	/// Timestamp stamped on the handle at submission, in milliseconds.
	pub submitted_at: u64,
	/// On-chain hash, once the network has accepted the transaction.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hash: Option<TransactionHash>,
}

impl TxMeta {
	/// Sender address from the action metadata.
	pub fn sender(&self) -> &str {
		&self.action.from
	}
}

/// Raw failure reported by a wallet or provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTxError {
	pub message: String,
}

impl RawTxError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// One callback of a transaction's lifecycle event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
	/// The transaction handle was created.
	Initialized { meta: TxMeta },
	/// The network accepted the transaction.
	Pending { meta: TxMeta },
	/// The transaction was included in a block.
	Mined { meta: TxMeta },
	/// The transaction failed.
	Error { meta: TxMeta, error: RawTxError },
}

impl LifecycleEvent {
	pub fn meta(&self) -> &TxMeta {
		match self {
			LifecycleEvent::Initialized { meta }
			| LifecycleEvent::Pending { meta }
			| LifecycleEvent::Mined { meta }
			| LifecycleEvent::Error { meta, .. } => meta,
		}
	}

	/// Short name used in logs.
	pub fn name(&self) -> &'static str {
		match self {
			LifecycleEvent::Initialized { .. } => "initialized",
			LifecycleEvent::Pending { .. } => "pending",
			LifecycleEvent::Mined { .. } => "mined",
			LifecycleEvent::Error { .. } => "error",
		}
	}
}

/// Change committed by the lifecycle store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerEvent {
	/// A new record was appended.
	Initialized { sender: String, id: SubmissionId },
	/// A record received its hash.
	Pending {
		sender: String,
		id: SubmissionId,
		hash: TransactionHash,
	},
	/// A record was mined.
	Mined { sender: String, id: SubmissionId },
	/// A record failed.
	Failed {
		sender: String,
		id: SubmissionId,
		error_type: ErrorType,
		error: ClassifiedError,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lifecycle_event_json_shape() {
		let json = r#"{
			"event": "error",
			"meta": { "action": { "from": "0xB" }, "submitted_at": 200 },
			"error": { "message": "User rejected" }
		}"#;

		let event: LifecycleEvent = serde_json::from_str(json).unwrap();
		assert_eq!(event.name(), "error");
		assert_eq!(event.meta().sender(), "0xB");
		assert_eq!(event.meta().submitted_at, 200);
		assert!(event.meta().hash.is_none());
	}
}
