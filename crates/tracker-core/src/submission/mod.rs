//! Submission service seam.
//!
//! A submission service signs and broadcasts a transaction intent and hands
//! back a `PendingTransaction`: the lifecycle event stream for that one
//! transaction plus its final outcome. Wallet and provider integrations
//! implement `SubmissionInterface`; the tracker only consumes the handle.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracker_types::{LifecycleEvent, TransactionHash, TxIntent};

/// Re-export implementations
pub mod implementations {
	pub mod scripted;
}

/// Errors that can occur while submitting a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the transaction did not succeed.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// Error that occurs when the service cannot accept submissions.
	#[error("Submission service unavailable: {0}")]
	Unavailable(String),
}

/// Outcome of a submission, resolved once the lifecycle has finished.
pub type SubmissionOutcome = Result<TransactionHash, SubmissionError>;

/// Handle to a transaction that was handed to a submission service.
#[derive(Debug)]
pub struct PendingTransaction {
	/// Timestamp stamped on the handle at submission, in milliseconds.
	pub submitted_at: u64,
	/// Lifecycle events of this transaction, in emission order.
	pub events: mpsc::Receiver<LifecycleEvent>,
	/// Final outcome. The event stream is authoritative; this only mirrors it.
	pub outcome: oneshot::Receiver<SubmissionOutcome>,
}

/// Trait defining the interface for transaction submission services.
#[async_trait]
pub trait SubmissionInterface: Send + Sync {
	/// Submits a transaction intent.
	///
	/// Returns as soon as the service has a handle for the transaction;
	/// everything after that is reported on the handle's event stream.
	async fn submit(&self, intent: TxIntent) -> Result<PendingTransaction, SubmissionError>;
}
