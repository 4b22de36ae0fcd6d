//! Intents handed to a submission service.

use serde::{Deserialize, Serialize};

/// A transaction the user asked to send, before it has been signed.
///
/// The tracker does not interpret the call data; it only needs the sender
/// to key the resulting record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIntent {
	/// Address the transaction is sent from.
	pub from: String,
	/// Target contract, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	/// Contract method being called, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub method: Option<String>,
}

impl TxIntent {
	pub fn new(from: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: None,
			method: None,
		}
	}
}
