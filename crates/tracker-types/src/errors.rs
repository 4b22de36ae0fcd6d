//! Normalized error taxonomy for failed transactions.
//!
//! Raw provider and wallet messages vary wildly between clients. The
//! classifier maps them onto `TxErrorKind`, and the resulting
//! `ClassifiedError` is what gets stored on a failed record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical causes of a transaction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxErrorKind {
	/// The user declined to sign in the wallet.
	UserRejected,
	/// The sender cannot pay for value plus gas.
	InsufficientFunds,
	/// Execution ran out of gas or gas estimation failed.
	OutOfGas,
	/// The contract reverted.
	Reverted,
	/// A transaction with this nonce was already mined.
	NonceTooLow,
	/// A replacement was sent without bumping the fee enough.
	ReplacementUnderpriced,
	/// The network did not answer in time.
	Timeout,
	/// The provider could not be reached.
	Network,
	/// Nothing in the classification table matched.
	Unknown,
}

impl TxErrorKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			TxErrorKind::UserRejected => "user_rejected",
			TxErrorKind::InsufficientFunds => "insufficient_funds",
			TxErrorKind::OutOfGas => "out_of_gas",
			TxErrorKind::Reverted => "reverted",
			TxErrorKind::NonceTooLow => "nonce_too_low",
			TxErrorKind::ReplacementUnderpriced => "replacement_underpriced",
			TxErrorKind::Timeout => "timeout",
			TxErrorKind::Network => "network",
			TxErrorKind::Unknown => "unknown",
		}
	}

	/// Human readable description shown for this kind.
	pub fn description(&self) -> &'static str {
		match self {
			TxErrorKind::UserRejected => "Transaction was rejected in the wallet",
			TxErrorKind::InsufficientFunds => "Insufficient funds to pay for the transaction",
			TxErrorKind::OutOfGas => "Transaction ran out of gas",
			TxErrorKind::Reverted => "Transaction was reverted by the contract",
			TxErrorKind::NonceTooLow => "Transaction nonce was already used",
			TxErrorKind::ReplacementUnderpriced => {
				"Replacement transaction fee is too low"
			},
			TxErrorKind::Timeout => "Timed out waiting for the network",
			TxErrorKind::Network => "Unable to reach the network",
			TxErrorKind::Unknown => "Transaction failed for an unknown reason",
		}
	}
}

impl fmt::Display for TxErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a string does not name a `TxErrorKind`.
#[derive(Debug, Error)]
#[error("Unknown error kind: {0}")]
pub struct ParseErrorKindError(pub String);

impl FromStr for TxErrorKind {
	type Err = ParseErrorKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"user_rejected" => Ok(Self::UserRejected),
			"insufficient_funds" => Ok(Self::InsufficientFunds),
			"out_of_gas" => Ok(Self::OutOfGas),
			"reverted" => Ok(Self::Reverted),
			"nonce_too_low" => Ok(Self::NonceTooLow),
			"replacement_underpriced" => Ok(Self::ReplacementUnderpriced),
			"timeout" => Ok(Self::Timeout),
			"network" => Ok(Self::Network),
			"unknown" => Ok(Self::Unknown),
			other => Err(ParseErrorKindError(other.to_string())),
		}
	}
}

/// A raw failure message mapped onto the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
	/// Canonical cause.
	pub kind: TxErrorKind,
	/// Normalized description for display.
	pub message: String,
	/// The message as received from the provider.
	pub raw: String,
}

impl ClassifiedError {
	/// Builds a classified error using the kind's canonical description.
	pub fn new(kind: TxErrorKind, raw: impl Into<String>) -> Self {
		Self {
			kind,
			message: kind.description().to_string(),
			raw: raw.into(),
		}
	}
}

impl fmt::Display for ClassifiedError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}
