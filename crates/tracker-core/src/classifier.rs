//! Error classification for failed transactions.
//!
//! Maps raw wallet and provider messages onto the `TxErrorKind` taxonomy.
//! Classification is a pure lookup and never fails: anything the table does
//! not recognise becomes `TxErrorKind::Unknown`.

use regex::Regex;
use tracker_config::ClassifierRule;
use tracker_types::{ClassifiedError, TxErrorKind};

/// Built-in table of lowercase substrings, checked in order.
///
/// More specific causes come first: "insufficient funds for gas" must not be
/// read as a gas problem, and "execution reverted: out of gas" is out of gas.
static BUILTIN_PATTERNS: &[(&str, TxErrorKind)] = &[
	("user denied", TxErrorKind::UserRejected),
	("user rejected", TxErrorKind::UserRejected),
	("rejected by user", TxErrorKind::UserRejected),
	("user cancelled", TxErrorKind::UserRejected),
	("code: 4001", TxErrorKind::UserRejected),
	("\"code\":4001", TxErrorKind::UserRejected),
	("insufficient funds", TxErrorKind::InsufficientFunds),
	("out of gas", TxErrorKind::OutOfGas),
	("gas required exceeds", TxErrorKind::OutOfGas),
	("intrinsic gas too low", TxErrorKind::OutOfGas),
	("nonce too low", TxErrorKind::NonceTooLow),
	("replacement transaction underpriced", TxErrorKind::ReplacementUnderpriced),
	("revert", TxErrorKind::Reverted),
	("timeout", TxErrorKind::Timeout),
	("timed out", TxErrorKind::Timeout),
	("failed to fetch", TxErrorKind::Network),
	("network", TxErrorKind::Network),
	("connection", TxErrorKind::Network),
];

/// Classifies raw error messages.
///
/// Custom rules from configuration are evaluated before the built-in table,
/// in the order they were configured.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
	rules: Vec<(Regex, TxErrorKind)>,
}

impl ErrorClassifier {
	/// Creates a classifier that only uses the built-in table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a classifier with additional configured rules.
	pub fn with_rules(rules: &[ClassifierRule]) -> Result<Self, regex::Error> {
		let rules = rules
			.iter()
			.map(|rule| Ok((Regex::new(&rule.pattern)?, rule.kind)))
			.collect::<Result<Vec<_>, regex::Error>>()?;
		Ok(Self { rules })
	}

	/// Maps a raw message onto a canonical cause.
	pub fn kind_of(&self, raw: &str) -> TxErrorKind {
		if let Some((_, kind)) = self.rules.iter().find(|(re, _)| re.is_match(raw)) {
			return *kind;
		}

		let lowered = raw.to_lowercase();
		BUILTIN_PATTERNS
			.iter()
			.find(|(needle, _)| lowered.contains(needle))
			.map(|(_, kind)| *kind)
			.unwrap_or(TxErrorKind::Unknown)
	}

	/// Classifies a raw message into a stored error description.
	pub fn classify(&self, raw: &str) -> ClassifiedError {
		ClassifiedError::new(self.kind_of(raw), raw)
	}
}

/// Classifies a raw message with the built-in table only.
pub fn classify_error(raw: &str) -> ClassifiedError {
	ErrorClassifier::new().classify(raw)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_classification() {
		let cases = [
			(
				"MetaMask Tx Signature: User denied transaction signature.",
				TxErrorKind::UserRejected,
			),
			("User rejected the request.", TxErrorKind::UserRejected),
			(
				"{\"code\":4001,\"message\":\"rejected\"}",
				TxErrorKind::UserRejected,
			),
			(
				"insufficient funds for gas * price + value",
				TxErrorKind::InsufficientFunds,
			),
			(
				"gas required exceeds allowance (8000000)",
				TxErrorKind::OutOfGas,
			),
			("execution reverted: out of gas", TxErrorKind::OutOfGas),
			("execution reverted: ds-chief-invalid-slate", TxErrorKind::Reverted),
			("Transaction has been reverted by the EVM", TxErrorKind::Reverted),
			("nonce too low", TxErrorKind::NonceTooLow),
			(
				"replacement transaction underpriced",
				TxErrorKind::ReplacementUnderpriced,
			),
			("Request timed out", TxErrorKind::Timeout),
			("Failed to fetch", TxErrorKind::Network),
		];

		let classifier = ErrorClassifier::new();
		for (raw, expected) in cases {
			assert_eq!(classifier.kind_of(raw), expected, "message: {}", raw);
		}
	}

	#[test]
	fn test_unmatched_falls_back_to_unknown() {
		let error = classify_error("something odd happened");
		assert_eq!(error.kind, TxErrorKind::Unknown);
		assert_eq!(error.raw, "something odd happened");
		assert_eq!(error.message, TxErrorKind::Unknown.description());

		assert_eq!(classify_error("").kind, TxErrorKind::Unknown);
	}

	#[test]
	fn test_custom_rules_take_precedence() {
		let rules = vec![ClassifierRule {
			pattern: "(?i)network busy".to_string(),
			kind: TxErrorKind::Timeout,
		}];
		let classifier = ErrorClassifier::with_rules(&rules).unwrap();

		assert_eq!(classifier.kind_of("Network busy, try later"), TxErrorKind::Timeout);
		assert_eq!(classifier.kind_of("network down"), TxErrorKind::Network);
	}

	#[test]
	fn test_invalid_rule_is_rejected() {
		let rules = vec![ClassifierRule {
			pattern: "(".to_string(),
			kind: TxErrorKind::Reverted,
		}];
		assert!(ErrorClassifier::with_rules(&rules).is_err());
	}
}
