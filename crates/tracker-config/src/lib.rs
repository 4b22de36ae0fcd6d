//! Configuration module for the transaction lifecycle tracker.
//!
//! Configuration is read from a TOML file. `${VAR}` and `${VAR:-default}`
//! references are resolved from the environment before parsing, and the
//! parsed result is validated before it is handed out.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracker_types::TxErrorKind;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the tracker.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this tracker instance.
	pub tracker: TrackerConfig,
	/// Additional error classification rules.
	#[serde(default)]
	pub classifier: ClassifierConfig,
}

/// Configuration specific to the tracker instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
	/// Identifier used in logs.
	pub id: String,
	/// Capacity of per-transaction event channels and of the event bus.
	/// Defaults to 64 if not specified.
	#[serde(default = "default_event_buffer")]
	pub event_buffer: usize,
}

fn default_event_buffer() -> usize {
	64
}

/// Extra classification rules, consulted before the built-in table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClassifierConfig {
	#[serde(default)]
	pub rules: Vec<ClassifierRule>,
}

/// A single message pattern and the kind it maps to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierRule {
	/// Regular expression matched against the raw error message.
	pub pattern: String,
	/// Kind assigned when the pattern matches.
	pub kind: TxErrorKind,
}

/// Largest configuration text that environment resolution will scan.
const MAX_CONFIG_SIZE: usize = 1024 * 1024;

/// Substitutes `${NAME}` and `${NAME:-fallback}` references from the environment.
///
/// A reference whose variable is unset and has no fallback is an error naming
/// the first such variable.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	if input.len() > MAX_CONFIG_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration is {} bytes, limit is {} bytes",
			input.len(),
			MAX_CONFIG_SIZE
		)));
	}

	let reference = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut unresolved: Option<String> = None;
	let resolved = reference.replace_all(input, |caps: &Captures<'_>| {
		let name = &caps[1];
		std::env::var(name)
			.ok()
			.or_else(|| caps.get(2).map(|fallback| fallback.as_str().to_string()))
			.unwrap_or_else(|| {
				unresolved.get_or_insert_with(|| name.to_string());
				String::new()
			})
	});

	match unresolved {
		Some(name) => Err(ConfigError::Validation(format!(
			"Environment variable '{}' is not set and has no default",
			name
		))),
		None => Ok(resolved.into_owned()),
	}
}

impl Config {
	/// Loads configuration from a file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Validates the configuration.
	///
	/// - Ensures the tracker ID is not empty
	/// - Ensures the event buffer can hold at least one event
	/// - Checks that every classifier pattern compiles
	fn validate(&self) -> Result<(), ConfigError> {
		if self.tracker.id.is_empty() {
			return Err(ConfigError::Validation("Tracker ID cannot be empty".into()));
		}

		if self.tracker.event_buffer == 0 {
			return Err(ConfigError::Validation(
				"event_buffer must be greater than 0".into(),
			));
		}

		for (index, rule) in self.classifier.rules.iter().enumerate() {
			if rule.pattern.is_empty() {
				return Err(ConfigError::Validation(format!(
					"Classifier rule {} has an empty pattern",
					index
				)));
			}
			Regex::new(&rule.pattern).map_err(|e| {
				ConfigError::Validation(format!(
					"Classifier rule {} has an invalid pattern '{}': {}",
					index, rule.pattern, e
				))
			})?;
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
