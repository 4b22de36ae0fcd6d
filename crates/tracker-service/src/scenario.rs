//! Replay scenarios for the tracker binary.
//!
//! A scenario is a JSON array of submissions. Each entry names the sender,
//! an optional description and the lifecycle steps the scripted submission
//! service plays after `initialized`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracker_core::ScriptStep;
use tracker_types::TxIntent;

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid scenario: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Scenario entry {index}: {message}")]
	Validation { index: usize, message: String },
}

/// One submission in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEntry {
	/// Sender address.
	pub from: String,
	/// Description stored on the record.
	#[serde(default)]
	pub message: Option<String>,
	/// Contract method, for logs.
	#[serde(default)]
	pub method: Option<String>,
	/// Steps played after `initialized`.
	#[serde(default)]
	pub steps: Vec<ScriptStep>,
}

impl ScenarioEntry {
	pub fn intent(&self) -> TxIntent {
		TxIntent {
			from: self.from.clone(),
			to: None,
			method: self.method.clone(),
		}
	}
}

/// Parses and validates a scenario document.
pub fn parse(content: &str) -> Result<Vec<ScenarioEntry>, ScenarioError> {
	let entries: Vec<ScenarioEntry> = serde_json::from_str(content)?;
	for (index, entry) in entries.iter().enumerate() {
		if entry.from.is_empty() {
			return Err(ScenarioError::Validation {
				index,
				message: "sender address cannot be empty".into(),
			});
		}
	}
	Ok(entries)
}

/// Loads a scenario from a file.
pub async fn load(path: impl AsRef<Path>) -> Result<Vec<ScenarioEntry>, ScenarioError> {
	let content = tokio::fs::read_to_string(path).await?;
	parse(&content)
}
