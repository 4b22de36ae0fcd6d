//! Tracker assembly.
//!
//! Wires the classifier, event bus, lifecycle store and correlator together
//! from configuration.

pub mod event_bus;

use crate::classifier::ErrorClassifier;
use crate::correlator::EventCorrelator;
use crate::store::LifecycleStore;
use crate::submission::{SubmissionError, SubmissionInterface};
use event_bus::EventBus;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracker_config::Config;
use tracker_types::TxIntent;

/// Errors that can occur while assembling or running the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
	/// Error related to configuration issues.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Error from the submission service.
	#[error("Service error: {0}")]
	Service(String),
}

impl From<SubmissionError> for TrackerError {
	fn from(err: SubmissionError) -> Self {
		TrackerError::Service(err.to_string())
	}
}

/// A configured lifecycle store with its correlator.
#[derive(Clone)]
pub struct Tracker {
	config: Config,
	store: Arc<LifecycleStore>,
	correlator: EventCorrelator,
}

impl Tracker {
	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn store(&self) -> &Arc<LifecycleStore> {
		&self.store
	}

	pub fn correlator(&self) -> &EventCorrelator {
		&self.correlator
	}

	/// Submits an intent through `service` and tracks its lifecycle.
	pub async fn submit(
		&self,
		service: &dyn SubmissionInterface,
		intent: TxIntent,
		message: Option<String>,
	) -> Result<JoinHandle<()>, TrackerError> {
		tracing::info!(
			tracker = %self.config.tracker.id,
			sender = %tracker_types::truncate_id(&intent.from),
			"Submitting transaction"
		);
		Ok(self
			.correlator
			.submit_and_track(service, intent, message)
			.await?)
	}
}

/// Builder for constructing a `Tracker` from configuration.
pub struct TrackerBuilder {
	config: Config,
}

impl TrackerBuilder {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the tracker.
	///
	/// This method:
	/// 1. Compiles the configured classifier rules
	/// 2. Creates the event bus with the configured capacity
	/// 3. Creates the lifecycle store and its correlator
	pub fn build(self) -> Result<Tracker, TrackerError> {
		let classifier = ErrorClassifier::with_rules(&self.config.classifier.rules).map_err(|e| {
			tracing::error!(component = "classifier", error = %e, "Failed to compile classifier rules");
			TrackerError::Config(format!("Invalid classifier rule: {}", e))
		})?;
		tracing::info!(
			component = "classifier",
			rules = self.config.classifier.rules.len(),
			"Loaded"
		);

		if self.config.tracker.event_buffer == 0 {
			return Err(TrackerError::Config(
				"event_buffer must be greater than 0".into(),
			));
		}
		let event_bus = EventBus::new(self.config.tracker.event_buffer);

		let store = Arc::new(LifecycleStore::new(classifier, event_bus));
		let correlator = EventCorrelator::new(store.clone());
		tracing::info!(component = "store", tracker = %self.config.tracker.id, "Loaded");

		Ok(Tracker {
			config: self.config,
			store,
			correlator,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::submission::implementations::scripted::{ScriptStep, ScriptedSubmission};
	use tracker_config::{ClassifierConfig, ClassifierRule, TrackerConfig};
	use tracker_types::{TransactionStatus, TxErrorKind};

	fn create_test_config() -> Config {
		Config {
			tracker: TrackerConfig {
				id: "test-tracker".to_string(),
				event_buffer: 8,
			},
			classifier: ClassifierConfig {
				rules: vec![ClassifierRule {
					pattern: "ds-chief".to_string(),
					kind: TxErrorKind::Reverted,
				}],
			},
		}
	}

	#[test]
	fn test_build_from_config() {
		let tracker = TrackerBuilder::new(create_test_config()).build().unwrap();
		assert_eq!(tracker.config().tracker.id, "test-tracker");
		assert!(tracker.store().senders().is_empty());
	}

	#[test]
	fn test_build_rejects_zero_buffer() {
		let mut config = create_test_config();
		config.tracker.event_buffer = 0;
		assert!(matches!(
			TrackerBuilder::new(config).build(),
			Err(TrackerError::Config(_))
		));
	}

	#[test]
	fn test_build_rejects_bad_rule() {
		let mut config = create_test_config();
		config.classifier.rules[0].pattern = "[".to_string();
		assert!(matches!(
			TrackerBuilder::new(config).build(),
			Err(TrackerError::Config(_))
		));
	}

	#[tokio::test]
	async fn test_configured_rules_reach_the_store() {
		let tracker = TrackerBuilder::new(create_test_config()).build().unwrap();
		let service = ScriptedSubmission::new(8);
		service.push_script(vec![ScriptStep::Error("ds-chief-invalid-slate".to_string())]);

		tracker
			.submit(&service, TxIntent::new("0xA"), Some("Vote".to_string()))
			.await
			.unwrap()
			.await
			.unwrap();

		let records = tracker.store().transactions("0xA");
		assert_eq!(records[0].status, TransactionStatus::Error);
		assert_eq!(records[0].error.as_ref().unwrap().kind, TxErrorKind::Reverted);
	}
}
