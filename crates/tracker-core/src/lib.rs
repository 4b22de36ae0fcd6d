//! Transaction lifecycle tracker.
//!
//! Records the status of every outbound transaction a user submits and
//! exposes it reactively. A submission service hands back a pending
//! transaction, the correlator subscribes to its lifecycle events, each
//! event updates the lifecycle store, and listeners re-render from the
//! store's snapshots.

pub mod classifier;
pub mod correlator;
pub mod engine;
pub mod state;
pub mod store;
pub mod submission;

pub use classifier::{classify_error, ErrorClassifier};
pub use correlator::{Correlation, CorrelationError, EventCorrelator};
pub use engine::event_bus::EventBus;
pub use engine::{Tracker, TrackerBuilder, TrackerError};
pub use store::{LifecycleStore, StoreError, StoreSnapshot, SubscriptionId};
pub use submission::implementations::scripted::{ScriptStep, ScriptedSubmission};
pub use submission::{
	PendingTransaction, SubmissionError, SubmissionInterface, SubmissionOutcome,
};
