//! Lifecycle state machine for tracked transactions.
//!
//! This module holds the transition table the lifecycle store consults
//! before changing a record's status.

pub mod transaction;

pub use transaction::is_valid_transition;
