//! Common types module for the transaction lifecycle tracker.
//!
//! This module defines the passive data types shared by every tracker
//! component: transaction records and their statuses, the lifecycle events
//! emitted by a submission service, the normalized error taxonomy and the
//! events broadcast after the store commits a change.

/// Normalized error taxonomy for failed transactions.
pub mod errors;
/// Lifecycle events produced by submission services and by the store.
pub mod events;
/// Transaction records and their lifecycle statuses.
pub mod record;
/// Intents handed to a submission service.
pub mod submission;
/// Utility functions for formatting and timestamps.
pub mod utils;

// Re-export all types for convenient access
pub use errors::*;
pub use events::*;
pub use record::*;
pub use submission::*;
pub use utils::{current_timestamp_millis, truncate_id, with_0x_prefix};
