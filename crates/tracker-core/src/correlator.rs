//! Event correlation between submission services and the lifecycle store.
//!
//! The correlator subscribes to the lifecycle event stream of one submitted
//! transaction and forwards each event to the matching store operation. The
//! `SubmissionId` the store returns for `Initialized` is bound to that stream
//! and reused for every later event, so events of different transactions
//! can never be confused even when their submission timestamps collide.
//!
//! The correlator is a pure forwarding layer: it never retries or reissues
//! events, and it reports nothing to the user itself.

use crate::store::{LifecycleStore, StoreError};
use crate::submission::{PendingTransaction, SubmissionError, SubmissionInterface};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::instrument;
use tracker_types::{truncate_id, LifecycleEvent, SubmissionId, TxIntent};

/// Errors that can occur while forwarding a lifecycle event.
///
/// All of them mean the event wiring is broken; none is a user-facing failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
	/// An event arrived before the stream's `Initialized` event.
	#[error("Received {0} event before initialized")]
	NotInitialized(&'static str),
	/// A second `Initialized` event arrived for the same stream.
	#[error("Transaction {0} was already initialized")]
	AlreadyInitialized(SubmissionId),
	/// A `Pending` event carried no hash.
	#[error("Pending event for {0} carries no hash")]
	MissingHash(SubmissionId),
	/// The store rejected the update.
	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Correlation state of one transaction's event stream.
#[derive(Debug, Default)]
pub struct Correlation {
	id: Option<SubmissionId>,
	submitted_at: Option<u64>,
	message: Option<String>,
}

impl Correlation {
	/// Starts a correlation for a transaction described by `message`.
	pub fn new(message: Option<String>) -> Self {
		Self {
			id: None,
			submitted_at: None,
			message,
		}
	}

	/// Uses the submission time stamped on the transaction handle instead of
	/// the one carried by the `Initialized` event.
	pub fn with_submitted_at(mut self, submitted_at: u64) -> Self {
		self.submitted_at = Some(submitted_at);
		self
	}

	/// The store id, once `Initialized` has been forwarded.
	pub fn id(&self) -> Option<SubmissionId> {
		self.id
	}

	fn bound(&self, event: &'static str) -> Result<SubmissionId, CorrelationError> {
		self.id.ok_or(CorrelationError::NotInitialized(event))
	}
}

/// Forwards lifecycle events of submitted transactions to the store.
#[derive(Clone)]
pub struct EventCorrelator {
	store: Arc<LifecycleStore>,
}

impl EventCorrelator {
	pub fn new(store: Arc<LifecycleStore>) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &Arc<LifecycleStore> {
		&self.store
	}

	/// Forwards one event to the store operation it corresponds to.
	pub fn apply(
		&self,
		correlation: &mut Correlation,
		event: LifecycleEvent,
	) -> Result<SubmissionId, CorrelationError> {
		match event {
			LifecycleEvent::Initialized { meta } => {
				if let Some(id) = correlation.id {
					return Err(CorrelationError::AlreadyInitialized(id));
				}
				let submitted_at = match correlation.submitted_at {
					Some(stamped) if stamped != meta.submitted_at => {
						tracing::error!(
							sender = %truncate_id(meta.sender()),
							stamped,
							reported = meta.submitted_at,
							"Initialized event disagrees with the submission handle"
						);
						stamped
					},
					Some(stamped) => stamped,
					None => meta.submitted_at,
				};
				let id = self.store.initialize(
					meta.sender(),
					submitted_at,
					correlation.message.take(),
				);
				correlation.id = Some(id);
				Ok(id)
			},
			LifecycleEvent::Pending { meta } => {
				let id = correlation.bound("pending")?;
				let hash = meta.hash.clone().ok_or(CorrelationError::MissingHash(id))?;
				self.store.mark_pending(meta.sender(), id, hash)?;
				Ok(id)
			},
			LifecycleEvent::Mined { meta } => {
				let id = correlation.bound("mined")?;
				self.store.mark_mined(meta.sender(), id)?;
				Ok(id)
			},
			LifecycleEvent::Error { meta, error } => {
				let id = correlation.bound("error")?;
				self.store.mark_error(meta.sender(), id, &error)?;
				Ok(id)
			},
		}
	}

	/// Starts forwarding a pending transaction's events.
	///
	/// Spawns exactly one task per transaction. The task finishes once the
	/// event stream closes.
	pub fn track(&self, pending: PendingTransaction, message: Option<String>) -> JoinHandle<()> {
		let correlator = self.clone();
		tokio::spawn(async move { correlator.forward(pending, message).await })
	}

	/// Submits an intent and tracks the resulting transaction.
	///
	/// A submission error returned before the service produced a handle has
	/// no record to attach to and is returned to the caller.
	pub async fn submit_and_track(
		&self,
		service: &dyn SubmissionInterface,
		intent: TxIntent,
		message: Option<String>,
	) -> Result<JoinHandle<()>, SubmissionError> {
		let pending = service.submit(intent).await?;
		Ok(self.track(pending, message))
	}

	#[instrument(skip_all, fields(submitted_at = pending.submitted_at))]
	async fn forward(self, pending: PendingTransaction, message: Option<String>) {
		let PendingTransaction {
			submitted_at,
			mut events,
			outcome,
		} = pending;
		let mut correlation = Correlation::new(message).with_submitted_at(submitted_at);

		while let Some(event) = events.recv().await {
			let name = event.name();
			let sender = truncate_id(event.meta().sender());
			match self.apply(&mut correlation, event) {
				Ok(id) => {
					tracing::debug!(%sender, submission_id = %id, event = name, "Forwarded lifecycle event");
				},
				Err(e) => {
					tracing::error!(%sender, event = name, error = %e, "Dropped lifecycle event");
				},
			}
		}

		// The event stream is the authoritative channel for outcomes
		match outcome.await {
			Ok(Ok(hash)) => {
				tracing::debug!(tx_hash = %truncate_id(hash.as_str()), "Submission settled");
			},
			Ok(Err(e)) => {
				tracing::debug!(error = %e, "Submission outcome absorbed");
			},
			Err(_) => {
				tracing::debug!("Submission outcome dropped");
			},
		}
	}
}
