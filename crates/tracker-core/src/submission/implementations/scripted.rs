//! Scripted submission service.
//!
//! Plays back a queued script of lifecycle steps for each submitted intent
//! instead of talking to a wallet. Used by the replay binary and by tests
//! that need a realistic event stream without a chain.

use crate::submission::{
	PendingTransaction, SubmissionError, SubmissionInterface, SubmissionOutcome,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};
use tracker_types::{
	current_timestamp_millis, with_0x_prefix, LifecycleEvent, RawTxError, TransactionHash,
	TxAction, TxIntent, TxMeta,
};

/// One step played after the `Initialized` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
	/// The network accepted the transaction under this hash.
	Pending(String),
	/// The transaction was mined.
	Mined,
	/// The transaction failed with this raw message.
	Error(String),
}

struct ScriptQueue {
	scripts: VecDeque<Vec<ScriptStep>>,
	last_submitted_at: u64,
}

/// Submission service that replays queued scripts in submission order.
pub struct ScriptedSubmission {
	queue: Mutex<ScriptQueue>,
	event_buffer: usize,
}

impl ScriptedSubmission {
	/// Creates a service whose event channels hold `event_buffer` events.
	pub fn new(event_buffer: usize) -> Self {
		Self {
			queue: Mutex::new(ScriptQueue {
				scripts: VecDeque::new(),
				last_submitted_at: 0,
			}),
			event_buffer: event_buffer.max(1),
		}
	}

	/// Queues the script played for the next submission.
	pub fn push_script(&self, steps: Vec<ScriptStep>) {
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.scripts
			.push_back(steps);
	}

	pub fn queued(&self) -> usize {
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.scripts
			.len()
	}

	/// Takes the next script and stamps a strictly increasing submission time.
	fn next_script(&self) -> Result<(Vec<ScriptStep>, u64), SubmissionError> {
		let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
		let steps = queue
			.scripts
			.pop_front()
			.ok_or_else(|| SubmissionError::Unavailable("no script queued".into()))?;
		let submitted_at = current_timestamp_millis().max(queue.last_submitted_at + 1);
		queue.last_submitted_at = submitted_at;
		Ok((steps, submitted_at))
	}
}

/// Emits the lifecycle of one transaction and resolves its outcome.
async fn play(
	intent: TxIntent,
	submitted_at: u64,
	steps: Vec<ScriptStep>,
	events: mpsc::Sender<LifecycleEvent>,
	outcome: oneshot::Sender<SubmissionOutcome>,
) {
	let mut meta = TxMeta {
		action: TxAction {
			from: intent.from,
			method: intent.method,
		},
		submitted_at,
		hash: None,
	};
	let mut result: SubmissionOutcome =
		Err(SubmissionError::TransactionFailed("lifecycle did not finish".into()));

	let initialized = LifecycleEvent::Initialized { meta: meta.clone() };
	if events.send(initialized).await.is_err() {
		return;
	}

	for step in steps {
		let event = match step {
			ScriptStep::Pending(hash) => {
				meta.hash = Some(TransactionHash(with_0x_prefix(&hash)));
				LifecycleEvent::Pending { meta: meta.clone() }
			},
			ScriptStep::Mined => {
				result = meta.hash.clone().ok_or_else(|| {
					SubmissionError::TransactionFailed("mined without a hash".into())
				});
				LifecycleEvent::Mined { meta: meta.clone() }
			},
			ScriptStep::Error(message) => {
				result = Err(SubmissionError::TransactionFailed(message.clone()));
				LifecycleEvent::Error {
					meta: meta.clone(),
					error: RawTxError::new(message),
				}
			},
		};

		// Receiver gone means nobody is tracking this transaction any more
		if events.send(event).await.is_err() {
			break;
		}
	}

	drop(events);
	outcome.send(result).ok();
}

#[async_trait]
impl SubmissionInterface for ScriptedSubmission {
	async fn submit(&self, intent: TxIntent) -> Result<PendingTransaction, SubmissionError> {
		let (steps, submitted_at) = self.next_script()?;
		let (event_tx, event_rx) = mpsc::channel(self.event_buffer);
		let (outcome_tx, outcome_rx) = oneshot::channel();

		tokio::spawn(play(intent, submitted_at, steps, event_tx, outcome_tx));

		Ok(PendingTransaction {
			submitted_at,
			events: event_rx,
			outcome: outcome_rx,
		})
	}
}
