//! In-memory lifecycle store for submitted transactions.
//!
//! The store keeps, per sender address, the ordered list of transactions that
//! sender submitted. It is the only owner of `TransactionRecord`s: every
//! change goes through one of the lifecycle operations below, which consult
//! the transition table, commit a new immutable snapshot and then notify
//! listeners and the event bus before returning.
//!
//! Records are looked up by `(sender, SubmissionId)`. A lookup miss means an
//! event arrived for a transaction that was never initialized. That is an
//! integration bug, so it is reported as `StoreError::RecordNotFound` and the
//! update is not applied.

mod subscription;

pub use subscription::SubscriptionId;

use crate::classifier::ErrorClassifier;
use crate::engine::event_bus::EventBus;
use crate::state::is_valid_transition;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use subscription::Subscriptions;
use thiserror::Error;
use tracker_types::{
	truncate_id, ErrorType, RawTxError, SubmissionId, TrackerEvent, TransactionHash,
	TransactionRecord, TransactionStatus,
};

/// Default capacity of the store's event bus.
const DEFAULT_EVENT_BUFFER: usize = 64;

/// Errors returned by lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
	/// No record exists for the correlation key.
	#[error("Unable to find tx from {sender} with id {id}")]
	RecordNotFound { sender: String, id: SubmissionId },
	/// A pending acknowledgment carried a different hash than the one recorded.
	#[error("Transaction {id} already has hash {existing}, refusing {received}")]
	HashConflict {
		id: SubmissionId,
		existing: TransactionHash,
		received: TransactionHash,
	},
}

type Transactions = HashMap<String, Arc<Vec<TransactionRecord>>>;

/// Immutable view of every sender's transactions at one point in time.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
	version: u64,
	transactions: Arc<Transactions>,
}

impl StoreSnapshot {
	/// Monotonic counter bumped by every committed change.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Ordered transactions of one sender, if it ever submitted any.
	pub fn transactions(&self, sender: &str) -> Option<Arc<Vec<TransactionRecord>>> {
		self.transactions.get(sender).cloned()
	}

	pub fn senders(&self) -> impl Iterator<Item = &str> {
		self.transactions.keys().map(String::as_str)
	}

	/// Owned copy of the whole state, e.g. for serialization.
	pub fn to_map(&self) -> HashMap<String, Vec<TransactionRecord>> {
		self.transactions
			.iter()
			.map(|(sender, records)| (sender.clone(), records.as_ref().clone()))
			.collect()
	}
}

/// What a lifecycle operation decided to do with a record.
enum Change {
	/// Write the updated record and publish the event.
	Commit(TrackerEvent),
	/// Leave the record as it is.
	Keep,
}

/// Process-wide store of transaction lifecycles.
pub struct LifecycleStore {
	state: Mutex<StoreSnapshot>,
	next_id: AtomicU64,
	classifier: ErrorClassifier,
	subscriptions: Subscriptions,
	event_bus: EventBus,
}

impl Default for LifecycleStore {
	fn default() -> Self {
		Self::new(ErrorClassifier::default(), EventBus::new(DEFAULT_EVENT_BUFFER))
	}
}

impl LifecycleStore {
	pub fn new(classifier: ErrorClassifier, event_bus: EventBus) -> Self {
		Self {
			state: Mutex::new(StoreSnapshot::default()),
			next_id: AtomicU64::new(1),
			classifier,
			subscriptions: Subscriptions::default(),
			event_bus,
		}
	}

	fn lock_state(&self) -> MutexGuard<'_, StoreSnapshot> {
		// Every write is a single assignment, so a poisoned lock still holds
		// a consistent snapshot.
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Adds a new `Initialized` record for `sender` and returns its id.
	///
	/// Records are kept in submission order. `Initialized` events of different
	/// transactions can arrive in any order, so the record is placed by
	/// `submitted_at`, with ties going to the earlier id.
	pub fn initialize(
		&self,
		sender: &str,
		submitted_at: u64,
		message: Option<String>,
	) -> SubmissionId {
		let id = SubmissionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
		let record = TransactionRecord::initialized(id, submitted_at, message);

		let snapshot = {
			let mut state = self.lock_state();
			state.version += 1;
			let records = Arc::make_mut(
				Arc::make_mut(&mut state.transactions)
					.entry(sender.to_string())
					.or_default(),
			);
			let position =
				records.partition_point(|r| (r.submitted_at, r.id) <= (submitted_at, id));
			records.insert(position, record);
			state.clone()
		};

		tracing::debug!(sender = %truncate_id(sender), submission_id = %id, submitted_at, "Initialized transaction");
		self.publish(
			&snapshot,
			TrackerEvent::Initialized {
				sender: sender.to_string(),
				id,
			},
		);
		id
	}

	/// Records that the network accepted the transaction under `hash`.
	///
	/// Repeating the call with the same hash changes nothing. A different
	/// hash for an already pending record is a `HashConflict`.
	pub fn mark_pending(
		&self,
		sender: &str,
		id: SubmissionId,
		hash: TransactionHash,
	) -> Result<TransactionRecord, StoreError> {
		self.transition(sender, id, TransactionStatus::Pending, |record| {
			match &record.hash {
				Some(existing) if *existing == hash => Ok(Change::Keep),
				Some(existing) => Err(StoreError::HashConflict {
					id,
					existing: existing.clone(),
					received: hash,
				}),
				None => {
					record.status = TransactionStatus::Pending;
					record.hash = Some(hash.clone());
					Ok(Change::Commit(TrackerEvent::Pending {
						sender: sender.to_string(),
						id,
						hash,
					}))
				},
			}
		})
	}

	/// Records that the transaction was mined.
	///
	/// Accepted from `Initialized` as well as `Pending`, since a confirmation
	/// can overtake the pending acknowledgment.
	pub fn mark_mined(
		&self,
		sender: &str,
		id: SubmissionId,
	) -> Result<TransactionRecord, StoreError> {
		self.transition(sender, id, TransactionStatus::Mined, |record| {
			record.status = TransactionStatus::Mined;
			Ok(Change::Commit(TrackerEvent::Mined {
				sender: sender.to_string(),
				id,
			}))
		})
	}

	/// Records that the transaction failed.
	///
	/// The failure is `Failed` when a hash was already known and `NotSent`
	/// otherwise. The raw message is normalized through the classifier.
	pub fn mark_error(
		&self,
		sender: &str,
		id: SubmissionId,
		raw: &RawTxError,
	) -> Result<TransactionRecord, StoreError> {
		self.transition(sender, id, TransactionStatus::Error, |record| {
			let error_type = ErrorType::from_hash_known(record.hash.is_some());
			let error = self.classifier.classify(&raw.message);

			record.status = TransactionStatus::Error;
			record.error_type = Some(error_type);
			record.error = Some(error.clone());
			Ok(Change::Commit(TrackerEvent::Failed {
				sender: sender.to_string(),
				id,
				error_type,
				error,
			}))
		})
	}

	/// Shared lookup, validation and commit path of the lifecycle operations.
	fn transition<F>(
		&self,
		sender: &str,
		id: SubmissionId,
		to: TransactionStatus,
		update: F,
	) -> Result<TransactionRecord, StoreError>
	where
		F: FnOnce(&mut TransactionRecord) -> Result<Change, StoreError>,
	{
		let (record, snapshot, event) = {
			let mut state = self.lock_state();
			let not_found = || StoreError::RecordNotFound {
				sender: sender.to_string(),
				id,
			};

			let index = state
				.transactions
				.get(sender)
				.and_then(|records| records.iter().position(|r| r.id == id))
				.ok_or_else(not_found)?;
			let mut record = state
				.transactions
				.get(sender)
				.and_then(|records| records.get(index))
				.cloned()
				.ok_or_else(not_found)?;

			if !is_valid_transition(record.status, to) {
				tracing::warn!(
					sender = %truncate_id(sender),
					submission_id = %id,
					from = %record.status,
					to = %to,
					"Ignoring transition out of current status"
				);
				return Ok(record);
			}

			match update(&mut record)? {
				Change::Keep => return Ok(record),
				Change::Commit(event) => {
					state.version += 1;
					if let Some(records) = Arc::make_mut(&mut state.transactions).get_mut(sender) {
						Arc::make_mut(records)[index] = record.clone();
					}
					(record, state.clone(), event)
				},
			}
		};

		tracing::debug!(sender = %truncate_id(sender), submission_id = %id, status = %record.status, "Updated transaction");
		self.publish(&snapshot, event);
		Ok(record)
	}

	/// Notifies listeners, then the event bus. Runs after the state lock is released.
	fn publish(&self, snapshot: &StoreSnapshot, event: TrackerEvent) {
		self.subscriptions.notify(snapshot);
		// No receivers is fine
		self.event_bus.publish(event).ok();
	}

	/// Current snapshot of all senders.
	pub fn snapshot(&self) -> StoreSnapshot {
		self.lock_state().clone()
	}

	/// Ordered transactions of `sender`; empty when it never submitted any.
	pub fn transactions(&self, sender: &str) -> Arc<Vec<TransactionRecord>> {
		self.snapshot().transactions(sender).unwrap_or_default()
	}

	pub fn get(&self, sender: &str, id: SubmissionId) -> Option<TransactionRecord> {
		self.transactions(sender)
			.iter()
			.find(|record| record.id == id)
			.cloned()
	}

	pub fn senders(&self) -> Vec<String> {
		self.snapshot().senders().map(str::to_string).collect()
	}

	/// Number of `sender`'s transactions that have not reached a terminal status.
	pub fn pending_count(&self, sender: &str) -> usize {
		self.transactions(sender)
			.iter()
			.filter(|record| !record.status.is_terminal())
			.count()
	}

	/// Subscribes a listener to a slice of the store.
	///
	/// `selector` runs on every committed change; `listener` is called with
	/// the selected value only when it differs from the previous one.
	/// Listeners run synchronously, before the mutating call returns.
	pub fn subscribe<T, S, L>(&self, selector: S, listener: L) -> SubscriptionId
	where
		T: PartialEq + Clone + Send + 'static,
		S: Fn(&StoreSnapshot) -> T + Send + Sync + 'static,
		L: Fn(&T) + Send + Sync + 'static,
	{
		self.register(self.snapshot(), selector, listener)
	}

	/// Registers a listener seeded with `seed`, then brings it up to date.
	///
	/// A change committed after `seed` was taken but before the listener was
	/// in the registry was published without it. Delivering the current
	/// snapshot once closes that gap; the version guard drops it otherwise.
	fn register<T, S, L>(&self, seed: StoreSnapshot, selector: S, listener: L) -> SubscriptionId
	where
		T: PartialEq + Clone + Send + 'static,
		S: Fn(&StoreSnapshot) -> T + Send + Sync + 'static,
		L: Fn(&T) + Send + Sync + 'static,
	{
		let id = self.subscriptions.add(&seed, selector, listener);
		self.subscriptions.deliver(id, &self.snapshot());
		id
	}

	/// Subscribes to one sender's transactions.
	pub fn subscribe_sender<L>(&self, sender: &str, listener: L) -> SubscriptionId
	where
		L: Fn(&Arc<Vec<TransactionRecord>>) + Send + Sync + 'static,
	{
		let sender = sender.to_string();
		self.subscribe(
			move |snapshot| snapshot.transactions(&sender).unwrap_or_default(),
			listener,
		)
	}

	/// Removes a listener. Returns false if it was not registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.subscriptions.remove(id)
	}

	pub fn subscriber_count(&self) -> usize {
		self.subscriptions.len()
	}

	/// The bus every committed change is published on.
	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::AtomicUsize;
	use tracker_types::TxErrorKind;

	fn hash(value: &str) -> TransactionHash {
		TransactionHash::from(value)
	}

	#[test]
	fn test_initialize_appends_in_submission_order() {
		let store = LifecycleStore::default();
		let first = store.initialize("0xA", 100, Some("first".to_string()));
		let second = store.initialize("0xA", 101, None);

		let records = store.transactions("0xA");
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].id, first);
		assert_eq!(records[1].id, second);
		assert_ne!(first, second);
		assert!(records
			.iter()
			.all(|r| r.status == TransactionStatus::Initialized && r.hash.is_none()));
	}

	#[test]
	fn test_mark_pending_is_idempotent() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);

		let first = store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();
		let version = store.snapshot().version();
		let second = store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();

		assert_eq!(first, second);
		assert_eq!(second.status, TransactionStatus::Pending);
		assert_eq!(store.snapshot().version(), version);
	}

	#[test]
	fn test_mark_pending_rejects_a_second_hash() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);
		store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();

		let err = store.mark_pending("0xA", id, hash("0xHASH2")).unwrap_err();
		assert!(matches!(err, StoreError::HashConflict { .. }));
		assert_eq!(store.get("0xA", id).unwrap().hash, Some(hash("0xHASH1")));
	}

	#[test]
	fn test_mined_is_terminal() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);
		store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();
		store.mark_mined("0xA", id).unwrap();

		let after_error = store
			.mark_error("0xA", id, &RawTxError::new("execution reverted"))
			.unwrap();
		assert_eq!(after_error.status, TransactionStatus::Mined);
		assert!(after_error.error.is_none());

		let after_mined = store.mark_mined("0xA", id).unwrap();
		assert_eq!(after_mined.status, TransactionStatus::Mined);
	}

	#[test]
	fn test_error_is_terminal() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);
		store
			.mark_error("0xA", id, &RawTxError::new("User denied transaction signature"))
			.unwrap();

		let record = store.mark_pending("0xA", id, hash("0xLATE")).unwrap();
		assert_eq!(record.status, TransactionStatus::Error);
		assert!(record.hash.is_none());
	}

	#[test]
	fn test_mined_without_pending_is_accepted() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);

		let record = store.mark_mined("0xA", id).unwrap();
		assert_eq!(record.status, TransactionStatus::Mined);
		assert!(record.hash.is_none());
	}

	#[test]
	fn test_error_type_depends_on_hash() {
		let store = LifecycleStore::default();
		let not_sent = store.initialize("0xB", 200, None);
		let failed = store.initialize("0xB", 201, None);
		store.mark_pending("0xB", failed, hash("0xHASH2")).unwrap();

		let rejected = store
			.mark_error("0xB", not_sent, &RawTxError::new("User rejected"))
			.unwrap();
		let reverted = store
			.mark_error("0xB", failed, &RawTxError::new("execution reverted"))
			.unwrap();

		assert_eq!(rejected.error_type, Some(ErrorType::NotSent));
		assert_eq!(rejected.error.unwrap().kind, TxErrorKind::UserRejected);
		assert_eq!(reverted.error_type, Some(ErrorType::Failed));
		assert_eq!(reverted.error.unwrap().kind, TxErrorKind::Reverted);
	}

	#[test]
	fn test_unknown_record_is_reported() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);

		let wrong_sender = store.mark_pending("0xC", id, hash("0xHASH")).unwrap_err();
		assert_eq!(
			wrong_sender,
			StoreError::RecordNotFound {
				sender: "0xC".to_string(),
				id
			}
		);

		let missing = SubmissionId::new(id.as_u64() + 100);
		assert!(matches!(
			store.mark_mined("0xA", missing),
			Err(StoreError::RecordNotFound { .. })
		));
		assert!(matches!(
			store.mark_error("0xA", missing, &RawTxError::new("boom")),
			Err(StoreError::RecordNotFound { .. })
		));
		assert_eq!(store.get("0xA", id).unwrap().status, TransactionStatus::Initialized);
	}

	#[test]
	fn test_snapshots_are_immutable() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);
		let before = store.snapshot();

		store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();

		let old = before.transactions("0xA").unwrap();
		assert_eq!(old[0].status, TransactionStatus::Initialized);
		assert_eq!(store.transactions("0xA")[0].status, TransactionStatus::Pending);
		assert!(store.snapshot().version() > before.version());
	}

	#[test]
	fn test_sender_subscription_ignores_other_senders() {
		let store = LifecycleStore::default();
		let calls = Arc::new(AtomicUsize::new(0));
		let seen = Arc::clone(&calls);
		store.subscribe_sender("0xA", move |records| {
			assert!(!records.is_empty());
			seen.fetch_add(1, Ordering::SeqCst);
		});

		let id = store.initialize("0xA", 100, None);
		store.initialize("0xB", 100, None);
		store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();
		// Idempotent repeat commits nothing
		store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();

		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn test_unsubscribe() {
		let store = LifecycleStore::default();
		let calls = Arc::new(AtomicUsize::new(0));
		let seen = Arc::clone(&calls);
		let sub = store.subscribe(
			|snapshot| snapshot.version(),
			move |_| {
				seen.fetch_add(1, Ordering::SeqCst);
			},
		);

		store.initialize("0xA", 100, None);
		assert!(store.unsubscribe(sub));
		assert!(!store.unsubscribe(sub));
		store.initialize("0xA", 101, None);

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(store.subscriber_count(), 0);
	}

	#[test]
	fn test_listener_can_read_the_store() {
		let store = Arc::new(LifecycleStore::default());
		let observed = Arc::new(AtomicUsize::new(0));
		let reader = Arc::clone(&store);
		let count = Arc::clone(&observed);
		store.subscribe_sender("0xA", move |records| {
			assert_eq!(reader.transactions("0xA").len(), records.len());
			count.store(records.len(), Ordering::SeqCst);
		});

		store.initialize("0xA", 100, None);
		assert_eq!(observed.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_changes_reach_the_event_bus() {
		let store = LifecycleStore::default();
		let mut events = store.event_bus().subscribe();

		let id = store.initialize("0xA", 100, None);
		store.mark_mined("0xA", id).unwrap();

		assert_eq!(
			events.recv().await.unwrap(),
			TrackerEvent::Initialized {
				sender: "0xA".to_string(),
				id
			}
		);
		assert_eq!(
			events.recv().await.unwrap(),
			TrackerEvent::Mined {
				sender: "0xA".to_string(),
				id
			}
		);
	}

	#[test]
	fn test_pending_count() {
		let store = LifecycleStore::default();
		let a = store.initialize("0xA", 100, None);
		let b = store.initialize("0xA", 101, None);
		store.initialize("0xA", 102, None);
		store.mark_mined("0xA", a).unwrap();
		store.mark_pending("0xA", b, hash("0xB")).unwrap();

		assert_eq!(store.pending_count("0xA"), 2);
		assert_eq!(store.pending_count("0xZ"), 0);
		assert_eq!(store.senders(), vec!["0xA".to_string()]);
	}

	#[test]
	fn test_late_initialize_is_placed_by_submission_time() {
		let store = LifecycleStore::default();
		let later = store.initialize("0xA", 101, Some("later".to_string()));
		let earlier = store.initialize("0xA", 100, Some("earlier".to_string()));
		let tie = store.initialize("0xA", 101, Some("tie".to_string()));

		let ids: Vec<SubmissionId> = store.transactions("0xA").iter().map(|r| r.id).collect();
		assert_eq!(ids, vec![earlier, later, tie]);

		// Lookups still follow the id, not the position
		store.mark_mined("0xA", later).unwrap();
		let records = store.transactions("0xA");
		assert_eq!(records[1].status, TransactionStatus::Mined);
		assert_eq!(records[0].status, TransactionStatus::Initialized);
	}

	#[test]
	fn test_pending_after_mined_is_ignored() {
		let store = LifecycleStore::default();
		let id = store.initialize("0xA", 100, None);
		store.mark_mined("0xA", id).unwrap();
		let version = store.snapshot().version();

		let record = store.mark_pending("0xA", id, hash("0xLATE")).unwrap();
		assert_eq!(record.status, TransactionStatus::Mined);
		assert!(record.hash.is_none());
		assert!(store.get("0xA", id).unwrap().hash.is_none());
		assert_eq!(store.snapshot().version(), version);
	}

	#[test]
	fn test_subscriber_catches_up_on_change_before_registration() {
		let store = LifecycleStore::default();
		let seed = store.snapshot();
		// Committed after the seed was taken, before the listener is registered
		store.initialize("0xA", 100, None);

		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = Arc::clone(&seen);
		store.register(
			seed,
			|snapshot| snapshot.transactions("0xA").map_or(0, |records| records.len()),
			move |len| sink.lock().unwrap().push(*len),
		);
		assert_eq!(*seen.lock().unwrap(), vec![1]);

		store.initialize("0xA", 101, None);
		assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
	}

	#[test]
	fn test_new_subscriber_is_not_called_for_existing_state() {
		let store = LifecycleStore::default();
		store.initialize("0xA", 100, None);

		let calls = Arc::new(AtomicUsize::new(0));
		let seen = Arc::clone(&calls);
		store.subscribe_sender("0xA", move |_| {
			seen.fetch_add(1, Ordering::SeqCst);
		});

		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn test_vote_is_initialized_pending_then_mined() {
		let store = LifecycleStore::default();

		let id = store.initialize("0xA", 100, Some("Vote for proposal X".to_string()));
		let records = store.transactions("0xA");
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].status, TransactionStatus::Initialized);
		assert!(records[0].hash.is_none());

		let pending = store.mark_pending("0xA", id, hash("0xHASH1")).unwrap();
		assert_eq!(pending.status, TransactionStatus::Pending);
		assert_eq!(pending.hash, Some(hash("0xHASH1")));

		let mined = store.mark_mined("0xA", id).unwrap();
		assert_eq!(mined.status, TransactionStatus::Mined);
		assert_eq!(mined.message.as_deref(), Some("Vote for proposal X"));
	}

	#[test]
	fn test_wallet_rejection_is_not_sent() {
		let store = LifecycleStore::default();

		let id = store.initialize("0xB", 200, None);
		let record = store
			.mark_error("0xB", id, &RawTxError::new("User rejected"))
			.unwrap();

		assert_eq!(record.status, TransactionStatus::Error);
		assert_eq!(record.error_type, Some(ErrorType::NotSent));
		assert_eq!(record.error.unwrap().kind, TxErrorKind::UserRejected);
	}

	#[test]
	fn test_transactions_of_one_sender_do_not_overwrite_each_other() {
		let store = LifecycleStore::default();
		let first = store.initialize("0xA", 100, Some("first".to_string()));
		let second = store.initialize("0xA", 101, Some("second".to_string()));

		store.mark_pending("0xA", second, hash("0xHASH2")).unwrap();
		store.mark_mined("0xA", first).unwrap();

		let first = store.get("0xA", first).unwrap();
		let second = store.get("0xA", second).unwrap();
		assert_eq!(first.status, TransactionStatus::Mined);
		assert!(first.hash.is_none());
		assert_eq!(second.status, TransactionStatus::Pending);
		assert_eq!(second.message.as_deref(), Some("second"));
	}
}
