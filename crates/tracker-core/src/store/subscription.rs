//! Selector-based listeners for the lifecycle store.

use super::StoreSnapshot;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle returned by `LifecycleStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "sub-{}", self.0)
	}
}

type Listener = Arc<dyn Fn(&StoreSnapshot) + Send + Sync>;

/// Last selection delivered to one listener.
struct Selection<T> {
	version: u64,
	value: T,
}

/// Registry of store listeners.
#[derive(Default)]
pub(crate) struct Subscriptions {
	next_id: AtomicU64,
	listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl Subscriptions {
	/// Registers a listener that receives `selector`'s output whenever it
	/// differs from the previous output.
	///
	/// `initial` seeds the comparison so the listener is not called for the
	/// state that existed when it subscribed.
	pub(crate) fn add<T, S, L>(
		&self,
		initial: &StoreSnapshot,
		selector: S,
		listener: L,
	) -> SubscriptionId
	where
		T: PartialEq + Clone + Send + 'static,
		S: Fn(&StoreSnapshot) -> T + Send + Sync + 'static,
		L: Fn(&T) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
		let last = Mutex::new(Selection {
			version: initial.version(),
			value: selector(initial),
		});

		let wrapped: Listener = Arc::new(move |snapshot: &StoreSnapshot| {
			let selected = selector(snapshot);
			{
				let mut last = last.lock().unwrap_or_else(PoisonError::into_inner);
				// Snapshots can race each other to a listener; never go backwards
				if snapshot.version() <= last.version {
					return;
				}
				last.version = snapshot.version();
				if last.value == selected {
					return;
				}
				last.value = selected.clone();
			}
			listener(&selected);
		});

		self.listeners
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push((id, wrapped));
		id
	}

	pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
		let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		listeners.len() != before
	}

	pub(crate) fn len(&self) -> usize {
		self.listeners
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	/// Delivers a snapshot to one listener, if it is still registered.
	pub(crate) fn deliver(&self, id: SubscriptionId, snapshot: &StoreSnapshot) {
		let listener = self
			.listeners
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.iter()
			.find(|(existing, _)| *existing == id)
			.map(|(_, listener)| Arc::clone(listener));

		if let Some(listener) = listener {
			listener(snapshot);
		}
	}

	/// Delivers a snapshot to every listener.
	///
	/// The registry lock is released before any listener runs, so listeners
	/// may read the store or subscribe further listeners.
	pub(crate) fn notify(&self, snapshot: &StoreSnapshot) {
		let listeners: Vec<Listener> = self
			.listeners
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		for listener in listeners {
			listener(snapshot);
		}
	}
}
