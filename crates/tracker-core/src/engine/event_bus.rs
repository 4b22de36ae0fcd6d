//! Broadcast channel for committed store changes.
//!
//! Listeners registered on the store run synchronously inside the mutating
//! call. The event bus is the asynchronous counterpart: every committed
//! change is also published here for tasks that want to await updates.

use tokio::sync::broadcast;
use tracker_types::TrackerEvent;

/// Multi-consumer bus of `TrackerEvent`s.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<TrackerEvent>,
}

impl EventBus {
	/// Creates a bus that buffers up to `capacity` events per receiver.
	///
	/// `capacity` must be greater than zero.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Returns a receiver for events published from now on.
	pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
		self.sender.subscribe()
	}

	/// Publishes an event to all current receivers.
	///
	/// Fails only when nobody is listening, which callers may ignore.
	pub fn publish(
		&self,
		event: TrackerEvent,
	) -> Result<(), broadcast::error::SendError<TrackerEvent>> {
		self.sender.send(event).map(|_| ())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tracker_types::SubmissionId;

	#[tokio::test]
	async fn test_publish_reaches_subscribers() {
		let bus = EventBus::new(8);
		let mut receiver = bus.subscribe();

		let event = TrackerEvent::Mined {
			sender: "0xA".to_string(),
			id: SubmissionId::new(1),
		};
		bus.publish(event.clone()).unwrap();

		assert_eq!(receiver.recv().await.unwrap(), event);
	}

	#[test]
	fn test_publish_without_subscribers_is_an_error() {
		let bus = EventBus::new(8);
		let result = bus.publish(TrackerEvent::Mined {
			sender: "0xA".to_string(),
			id: SubmissionId::new(1),
		});
		assert!(result.is_err());
	}
}
