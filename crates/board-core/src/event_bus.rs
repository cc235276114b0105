//! Event bus for inter-service communication.
//!
//! A thin wrapper around a tokio broadcast channel. Publishers do not
//! care whether anyone is listening; a publish with no subscribers is
//! not an error at the call sites, which discard the result.

use board_types::BoardEvent;
use tokio::sync::broadcast;

/// Default capacity of the underlying broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Broadcast bus carrying [`BoardEvent`]s between services.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
	/// Creates a new event bus with the given channel capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns the number of subscribers the event reached, or an error
	/// when there are none.
	pub fn publish(
		&self,
		event: BoardEvent,
	) -> Result<usize, broadcast::error::SendError<BoardEvent>> {
		self.sender.send(event)
	}

	/// Creates a new subscription to the event stream.
	pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
		self.sender.subscribe()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}
