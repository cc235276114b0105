//! Notification service for the board system.
//!
//! Stores the operator-facing notification feed and runs the relay
//! that turns board events into notifications. This is the channel
//! through which a failed move commit reaches the user.

use board_core::EventBus;
use board_storage::StorageService;
use board_types::{
	BoardEvent, Notification, NotificationKind, OrderEvent, StorageKey,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Errors that can occur during notification operations.
#[derive(Debug, Error)]
pub enum NotifyError {
	#[error("Storage error: {0}")]
	Storage(String),
	#[error("Notification not found: {0}")]
	NotFound(String),
}

impl From<board_storage::StorageError> for NotifyError {
	fn from(err: board_storage::StorageError) -> Self {
		NotifyError::Storage(err.to_string())
	}
}

/// Id under which the ordered list of notification ids is stored.
const INDEX_ID: &str = "all";

/// Author attributed to notifications produced by the relay.
const SYSTEM_AUTHOR: &str = "board";

/// Service owning the notification feed.
pub struct NotificationService {
	storage: Arc<StorageService>,
}

impl NotificationService {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Lists notifications, newest first.
	pub async fn list(&self) -> Result<Vec<Notification>, NotifyError> {
		let ids = self.read_index().await?;
		let mut notifications = Vec::with_capacity(ids.len());
		for id in &ids {
			let notification: Notification = self
				.storage
				.retrieve(StorageKey::Notifications.as_str(), id)
				.await
				.map_err(|e| match e {
					board_storage::StorageError::NotFound => NotifyError::NotFound(id.clone()),
					other => other.into(),
				})?;
			notifications.push(notification);
		}
		Ok(notifications)
	}

	/// Records a new notification at the head of the feed.
	pub async fn create(
		&self,
		kind: NotificationKind,
		title: &str,
		message: &str,
		author: &str,
	) -> Result<Notification, NotifyError> {
		let notification = Notification {
			id: Uuid::new_v4().to_string(),
			title: title.to_string(),
			message: message.to_string(),
			kind,
			created_at: Utc::now(),
			author: author.to_string(),
		};

		self.storage
			.store(
				StorageKey::Notifications.as_str(),
				&notification.id,
				&notification,
			)
			.await?;

		let mut ids = self.read_index().await?;
		ids.insert(0, notification.id.clone());
		self.write_index(&ids).await?;
		Ok(notification)
	}

	/// Deletes a notification from the feed.
	pub async fn delete(&self, id: &str) -> Result<(), NotifyError> {
		if !self
			.storage
			.exists(StorageKey::Notifications.as_str(), id)
			.await?
		{
			return Err(NotifyError::NotFound(id.to_string()));
		}
		self.storage
			.remove(StorageKey::Notifications.as_str(), id)
			.await?;
		let mut ids = self.read_index().await?;
		ids.retain(|existing| existing != id);
		self.write_index(&ids).await?;
		Ok(())
	}

	/// Consumes board events and records a notification for each order
	/// mutation. Runs until the event bus closes.
	pub async fn relay(&self, event_bus: EventBus) {
		let mut receiver = event_bus.subscribe();
		loop {
			match receiver.recv().await {
				Ok(event) => {
					if let Err(e) = self.record(&event).await {
						tracing::warn!(error = %e, "Failed to record notification");
					}
				}
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Notification relay lagged behind the event bus");
				}
				Err(RecvError::Closed) => {
					tracing::debug!("Event bus closed, stopping notification relay");
					break;
				}
			}
		}
	}

	/// Maps one board event onto a stored notification.
	async fn record(&self, event: &BoardEvent) -> Result<(), NotifyError> {
		let BoardEvent::Order(order_event) = event;
		match order_event {
			OrderEvent::Created { order } => {
				self.create(
					NotificationKind::Success,
					"Service order created",
					&format!("Order for {} was created", order.client_name),
					SYSTEM_AUTHOR,
				)
				.await?;
			}
			OrderEvent::Updated { order } => {
				self.create(
					NotificationKind::Info,
					"Service order updated",
					&format!("Order for {} was updated", order.client_name),
					SYSTEM_AUTHOR,
				)
				.await?;
			}
			OrderEvent::Moved { order_id, to, .. } => {
				self.create(
					NotificationKind::Success,
					"Service order moved",
					&format!("Order {} moved to {}", order_id, to.meta().column_title),
					SYSTEM_AUTHOR,
				)
				.await?;
			}
			OrderEvent::MoveFailed {
				order_id,
				to,
				reason,
				..
			} => {
				self.create(
					NotificationKind::Error,
					"Service order move failed",
					&format!(
						"Order {} could not be moved to {}: {}",
						order_id,
						to.meta().column_title,
						reason
					),
					SYSTEM_AUTHOR,
				)
				.await?;
			}
			OrderEvent::Deleted { order_id } => {
				self.create(
					NotificationKind::Success,
					"Service order deleted",
					&format!("Order {} was deleted", order_id),
					SYSTEM_AUTHOR,
				)
				.await?;
			}
		}
		Ok(())
	}

	async fn read_index(&self) -> Result<Vec<String>, NotifyError> {
		match self
			.storage
			.retrieve::<Vec<String>>(StorageKey::NotificationIndex.as_str(), INDEX_ID)
			.await
		{
			Ok(ids) => Ok(ids),
			Err(board_storage::StorageError::NotFound) => Ok(Vec::new()),
			Err(e) => Err(e.into()),
		}
	}

	async fn write_index(&self, ids: &[String]) -> Result<(), NotifyError> {
		self.storage
			.store(StorageKey::NotificationIndex.as_str(), INDEX_ID, &ids)
			.await
			.map_err(Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use board_storage::implementations::memory::MemoryStorage;
	use board_types::OrderStatus;

	fn service() -> NotificationService {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		NotificationService::new(storage)
	}

	#[tokio::test]
	async fn create_and_list_newest_first() {
		let notify = service();
		notify
			.create(NotificationKind::Info, "first", "first message", "tester")
			.await
			.unwrap();
		notify
			.create(NotificationKind::Warning, "second", "second message", "tester")
			.await
			.unwrap();

		let feed = notify.list().await.unwrap();
		assert_eq!(feed.len(), 2);
		assert_eq!(feed[0].title, "second");
		assert_eq!(feed[1].title, "first");
	}

	#[tokio::test]
	async fn delete_unknown_is_not_found() {
		let notify = service();
		let result = notify.delete("ghost").await;
		assert!(matches!(result, Err(NotifyError::NotFound(_))));
	}

	#[tokio::test]
	async fn delete_removes_from_feed() {
		let notify = service();
		let n = notify
			.create(NotificationKind::Info, "t", "m", "tester")
			.await
			.unwrap();
		notify.delete(&n.id).await.unwrap();
		assert!(notify.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn move_failed_becomes_an_error_notification() {
		let notify = service();
		notify
			.record(&BoardEvent::Order(OrderEvent::MoveFailed {
				order_id: "1".into(),
				from: OrderStatus::Pending,
				to: OrderStatus::Approved,
				reason: "simulated outage".into(),
			}))
			.await
			.unwrap();

		let feed = notify.list().await.unwrap();
		assert_eq!(feed.len(), 1);
		assert_eq!(feed[0].kind, NotificationKind::Error);
		assert!(feed[0].message.contains("simulated outage"));
	}

	#[tokio::test]
	async fn moved_becomes_a_success_notification() {
		let notify = service();
		notify
			.record(&BoardEvent::Order(OrderEvent::Moved {
				order_id: "1".into(),
				from: OrderStatus::Pending,
				to: OrderStatus::Inspection,
			}))
			.await
			.unwrap();

		let feed = notify.list().await.unwrap();
		assert_eq!(feed[0].kind, NotificationKind::Success);
		assert!(feed[0].message.contains("Inspection"));
	}

	#[tokio::test]
	async fn relay_records_bus_events() {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		let notify = Arc::new(NotificationService::new(storage));
		let bus = EventBus::default();

		let relay_notify = notify.clone();
		let relay_bus = bus.clone();
		let handle = tokio::spawn(async move { relay_notify.relay(relay_bus).await });

		// Give the relay a moment to subscribe before publishing.
		tokio::task::yield_now().await;
		bus.publish(BoardEvent::Order(OrderEvent::Deleted {
			order_id: "o1".into(),
		}))
		.unwrap();

		// Wait for the relay to drain the event.
		for _ in 0..50 {
			if !notify.list().await.unwrap().is_empty() {
				break;
			}
			tokio::time::sleep(std::time::Duration::from_millis(10)).await;
		}
		let feed = notify.list().await.unwrap();
		assert_eq!(feed.len(), 1);
		assert!(feed[0].message.contains("o1"));
		handle.abort();
	}
}
