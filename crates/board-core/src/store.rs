//! Authoritative order store.
//!
//! Owns the order collection behind the storage service and publishes
//! an event for every mutation. The board keeps a derived grouping of
//! this list; after any move the store is the source of truth the
//! grouping must agree with.

use crate::event_bus::EventBus;
use board_storage::StorageService;
use board_types::{BoardEvent, OrderDraft, OrderEvent, OrderStatus, ServiceOrder, StorageKey};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

/// Errors that can occur during order store operations.
#[derive(Debug, Error)]
pub enum OrderStoreError {
	#[error("Storage error: {0}")]
	Storage(String),
	#[error("Order not found: {0}")]
	OrderNotFound(String),
	#[error("Duplicate order id: {0}")]
	DuplicateId(String),
}

impl From<board_storage::StorageError> for OrderStoreError {
	fn from(err: board_storage::StorageError) -> Self {
		OrderStoreError::Storage(err.to_string())
	}
}

/// Id under which the ordered list of order ids is stored.
const INDEX_ID: &str = "all";

/// Authoritative store for service orders.
///
/// Records live under the `orders` namespace keyed by id; the display
/// order (newest first) is kept as an explicit id index so listing does
/// not depend on backend iteration order.
pub struct OrderStore {
	storage: Arc<StorageService>,
	event_bus: EventBus,
}

impl OrderStore {
	pub fn new(storage: Arc<StorageService>, event_bus: EventBus) -> Self {
		Self { storage, event_bus }
	}

	/// Ingests a starting data set.
	///
	/// Rejects duplicate ids up front; a rejected seed leaves the store
	/// untouched. Seeding publishes no events.
	#[instrument(skip_all, fields(count = orders.len()))]
	pub async fn seed(&self, orders: Vec<ServiceOrder>) -> Result<(), OrderStoreError> {
		let mut ids: Vec<String> = Vec::with_capacity(orders.len());
		for order in &orders {
			if ids.iter().any(|id| *id == order.id) {
				return Err(OrderStoreError::DuplicateId(order.id.clone()));
			}
			ids.push(order.id.clone());
		}

		for order in &orders {
			self.storage
				.store(StorageKey::Orders.as_str(), &order.id, order)
				.await?;
		}
		self.write_index(&ids).await?;
		tracing::info!(count = ids.len(), "Seeded order store");
		Ok(())
	}

	/// Lists all orders in display order (newest first).
	pub async fn list_orders(&self) -> Result<Vec<ServiceOrder>, OrderStoreError> {
		let ids = self.read_index().await?;
		let mut orders = Vec::with_capacity(ids.len());
		for id in &ids {
			let order: ServiceOrder = self
				.storage
				.retrieve(StorageKey::Orders.as_str(), id)
				.await
				.map_err(|e| match e {
					board_storage::StorageError::NotFound => {
						OrderStoreError::OrderNotFound(id.clone())
					}
					other => other.into(),
				})?;
			orders.push(order);
		}
		Ok(orders)
	}

	/// Gets an order by id.
	pub async fn get_order(&self, order_id: &str) -> Result<ServiceOrder, OrderStoreError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				board_storage::StorageError::NotFound => {
					OrderStoreError::OrderNotFound(order_id.to_string())
				}
				other => other.into(),
			})
	}

	/// Creates a new order from a draft, assigning id and creation time.
	#[instrument(skip_all, fields(client = %draft.client_name))]
	pub async fn create_order(&self, draft: OrderDraft) -> Result<ServiceOrder, OrderStoreError> {
		let order = ServiceOrder {
			id: Uuid::new_v4().to_string(),
			status: draft.status,
			client_name: draft.client_name,
			address: draft.address,
			service_type: draft.service_type,
			created_at: Utc::now(),
			scheduled_for: draft.scheduled_for,
			client_type: draft.client_type,
			person_type: draft.person_type,
			value: draft.value,
			technician: draft.technician,
			description: draft.description,
			rating: None,
			budget_id: draft.budget_id,
		};

		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, &order)
			.await?;

		// Newest first, like the intake feed.
		let mut ids = self.read_index().await?;
		ids.insert(0, order.id.clone());
		self.write_index(&ids).await?;

		self.event_bus
			.publish(BoardEvent::Order(OrderEvent::Created {
				order: order.clone(),
			}))
			.ok();
		Ok(order)
	}

	/// Updates an order with a closure and persists it.
	pub async fn update_order_with<F>(
		&self,
		order_id: &str,
		updater: F,
	) -> Result<ServiceOrder, OrderStoreError>
	where
		F: FnOnce(&mut ServiceOrder),
	{
		let mut order = self.get_order(order_id).await?;
		updater(&mut order);

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await?;

		self.event_bus
			.publish(BoardEvent::Order(OrderEvent::Updated {
				order: order.clone(),
			}))
			.ok();
		Ok(order)
	}

	/// Reassigns an order's status. This is the move-commit target the
	/// board invokes exactly once per valid drag.
	#[instrument(skip_all, fields(order_id = %order_id, to = %new_status))]
	pub async fn set_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<ServiceOrder, OrderStoreError> {
		let mut order = self.get_order(order_id).await?;
		let from = order.status;
		if from == new_status {
			return Ok(order);
		}
		order.status = new_status;

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await?;

		self.event_bus
			.publish(BoardEvent::Order(OrderEvent::Moved {
				order_id: order_id.to_string(),
				from,
				to: new_status,
			}))
			.ok();
		tracing::debug!(%from, to = %new_status, "Order status changed");
		Ok(order)
	}

	/// Deletes an order and its index entry.
	#[instrument(skip(self))]
	pub async fn delete_order(&self, order_id: &str) -> Result<(), OrderStoreError> {
		// Existence check first so a bogus id surfaces as OrderNotFound.
		let _ = self.get_order(order_id).await?;

		self.storage
			.remove(StorageKey::Orders.as_str(), order_id)
			.await?;

		let mut ids = self.read_index().await?;
		ids.retain(|id| id != order_id);
		self.write_index(&ids).await?;

		self.event_bus
			.publish(BoardEvent::Order(OrderEvent::Deleted {
				order_id: order_id.to_string(),
			}))
			.ok();
		Ok(())
	}

	async fn read_index(&self) -> Result<Vec<String>, OrderStoreError> {
		match self
			.storage
			.retrieve::<Vec<String>>(StorageKey::OrderIndex.as_str(), INDEX_ID)
			.await
		{
			Ok(ids) => Ok(ids),
			Err(board_storage::StorageError::NotFound) => Ok(Vec::new()),
			Err(e) => Err(e.into()),
		}
	}

	async fn write_index(&self, ids: &[String]) -> Result<(), OrderStoreError> {
		self.storage
			.store(StorageKey::OrderIndex.as_str(), INDEX_ID, &ids)
			.await
			.map_err(Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use board_storage::implementations::memory::MemoryStorage;
	use board_types::{ClientType, PersonType};

	fn sample(id: &str, status: OrderStatus) -> ServiceOrder {
		ServiceOrder {
			id: id.into(),
			status,
			client_name: format!("Client {}", id),
			address: "12 Main St".into(),
			service_type: "Leak Repair".into(),
			created_at: Utc::now(),
			scheduled_for: Utc::now(),
			client_type: ClientType::Renewal,
			person_type: PersonType::Company,
			value: 350.0,
			technician: Some("P. Santos".into()),
			description: None,
			rating: None,
			budget_id: None,
		}
	}

	fn store() -> OrderStore {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		OrderStore::new(storage, EventBus::default())
	}

	#[tokio::test]
	async fn seed_and_list_preserve_order() {
		let store = store();
		store
			.seed(vec![
				sample("1", OrderStatus::Approved),
				sample("2", OrderStatus::Pending),
				sample("3", OrderStatus::Rejected),
			])
			.await
			.unwrap();

		let orders = store.list_orders().await.unwrap();
		let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids, vec!["1", "2", "3"]);
	}

	#[tokio::test]
	async fn seed_rejects_duplicate_ids() {
		let store = store();
		let result = store
			.seed(vec![
				sample("1", OrderStatus::Approved),
				sample("1", OrderStatus::Pending),
			])
			.await;
		assert!(matches!(result, Err(OrderStoreError::DuplicateId(id)) if id == "1"));
		assert!(store.list_orders().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn create_prepends_and_publishes() {
		let store = store();
		let mut events = store.event_bus.subscribe();
		store.seed(vec![sample("1", OrderStatus::Approved)]).await.unwrap();

		let draft = OrderDraft {
			status: OrderStatus::Pending,
			client_name: "New Client".into(),
			address: "9 Canal Rd".into(),
			service_type: "Meter Installation".into(),
			scheduled_for: Utc::now(),
			client_type: ClientType::New,
			person_type: PersonType::Individual,
			value: 120.0,
			technician: None,
			description: None,
			budget_id: None,
		};
		let created = store.create_order(draft).await.unwrap();
		assert!(!created.id.is_empty());

		let orders = store.list_orders().await.unwrap();
		assert_eq!(orders.len(), 2);
		assert_eq!(orders[0].id, created.id);

		match events.recv().await.unwrap() {
			BoardEvent::Order(OrderEvent::Created { order }) => assert_eq!(order.id, created.id),
			other => panic!("unexpected event: {:?}", other),
		}
	}

	#[tokio::test]
	async fn set_status_publishes_moved() {
		let store = store();
		let mut events = store.event_bus.subscribe();
		store.seed(vec![sample("1", OrderStatus::Pending)]).await.unwrap();

		let moved = store.set_status("1", OrderStatus::Approved).await.unwrap();
		assert_eq!(moved.status, OrderStatus::Approved);

		match events.recv().await.unwrap() {
			BoardEvent::Order(OrderEvent::Moved { order_id, from, to }) => {
				assert_eq!(order_id, "1");
				assert_eq!(from, OrderStatus::Pending);
				assert_eq!(to, OrderStatus::Approved);
			}
			other => panic!("unexpected event: {:?}", other),
		}
	}

	#[tokio::test]
	async fn set_status_same_value_is_a_noop() {
		let store = store();
		let mut events = store.event_bus.subscribe();
		store.seed(vec![sample("1", OrderStatus::Pending)]).await.unwrap();

		let order = store.set_status("1", OrderStatus::Pending).await.unwrap();
		assert_eq!(order.status, OrderStatus::Pending);
		assert!(matches!(
			events.try_recv(),
			Err(tokio::sync::broadcast::error::TryRecvError::Empty)
		));
	}

	#[tokio::test]
	async fn delete_removes_record_and_index_entry() {
		let store = store();
		store
			.seed(vec![
				sample("1", OrderStatus::Approved),
				sample("2", OrderStatus::Pending),
			])
			.await
			.unwrap();

		store.delete_order("1").await.unwrap();
		let ids: Vec<_> = store
			.list_orders()
			.await
			.unwrap()
			.iter()
			.map(|o| o.id.clone())
			.collect();
		assert_eq!(ids, vec!["2"]);

		let result = store.get_order("1").await;
		assert!(matches!(result, Err(OrderStoreError::OrderNotFound(_))));
	}

	#[tokio::test]
	async fn missing_order_surfaces_not_found() {
		let store = store();
		let result = store.set_status("ghost", OrderStatus::Approved).await;
		assert!(matches!(result, Err(OrderStoreError::OrderNotFound(_))));
	}
}
