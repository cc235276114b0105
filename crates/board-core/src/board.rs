//! Board controller: drag state machine and move-commit protocol.
//!
//! The controller holds a derived [`GroupedOrders`] view of the
//! authoritative store and drives it through the drag capability
//! interface: `drag_start(id)` then `drag_end(target_zone)`. A commit
//! awaits the store update; on failure the grouping is rolled back to
//! its pre-drag shape and a `MoveFailed` event is published, so the
//! local view never silently diverges from the store.

use crate::event_bus::EventBus;
use crate::grouping::GroupedOrders;
use crate::store::{OrderStore, OrderStoreError};
use board_types::{BoardEvent, OrderEvent, OrderStatus};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur while driving the board.
#[derive(Debug, Error)]
pub enum BoardError {
	/// A drag gesture was started while another one is active.
	#[error("A drag is already in progress for order {0}")]
	AlreadyDragging(String),
	/// `drag_end` was called with no drag in progress.
	#[error("No drag in progress")]
	NoActiveDrag,
	/// A new drag was started while a move commit is still settling.
	#[error("Board is busy committing a move")]
	Busy,
	/// The dragged id does not name an order on the board.
	#[error("Unknown order: {0}")]
	UnknownOrder(String),
	#[error("Store error: {0}")]
	Store(String),
}

impl From<OrderStoreError> for BoardError {
	fn from(err: OrderStoreError) -> Self {
		BoardError::Store(err.to_string())
	}
}

/// Drag-interaction states. At most one card is dragging at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
	/// No active drag.
	Idle,
	/// A card is being moved, tracked by its order id.
	Dragging { order_id: String },
}

/// Result of a completed drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
	/// The move was persisted and the grouping updated.
	Committed { from: OrderStatus, to: OrderStatus },
	/// The card was dropped on its own column; nothing changed.
	Unchanged,
	/// No resolvable drop target; the gesture was abandoned.
	Aborted,
	/// The store update failed; the grouping was restored to its
	/// pre-drag shape.
	RolledBack {
		from: OrderStatus,
		to: OrderStatus,
		reason: String,
	},
}

/// Kanban board controller over the authoritative order store.
pub struct BoardController {
	store: Arc<OrderStore>,
	event_bus: EventBus,
	grouping: GroupedOrders,
	drag: DragState,
	busy: bool,
}

impl BoardController {
	/// Builds a controller with its grouping derived from the current
	/// store contents.
	pub async fn load(store: Arc<OrderStore>, event_bus: EventBus) -> Result<Self, BoardError> {
		let orders = store.list_orders().await?;
		Ok(Self {
			store,
			event_bus,
			grouping: GroupedOrders::group(&orders),
			drag: DragState::Idle,
			busy: false,
		})
	}

	/// The derived column view.
	pub fn grouping(&self) -> &GroupedOrders {
		&self.grouping
	}

	/// Current drag-interaction state.
	pub fn drag_state(&self) -> &DragState {
		&self.drag
	}

	/// Rebuilds the grouping from the authoritative order list.
	pub async fn refresh(&mut self) -> Result<(), BoardError> {
		let orders = self.store.list_orders().await?;
		self.grouping = GroupedOrders::group(&orders);
		Ok(())
	}

	/// Begins a drag gesture for the given order.
	pub fn drag_start(&mut self, order_id: &str) -> Result<(), BoardError> {
		if self.busy {
			return Err(BoardError::Busy);
		}
		if let DragState::Dragging { order_id: active } = &self.drag {
			return Err(BoardError::AlreadyDragging(active.clone()));
		}
		if self.grouping.status_of(order_id).is_none() {
			return Err(BoardError::UnknownOrder(order_id.to_string()));
		}
		self.drag = DragState::Dragging {
			order_id: order_id.to_string(),
		};
		Ok(())
	}

	/// Ends the active drag gesture, committing the move when the drop
	/// target names a different column.
	///
	/// The state always returns to idle, whatever the outcome. A missing
	/// or unrecognized zone is an aborted gesture, not an error.
	#[instrument(skip_all, fields(zone = target_zone.unwrap_or("-")))]
	pub async fn drag_end(
		&mut self,
		target_zone: Option<&str>,
	) -> Result<MoveOutcome, BoardError> {
		let order_id = match std::mem::replace(&mut self.drag, DragState::Idle) {
			DragState::Dragging { order_id } => order_id,
			DragState::Idle => return Err(BoardError::NoActiveDrag),
		};

		let to = match target_zone.and_then(OrderStatus::from_zone) {
			Some(status) => status,
			None => {
				tracing::debug!(order_id, "Drag abandoned without a drop target");
				return Ok(MoveOutcome::Aborted);
			}
		};

		let from = self
			.grouping
			.status_of(&order_id)
			.ok_or_else(|| BoardError::UnknownOrder(order_id.clone()))?;
		if from == to {
			return Ok(MoveOutcome::Unchanged);
		}

		self.commit_move(&order_id, from, to).await
	}

	/// Convenience for drivers without a real drag surface: a grab and
	/// drop in one step.
	pub async fn move_order(
		&mut self,
		order_id: &str,
		target_zone: &str,
	) -> Result<MoveOutcome, BoardError> {
		self.drag_start(order_id)?;
		self.drag_end(Some(target_zone)).await
	}

	/// The move-commit protocol: update the local grouping, await the
	/// store, roll back on failure.
	async fn commit_move(
		&mut self,
		order_id: &str,
		from: OrderStatus,
		to: OrderStatus,
	) -> Result<MoveOutcome, BoardError> {
		// Snapshot the two affected buckets for rollback.
		let from_snapshot = self.grouping.bucket(from).to_vec();
		let to_snapshot = self.grouping.bucket(to).to_vec();

		let (_, mut order) = self
			.grouping
			.remove(order_id)
			.ok_or_else(|| BoardError::UnknownOrder(order_id.to_string()))?;
		order.status = to;
		self.grouping.append(to, order);

		self.busy = true;
		let result = self.store.set_status(order_id, to).await;
		self.busy = false;

		match result {
			Ok(_) => {
				tracing::info!(order_id, %from, %to, "Order moved");
				Ok(MoveOutcome::Committed { from, to })
			}
			Err(e) => {
				let reason = e.to_string();
				self.grouping.replace_bucket(from, from_snapshot);
				self.grouping.replace_bucket(to, to_snapshot);
				self.event_bus
					.publish(BoardEvent::Order(OrderEvent::MoveFailed {
						order_id: order_id.to_string(),
						from,
						to,
						reason: reason.clone(),
					}))
					.ok();
				tracing::warn!(order_id, %from, %to, %reason, "Move rolled back");
				Ok(MoveOutcome::RolledBack { from, to, reason })
			}
		}
	}
}
