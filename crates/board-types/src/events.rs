//! Event types for inter-service communication.
//!
//! Events flow through the board event bus so services can react to
//! order mutations without holding references to each other. The
//! notification relay is the main consumer.

use crate::{OrderStatus, ServiceOrder};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all board events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoardEvent {
	/// Events from the order store and board controller.
	Order(OrderEvent),
}

/// Events related to order mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// A new order has been created.
	Created { order: ServiceOrder },
	/// An order's descriptive fields have been updated.
	Updated { order: ServiceOrder },
	/// An order has been moved to a new status column.
	Moved {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
	},
	/// A move commit failed and the board rolled back.
	MoveFailed {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
		reason: String,
	},
	/// An order has been deleted.
	Deleted { order_id: String },
}
