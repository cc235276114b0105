//! Service-order types for the board system.
//!
//! This module defines the service-order entity, its closed status
//! lifecycle, and the per-status column metadata used when rendering
//! the kanban board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A service order tracked through the kanban status lifecycle.
///
/// Orders are created by the intake flow and handed to the board as a
/// flat list. The board's only mutation is reassigning `status`; every
/// other field is descriptive and read-only to the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
	/// Unique identifier, assigned at creation and never reused.
	pub id: String,
	/// Current status of the order. The only field the board mutates.
	pub status: OrderStatus,
	/// Name of the client the order was opened for.
	pub client_name: String,
	/// Service address.
	pub address: String,
	/// Kind of service (e.g. "Preventive Maintenance").
	pub service_type: String,
	/// Timestamp when this order was created.
	pub created_at: DateTime<Utc>,
	/// Date the service visit is scheduled for.
	pub scheduled_for: DateTime<Utc>,
	/// Whether this is a new contract or a renewal.
	pub client_type: ClientType,
	/// Individual or company client.
	pub person_type: PersonType,
	/// Quoted value of the service.
	pub value: f64,
	/// Technician assigned to the order, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub technician: Option<String>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Client satisfaction rating (1-5) once the service is done.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rating: Option<u8>,
	/// Budget this order originated from, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub budget_id: Option<String>,
}

/// Fields supplied by the caller when creating a new order.
///
/// The store fills in `id` and `created_at` at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
	pub status: OrderStatus,
	pub client_name: String,
	pub address: String,
	pub service_type: String,
	pub scheduled_for: DateTime<Utc>,
	pub client_type: ClientType,
	pub person_type: PersonType,
	pub value: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub technician: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub budget_id: Option<String>,
}

/// Whether an order belongs to a new contract or a renewal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
	New,
	Renewal,
}

/// Legal nature of the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
	Individual,
	Company,
}

/// Status of a service order on the board.
///
/// The set is closed: an order is always in exactly one of these four
/// buckets, and each status maps to one kanban column. Data carrying any
/// other status value fails deserialization and is rejected at ingestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order has been approved and is ready to be scheduled.
	Approved,
	/// Order is awaiting a decision.
	Pending,
	/// Order has been rejected.
	Rejected,
	/// Order requires an on-site inspection.
	Inspection,
}

impl OrderStatus {
	/// All statuses in fixed column order, left to right.
	pub const ALL: [OrderStatus; 4] = [
		OrderStatus::Approved,
		OrderStatus::Pending,
		OrderStatus::Rejected,
		OrderStatus::Inspection,
	];

	/// Resolves a drop-zone identifier to a status.
	///
	/// Drop zones are named after the status they move an order into,
	/// so the zone id is the lowercase status name. Returns `None` for
	/// anything else; callers treat that as an aborted gesture.
	pub fn from_zone(zone: &str) -> Option<OrderStatus> {
		match zone {
			"approved" => Some(OrderStatus::Approved),
			"pending" => Some(OrderStatus::Pending),
			"rejected" => Some(OrderStatus::Rejected),
			"inspection" => Some(OrderStatus::Inspection),
			_ => None,
		}
	}

	/// Returns the drop-zone identifier for this status.
	pub fn as_zone(&self) -> &'static str {
		match self {
			OrderStatus::Approved => "approved",
			OrderStatus::Pending => "pending",
			OrderStatus::Rejected => "rejected",
			OrderStatus::Inspection => "inspection",
		}
	}

	/// Per-status presentation metadata.
	///
	/// Exhaustive by construction: adding or removing a status is a
	/// compile-time-checked change here, not a string-keyed lookup.
	pub fn meta(&self) -> StatusMeta {
		match self {
			OrderStatus::Approved => StatusMeta {
				column_title: "Approved",
				badge_label: "Approved",
				accent: Accent::Green,
			},
			OrderStatus::Pending => StatusMeta {
				column_title: "Awaiting",
				badge_label: "Awaiting",
				accent: Accent::Yellow,
			},
			OrderStatus::Rejected => StatusMeta {
				column_title: "Rejected",
				badge_label: "Rejected",
				accent: Accent::Red,
			},
			OrderStatus::Inspection => StatusMeta {
				column_title: "Inspection",
				badge_label: "Inspection",
				accent: Accent::Blue,
			},
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_zone())
	}
}

/// Presentation metadata for one status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
	/// Column header title.
	pub column_title: &'static str,
	/// Label shown on the card badge.
	pub badge_label: &'static str,
	/// Accent color used by renderers.
	pub accent: Accent,
}

/// Accent colors available to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
	Green,
	Yellow,
	Red,
	Blue,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zone_ids_round_trip() {
		for status in OrderStatus::ALL {
			assert_eq!(OrderStatus::from_zone(status.as_zone()), Some(status));
		}
		assert_eq!(OrderStatus::from_zone("archived"), None);
		assert_eq!(OrderStatus::from_zone(""), None);
	}

	#[test]
	fn unknown_status_fails_deserialization() {
		let result: Result<OrderStatus, _> = serde_json::from_str("\"archived\"");
		assert!(result.is_err());
	}

	#[test]
	fn status_serializes_lowercase() {
		assert_eq!(
			serde_json::to_string(&OrderStatus::Inspection).unwrap(),
			"\"inspection\""
		);
	}

	#[test]
	fn meta_titles_are_distinct() {
		let mut titles: Vec<_> = OrderStatus::ALL.iter().map(|s| s.meta().column_title).collect();
		titles.sort_unstable();
		titles.dedup();
		assert_eq!(titles.len(), 4);
	}
}
