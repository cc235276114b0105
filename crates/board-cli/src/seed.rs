//! Built-in sample data set.
//!
//! A handful of service orders spread across all four columns so the
//! board has something to show on first run.

use board_types::{ClientType, OrderStatus, PersonType, ServiceOrder};
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;

static SAMPLE_ORDERS: Lazy<Vec<ServiceOrder>> = Lazy::new(|| {
	let order = |id: &str,
	             status: OrderStatus,
	             client: &str,
	             address: &str,
	             service: &str,
	             created: (u32, u32),
	             scheduled: (u32, u32),
	             client_type: ClientType,
	             person_type: PersonType,
	             value: f64,
	             technician: Option<&str>| ServiceOrder {
		id: id.into(),
		status,
		client_name: client.into(),
		address: address.into(),
		service_type: service.into(),
		created_at: Utc
			.with_ymd_and_hms(2024, created.0, created.1, 9, 0, 0)
			.unwrap(),
		scheduled_for: Utc
			.with_ymd_and_hms(2024, scheduled.0, scheduled.1, 9, 0, 0)
			.unwrap(),
		client_type,
		person_type,
		value,
		technician: technician.map(Into::into),
		description: None,
		rating: None,
		budget_id: None,
	};

	vec![
		order(
			"1",
			OrderStatus::Approved,
			"John Silva",
			"123 Flower St",
			"Preventive Maintenance",
			(3, 10),
			(3, 15),
			ClientType::Renewal,
			PersonType::Individual,
			1500.0,
			Some("P. Santos"),
		),
		order(
			"2",
			OrderStatus::Pending,
			"ABC Company",
			"1000 Main Ave",
			"Meter Installation",
			(3, 11),
			(3, 16),
			ClientType::New,
			PersonType::Company,
			2800.0,
			Some("M. Oliveira"),
		),
		order(
			"3",
			OrderStatus::Inspection,
			"Mary Santos",
			"500 August St",
			"Technical Inspection",
			(3, 12),
			(3, 17),
			ClientType::Renewal,
			PersonType::Individual,
			800.0,
			None,
		),
		order(
			"4",
			OrderStatus::Approved,
			"Central Condominium",
			"789 Brazil Ave",
			"Leak Repair",
			(3, 13),
			(3, 18),
			ClientType::New,
			PersonType::Company,
			3500.0,
			None,
		),
		order(
			"5",
			OrderStatus::Rejected,
			"Peter Oliveira",
			"42 Harbor Rd",
			"Hydraulic Overhaul",
			(3, 14),
			(3, 19),
			ClientType::New,
			PersonType::Individual,
			1200.0,
			Some("P. Santos"),
		),
		order(
			"6",
			OrderStatus::Pending,
			"Riverside School",
			"7 Hill Crest",
			"Sewage Connection",
			(3, 15),
			(3, 20),
			ClientType::Renewal,
			PersonType::Company,
			4100.0,
			None,
		),
	]
});

/// Returns a fresh copy of the sample order set.
pub fn sample_orders() -> Vec<ServiceOrder> {
	SAMPLE_ORDERS.clone()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_ids_are_unique() {
		let orders = sample_orders();
		let mut ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), orders.len());
	}

	#[test]
	fn sample_covers_every_column() {
		let orders = sample_orders();
		for status in OrderStatus::ALL {
			assert!(orders.iter().any(|o| o.status == status));
		}
	}
}
