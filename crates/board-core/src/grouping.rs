//! Status partition of the order list into kanban columns.
//!
//! [`GroupedOrders`] is the board's derived view: four buckets, one per
//! status, each preserving the relative order of the source list. The
//! partition invariant is that every order appears in exactly one
//! bucket and the union of the buckets equals the source set.

use board_types::{OrderStatus, ServiceOrder};

/// Orders partitioned into the four status buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedOrders {
	approved: Vec<ServiceOrder>,
	pending: Vec<ServiceOrder>,
	rejected: Vec<ServiceOrder>,
	inspection: Vec<ServiceOrder>,
}

impl GroupedOrders {
	/// Partitions a flat list of orders into status buckets.
	///
	/// Orders land in the bucket named by their `status` field, in the
	/// order they appear in the source list.
	pub fn group(orders: &[ServiceOrder]) -> Self {
		let mut grouped = Self::default();
		for order in orders {
			grouped.bucket_mut(order.status).push(order.clone());
		}
		grouped
	}

	/// Returns the bucket for the given status.
	pub fn bucket(&self, status: OrderStatus) -> &[ServiceOrder] {
		match status {
			OrderStatus::Approved => &self.approved,
			OrderStatus::Pending => &self.pending,
			OrderStatus::Rejected => &self.rejected,
			OrderStatus::Inspection => &self.inspection,
		}
	}

	fn bucket_mut(&mut self, status: OrderStatus) -> &mut Vec<ServiceOrder> {
		match status {
			OrderStatus::Approved => &mut self.approved,
			OrderStatus::Pending => &mut self.pending,
			OrderStatus::Rejected => &mut self.rejected,
			OrderStatus::Inspection => &mut self.inspection,
		}
	}

	/// Number of orders in the given bucket.
	pub fn count(&self, status: OrderStatus) -> usize {
		self.bucket(status).len()
	}

	/// Total number of orders across all buckets.
	pub fn total(&self) -> usize {
		OrderStatus::ALL.iter().map(|s| self.count(*s)).sum()
	}

	/// Returns the status of the bucket currently holding the order.
	pub fn status_of(&self, order_id: &str) -> Option<OrderStatus> {
		OrderStatus::ALL
			.into_iter()
			.find(|status| self.bucket(*status).iter().any(|o| o.id == order_id))
	}

	/// Returns the order with the given id, wherever it sits.
	pub fn find(&self, order_id: &str) -> Option<&ServiceOrder> {
		OrderStatus::ALL
			.iter()
			.flat_map(|status| self.bucket(*status).iter())
			.find(|o| o.id == order_id)
	}

	/// Removes an order from its bucket, preserving the relative order
	/// of the remaining orders. Returns the bucket it was removed from
	/// together with the order.
	pub fn remove(&mut self, order_id: &str) -> Option<(OrderStatus, ServiceOrder)> {
		for status in OrderStatus::ALL {
			let bucket = self.bucket_mut(status);
			if let Some(pos) = bucket.iter().position(|o| o.id == order_id) {
				return Some((status, bucket.remove(pos)));
			}
		}
		None
	}

	/// Appends an order to the end of the given bucket.
	pub fn append(&mut self, status: OrderStatus, order: ServiceOrder) {
		self.bucket_mut(status).push(order);
	}

	/// Replaces an entire bucket. Used by the move-commit rollback to
	/// restore a pre-drag snapshot.
	pub fn replace_bucket(&mut self, status: OrderStatus, orders: Vec<ServiceOrder>) {
		*self.bucket_mut(status) = orders;
	}

	/// Ids of all orders across buckets, in column order.
	pub fn ids(&self) -> Vec<String> {
		OrderStatus::ALL
			.iter()
			.flat_map(|status| self.bucket(*status).iter())
			.map(|o| o.id.clone())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use board_types::{ClientType, PersonType};

	fn order(id: &str, status: OrderStatus) -> ServiceOrder {
		ServiceOrder {
			id: id.into(),
			status,
			client_name: format!("Client {}", id),
			address: "12 Main St".into(),
			service_type: "Preventive Maintenance".into(),
			created_at: Utc::now(),
			scheduled_for: Utc::now(),
			client_type: ClientType::New,
			person_type: PersonType::Individual,
			value: 100.0,
			technician: None,
			description: None,
			rating: None,
			budget_id: None,
		}
	}

	// The buckets are a partition of the input set.
	#[test]
	fn grouping_is_a_partition() {
		let orders = vec![
			order("A", OrderStatus::Approved),
			order("B", OrderStatus::Pending),
			order("C", OrderStatus::Rejected),
			order("D", OrderStatus::Inspection),
			order("E", OrderStatus::Pending),
		];
		let grouped = GroupedOrders::group(&orders);

		assert_eq!(grouped.total(), orders.len());
		let mut ids = grouped.ids();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), orders.len());
		for o in &orders {
			assert_eq!(grouped.status_of(&o.id), Some(o.status));
		}
	}

	#[test]
	fn buckets_preserve_source_order() {
		let orders = vec![
			order("1", OrderStatus::Pending),
			order("2", OrderStatus::Approved),
			order("3", OrderStatus::Pending),
			order("4", OrderStatus::Pending),
		];
		let grouped = GroupedOrders::group(&orders);

		let pending: Vec<_> = grouped
			.bucket(OrderStatus::Pending)
			.iter()
			.map(|o| o.id.as_str())
			.collect();
		assert_eq!(pending, vec!["1", "3", "4"]);
	}

	// Removing an order does not reorder the remaining bucket.
	#[test]
	fn remove_keeps_remaining_order() {
		let orders = vec![
			order("1", OrderStatus::Pending),
			order("2", OrderStatus::Pending),
			order("3", OrderStatus::Pending),
		];
		let mut grouped = GroupedOrders::group(&orders);

		let (from, removed) = grouped.remove("2").unwrap();
		assert_eq!(from, OrderStatus::Pending);
		assert_eq!(removed.id, "2");

		let remaining: Vec<_> = grouped
			.bucket(OrderStatus::Pending)
			.iter()
			.map(|o| o.id.as_str())
			.collect();
		assert_eq!(remaining, vec!["1", "3"]);
	}

	#[test]
	fn remove_missing_is_none() {
		let mut grouped = GroupedOrders::group(&[order("1", OrderStatus::Approved)]);
		assert!(grouped.remove("nope").is_none());
		assert_eq!(grouped.total(), 1);
	}

	#[test]
	fn append_lands_at_the_end() {
		let mut grouped = GroupedOrders::group(&[
			order("1", OrderStatus::Inspection),
			order("2", OrderStatus::Inspection),
		]);
		grouped.append(OrderStatus::Inspection, order("3", OrderStatus::Inspection));

		let ids: Vec<_> = grouped
			.bucket(OrderStatus::Inspection)
			.iter()
			.map(|o| o.id.as_str())
			.collect();
		assert_eq!(ids, vec!["1", "2", "3"]);
	}

	#[test]
	fn empty_input_has_empty_buckets() {
		let grouped = GroupedOrders::group(&[]);
		assert_eq!(grouped.total(), 0);
		for status in OrderStatus::ALL {
			assert!(grouped.bucket(status).is_empty());
		}
	}
}
