//! Text rendering of the board state.
//!
//! Presentation only: columns and cards are drawn from the derived
//! grouping, one section per status column with a live count header.

use board_core::GroupedOrders;
use board_types::{Accent, Notification, OrderStatus, ServiceOrder};

/// ANSI color code for a column accent.
fn accent_code(accent: Accent) -> &'static str {
	match accent {
		Accent::Green => "\x1b[32m",
		Accent::Yellow => "\x1b[33m",
		Accent::Red => "\x1b[31m",
		Accent::Blue => "\x1b[34m",
	}
}

const RESET: &str = "\x1b[0m";

/// Renders all four columns in fixed order.
pub fn render_board(grouping: &GroupedOrders) -> String {
	let mut out = String::new();
	for status in OrderStatus::ALL {
		let meta = status.meta();
		let bucket = grouping.bucket(status);
		out.push_str(&format!(
			"{}{} ({}){}\n",
			accent_code(meta.accent),
			meta.column_title,
			bucket.len(),
			RESET
		));
		if bucket.is_empty() {
			out.push_str("  (empty)\n");
		}
		for order in bucket {
			out.push_str(&render_card(order));
		}
		out.push('\n');
	}
	out
}

/// One card line: id, client, service, schedule.
fn render_card(order: &ServiceOrder) -> String {
	let technician = order
		.technician
		.as_deref()
		.map(|t| format!(", tech {}", t))
		.unwrap_or_default();
	format!(
		"  [{}] {} — {} (scheduled {}{})\n",
		order.id,
		order.client_name,
		order.service_type,
		order.scheduled_for.format("%Y-%m-%d"),
		technician
	)
}

/// Renders the flat order list, newest first.
pub fn render_orders(orders: &[ServiceOrder]) -> String {
	if orders.is_empty() {
		return "No orders.\n".into();
	}
	let mut out = String::new();
	for order in orders {
		out.push_str(&format!(
			"  [{}] {:<12} {} — {} (${:.2})\n",
			order.id,
			order.status.meta().badge_label,
			order.client_name,
			order.service_type,
			order.value
		));
	}
	out
}

/// Renders the notification feed, newest first.
pub fn render_notifications(notifications: &[Notification]) -> String {
	if notifications.is_empty() {
		return "No notifications.\n".into();
	}
	let mut out = String::new();
	for n in notifications {
		out.push_str(&format!(
			"  {} [{}] {}: {}\n",
			n.created_at.format("%H:%M:%S"),
			n.kind,
			n.title,
			n.message
		));
	}
	out
}
