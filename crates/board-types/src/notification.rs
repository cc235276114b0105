//! Notification types surfaced to operators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification shown in the operator feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	/// Unique identifier for this notification.
	pub id: String,
	/// Short headline.
	pub title: String,
	/// Full message body.
	pub message: String,
	/// Severity of the notification.
	pub kind: NotificationKind,
	/// Timestamp when this notification was created.
	pub created_at: DateTime<Utc>,
	/// Who or what produced the notification.
	pub author: String,
}

/// Severity classes for notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
	Info,
	Success,
	Warning,
	Error,
}

impl fmt::Display for NotificationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NotificationKind::Info => write!(f, "info"),
			NotificationKind::Success => write!(f, "success"),
			NotificationKind::Warning => write!(f, "warning"),
			NotificationKind::Error => write!(f, "error"),
		}
	}
}
