//! Storage-related types for the board system.

use std::str::FromStr;

/// Storage keys for different data collections.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Key for storing order records
	Orders,
	/// Key for the ordered list of order ids
	OrderIndex,
	/// Key for storing notification records
	Notifications,
	/// Key for the ordered list of notification ids
	NotificationIndex,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Orders => "orders",
			StorageKey::OrderIndex => "order_index",
			StorageKey::Notifications => "notifications",
			StorageKey::NotificationIndex => "notification_index",
		}
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"orders" => Ok(Self::Orders),
			"order_index" => Ok(Self::OrderIndex),
			"notifications" => Ok(Self::Notifications),
			"notification_index" => Ok(Self::NotificationIndex),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}
