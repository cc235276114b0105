//! In-memory storage backend for the board service.
//!
//! This is the only shipped backend: the board runs against mocked
//! persistence, and the memory backend optionally sleeps before each
//! operation to simulate the latency of the real service it stands in
//! for.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory storage implementation.
///
/// Data lives in a HashMap behind a read-write lock, providing fast
/// access but no persistence across restarts. An optional per-operation
/// latency simulates a remote backend.
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
	/// Artificial delay applied before every operation.
	latency: Option<Duration>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance with no simulated latency.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
			latency: None,
		}
	}

	/// Creates a MemoryStorage that sleeps for `latency` before each
	/// operation.
	pub fn with_latency(latency: Duration) -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
			latency: Some(latency),
		}
	}

	async fn simulate_latency(&self) {
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		self.simulate_latency().await;
		let store = self.store.read().await;
		store.get(key).cloned().ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		self.simulate_latency().await;
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		self.simulate_latency().await;
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		self.simulate_latency().await;
		let store = self.store.read().await;
		Ok(store.contains_key(key))
	}
}

/// Maximum configurable simulated latency.
const MAX_LATENCY_MS: u64 = 10_000;

/// Factory function to create a memory storage backend from configuration.
///
/// Configuration parameters:
/// - `latency-ms` (optional): simulated delay before each operation.
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	let latency_ms = match config.get("latency-ms") {
		None => None,
		Some(value) => {
			let ms = value.as_integer().ok_or_else(|| {
				StorageError::Configuration("latency-ms must be an integer".into())
			})?;
			if ms < 0 || ms as u64 > MAX_LATENCY_MS {
				return Err(StorageError::Configuration(format!(
					"latency-ms must be between 0 and {}",
					MAX_LATENCY_MS
				)));
			}
			Some(ms as u64)
		}
	};

	let storage = match latency_ms {
		Some(ms) if ms > 0 => {
			tracing::debug!("Memory storage simulating {}ms latency", ms);
			MemoryStorage::with_latency(Duration::from_millis(ms))
		}
		_ => MemoryStorage::new(),
	};
	Ok(Box::new(storage))
}
