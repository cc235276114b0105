//! Configuration module for the service-order board system.
//!
//! Provides structures and utilities for loading board configuration
//! from TOML files, with defaults for every field and validation to
//! ensure the configured storage backend exists.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Storage backends the board knows how to construct.
const KNOWN_BACKENDS: [&str; 1] = ["memory"];

/// Main configuration structure for the board service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
	/// Configuration specific to this board instance.
	pub board: BoardConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for data seeding.
	pub seed: SeedConfig,
}

/// Configuration specific to this board instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
	/// Identifier for this board instance, used in log output.
	pub id: String,
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self { id: "dev".into() }
	}
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
	/// Which backend implementation to use.
	pub backend: String,
	/// Per-backend configuration sections, keyed by backend name and
	/// passed through as raw TOML values to the backend factory.
	#[serde(flatten)]
	pub backends: HashMap<String, toml::Value>,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			backend: "memory".into(),
			backends: HashMap::new(),
		}
	}
}

impl StorageConfig {
	/// Returns the configuration section for the selected backend, or
	/// an empty table when none was provided.
	pub fn backend_config(&self) -> toml::Value {
		self.backends
			.get(&self.backend)
			.cloned()
			.unwrap_or_else(|| toml::Value::Table(Default::default()))
	}
}

/// Configuration for data seeding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
	/// Whether to load the built-in sample data set at startup.
	#[serde(rename = "sample-data")]
	pub sample_data: bool,
}

impl Default for SeedConfig {
	fn default() -> Self {
		Self { sample_data: true }
	}
}

impl Config {
	/// Loads configuration from a TOML file and validates it.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml(&contents)
	}

	/// Parses configuration from a TOML string and validates it.
	pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.board.id.is_empty() {
			return Err(ConfigError::Validation("board.id must not be empty".into()));
		}
		if !KNOWN_BACKENDS.contains(&self.storage.backend.as_str()) {
			return Err(ConfigError::Validation(format!(
				"unknown storage backend '{}' (known: {})",
				self.storage.backend,
				KNOWN_BACKENDS.join(", ")
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn defaults_when_empty() {
		let config = Config::from_toml("").unwrap();
		assert_eq!(config.board.id, "dev");
		assert_eq!(config.storage.backend, "memory");
		assert!(config.seed.sample_data);
	}

	#[test]
	fn parses_full_config() {
		let config = Config::from_toml(
			r#"
			[board]
			id = "ops-board"

			[storage]
			backend = "memory"

			[storage.memory]
			latency-ms = 150

			[seed]
			sample-data = false
			"#,
		)
		.unwrap();

		assert_eq!(config.board.id, "ops-board");
		assert!(!config.seed.sample_data);
		let backend = config.storage.backend_config();
		assert_eq!(
			backend.get("latency-ms").and_then(|v| v.as_integer()),
			Some(150)
		);
	}

	#[test]
	fn rejects_unknown_backend() {
		let result = Config::from_toml(
			r#"
			[storage]
			backend = "postgres"
			"#,
		);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn rejects_empty_board_id() {
		let result = Config::from_toml(
			r#"
			[board]
			id = ""
			"#,
		);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn rejects_malformed_toml() {
		let result = Config::from_toml("[board\nid = !");
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[board]\nid = \"from-file\"").unwrap();

		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.board.id, "from-file");
	}

	#[test]
	fn missing_backend_section_yields_empty_table() {
		let config = Config::from_toml("").unwrap();
		let backend = config.storage.backend_config();
		assert!(backend.as_table().is_some_and(|t| t.is_empty()));
	}
}
