//! Common types module for the service-order board system.
//!
//! This module defines the core data types shared across the board
//! components: service orders and their status lifecycle, notifications,
//! board events, and storage key namespaces.

/// Event types for inter-service communication.
pub mod events;
/// Notification types surfaced to operators.
pub mod notification;
/// Service-order types including the status lifecycle and column metadata.
pub mod order;
/// Storage types for managing persisted collections.
pub mod storage;

// Re-export all types for convenient access
pub use events::*;
pub use notification::*;
pub use order::*;
pub use storage::*;
