//! Core engine for the service-order board.
//!
//! This crate owns the authoritative order store, the status-grouping
//! model that partitions orders into kanban columns, and the board
//! controller implementing the drag-interaction state machine and the
//! move-commit protocol. Services communicate through a broadcast
//! event bus; the notification relay is the main downstream consumer.

/// Board controller: drag state machine and move-commit protocol.
pub mod board;
/// Event bus for inter-service communication.
pub mod event_bus;
/// Status partition of the order list into kanban columns.
pub mod grouping;
/// Authoritative order store over the storage service.
pub mod store;

pub use board::{BoardController, BoardError, DragState, MoveOutcome};
pub use event_bus::EventBus;
pub use grouping::GroupedOrders;
pub use store::{OrderStore, OrderStoreError};
