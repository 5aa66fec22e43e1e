//! Core domain logic for Stockroom.
//! This crate is the single source of truth for repository invariants and
//! the snapshot format.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod store;

pub use config::{ConfigError, LoggingConfig, StockroomConfig, StoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::entity::{ConstraintViolation, Entity, EntityId, Stocked};
pub use model::inventory::InventoryItem;
pub use model::warehouse::{ElectronicItem, GroceryItem};
pub use repo::entity_repo::{
    FieldUpdate, InMemoryRepository, RepoError, RepoResult, Repository, SetQuantity,
};
pub use service::inventory_service::{report_and_continue, InventoryService};
pub use session::{run_round_trip, sample_inventory, SessionError, SessionReport};
pub use store::{
    decode, encode, load_from_store, save_to_store, CodecOptions, Record, SnapshotStore,
    StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
