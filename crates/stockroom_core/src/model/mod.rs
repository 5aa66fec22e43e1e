//! Entity contract and the entity kinds shipped with the core.
//!
//! # Responsibility
//! - Define the minimal capability every stored record must expose.
//! - Provide the inventory record kinds used by services and sessions.
//!
//! # Invariants
//! - Every entity is identified by a caller-assigned `EntityId`.
//! - Identity never changes after construction.

pub mod entity;
pub mod inventory;
pub mod warehouse;
