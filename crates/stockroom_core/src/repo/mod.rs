//! Repository layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the keyed storage contract used by services and sessions.
//! - Keep uniqueness and existence checks in one place.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`DuplicateKey`, `NotFound`,
//!   `InvalidValue`) and never log or print.

pub mod entity_repo;
