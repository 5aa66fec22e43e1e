//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the error-reporting policy for batch callers.

pub mod inventory_service;
