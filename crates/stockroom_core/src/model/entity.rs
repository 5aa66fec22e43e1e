//! Entity contract shared by every repository.
//!
//! # Responsibility
//! - Define the `Entity` capability (`id()` plus optional self-validation).
//! - Define the `Stocked` capability for quantity-bearing records.
//! - Describe domain constraint failures with `ConstraintViolation`.
//!
//! # Invariants
//! - `Entity::id` is stable for the lifetime of the value.
//! - Quantities are never negative once stored.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned identifier shared by all entity kinds.
pub type EntityId = i64;

/// A field value that breaks a domain-level constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Name of the offending field, as persisted.
    pub field: &'static str,
    /// Offending value rendered for messages.
    pub value: String,
    /// What the field accepts, e.g. `a non-negative quantity`.
    pub expected: &'static str,
}

impl ConstraintViolation {
    pub fn new(field: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value `{}` for field `{}`: expected {}",
            self.value, self.field, self.expected
        )
    }
}

impl Error for ConstraintViolation {}

/// Minimal capability required from anything stored in a repository.
///
/// Repositories only depend on the key and, optionally, on the entity's own
/// constraint check. Everything else is up to the entity author.
pub trait Entity: Clone {
    /// Stable key used for uniqueness and lookup.
    fn id(&self) -> EntityId;

    /// Checks domain constraints carried by this value.
    ///
    /// Runs before the entity enters a repository and after it is decoded
    /// from a snapshot.
    fn validate(&self) -> Result<(), ConstraintViolation> {
        Ok(())
    }
}

/// Entities that carry a mutable, non-negative stock quantity.
///
/// `set_quantity` is the write half used by repository updates; callers go
/// through `Repository::update_quantity` so the constraint is checked once.
pub trait Stocked: Entity {
    fn quantity(&self) -> i64;
    fn set_quantity(&mut self, quantity: i64);
}

/// Rejects negative quantities.
pub fn check_quantity(quantity: i64) -> Result<(), ConstraintViolation> {
    if quantity < 0 {
        return Err(ConstraintViolation::new(
            "quantity",
            quantity,
            "a non-negative quantity",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_quantity, ConstraintViolation};

    #[test]
    fn check_quantity_accepts_zero_and_rejects_negative() {
        assert!(check_quantity(0).is_ok());
        let err = check_quantity(-1).unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(err.value, "-1");
    }

    #[test]
    fn violation_message_names_field_and_value() {
        let err = ConstraintViolation::new("warranty_months", -3, "a non-negative month count");
        assert_eq!(
            err.to_string(),
            "invalid value `-3` for field `warranty_months`: expected a non-negative month count"
        );
    }
}
