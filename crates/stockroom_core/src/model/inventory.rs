//! Office inventory record.
//!
//! # Invariants
//! - `name` and `date_added` are fixed at construction.
//! - `quantity` only changes through repository updates and stays >= 0.

use crate::model::entity::{check_quantity, ConstraintViolation, Entity, EntityId, Stocked};
use crate::store::record::{FieldError, FieldMap, FieldReader, FieldWriter, Record};
use chrono::{DateTime, Utc};

/// Stock-keeping record with the date it entered the inventory.
///
/// Persisted fields: `id`, `name`, `quantity`, `date_added` (RFC 3339, UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: EntityId,
    name: String,
    quantity: i64,
    date_added: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: i64,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            date_added,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }
}

impl Entity for InventoryItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ConstraintViolation> {
        check_quantity(self.quantity)
    }
}

impl Stocked for InventoryItem {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl Record for InventoryItem {
    const KIND: &'static str = "inventory_item";

    fn to_fields(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .string("name", &self.name)
            .int("quantity", self.quantity)
            .timestamp("date_added", &self.date_added)
            .finish()
    }

    fn from_fields(fields: &FieldReader<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: fields.int("id")?,
            name: fields.string("name")?,
            quantity: fields.int("quantity")?,
            date_added: fields.timestamp("date_added")?,
        })
    }
}
