//! Warehouse stock kinds: electronics and groceries.
//!
//! Both kinds share the `Stocked` capability but are kept in separate
//! repositories; a repository never mixes entity kinds.

use crate::model::entity::{check_quantity, ConstraintViolation, Entity, EntityId, Stocked};
use crate::store::record::{FieldError, FieldMap, FieldReader, FieldWriter, Record};
use chrono::NaiveDate;

/// Electronic stock line with brand and warranty length.
///
/// Persisted fields: `id`, `name`, `quantity`, `brand`, `warranty_months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectronicItem {
    id: EntityId,
    name: String,
    quantity: i64,
    brand: String,
    warranty_months: i64,
}

impl ElectronicItem {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: i64,
        brand: impl Into<String>,
        warranty_months: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            brand: brand.into(),
            warranty_months,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn warranty_months(&self) -> i64 {
        self.warranty_months
    }
}

impl Entity for ElectronicItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ConstraintViolation> {
        check_quantity(self.quantity)?;
        if self.warranty_months < 0 {
            return Err(ConstraintViolation::new(
                "warranty_months",
                self.warranty_months,
                "a non-negative month count",
            ));
        }
        Ok(())
    }
}

impl Stocked for ElectronicItem {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl Record for ElectronicItem {
    const KIND: &'static str = "electronic_item";

    fn to_fields(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .string("name", &self.name)
            .int("quantity", self.quantity)
            .string("brand", &self.brand)
            .int("warranty_months", self.warranty_months)
            .finish()
    }

    fn from_fields(fields: &FieldReader<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: fields.int("id")?,
            name: fields.string("name")?,
            quantity: fields.int("quantity")?,
            brand: fields.string("brand")?,
            warranty_months: fields.int("warranty_months")?,
        })
    }
}

/// Perishable stock line with an expiry date.
///
/// Persisted fields: `id`, `name`, `quantity`, `expiry_date` (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryItem {
    id: EntityId,
    name: String,
    quantity: i64,
    expiry_date: NaiveDate,
}

impl GroceryItem {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: i64,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            expiry_date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Returns whether the item is past its expiry date on `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

impl Entity for GroceryItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ConstraintViolation> {
        check_quantity(self.quantity)
    }
}

impl Stocked for GroceryItem {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl Record for GroceryItem {
    const KIND: &'static str = "grocery_item";

    fn to_fields(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .string("name", &self.name)
            .int("quantity", self.quantity)
            .date("expiry_date", &self.expiry_date)
            .finish()
    }

    fn from_fields(fields: &FieldReader<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: fields.int("id")?,
            name: fields.string("name")?,
            quantity: fields.int("quantity")?,
            expiry_date: fields.date("expiry_date")?,
        })
    }
}
