//! Generic keyed repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide add/get/list/find/remove/update APIs over any `Entity` kind.
//! - Keep insertion order stable for deterministic enumeration.
//!
//! # Invariants
//! - At most one entity per id at any time.
//! - Every entity retrievable by id was added and not since removed.
//! - Failed operations leave the repository exactly as it was.
//! - Removal never reorders survivors; a re-added id goes to the end.
//! - The repository raises errors but never logs them.

use crate::model::entity::{check_quantity, ConstraintViolation, Entity, EntityId, Stocked};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// `add` with an id that is already present.
    DuplicateKey(EntityId),
    /// Lookup, removal or update of an absent id.
    NotFound(EntityId),
    /// A supplied value breaks a domain constraint.
    InvalidValue(ConstraintViolation),
}

impl RepoError {
    /// Stable snake_case tag for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => "duplicate_key",
            Self::NotFound(_) => "not_found",
            Self::InvalidValue(_) => "invalid_value",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(id) => write!(f, "entity with id {id} already exists"),
            Self::NotFound(id) => write!(f, "entity with id {id} was not found"),
            Self::InvalidValue(violation) => write!(f, "{violation}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue(violation) => Some(violation),
            Self::DuplicateKey(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ConstraintViolation> for RepoError {
    fn from(value: ConstraintViolation) -> Self {
        Self::InvalidValue(value)
    }
}

/// A single-field change applied through `Repository::update_field`.
///
/// `check` validates the new value on its own, before any lookup happens;
/// `apply` writes it and must not touch the id or other fields. An update
/// that renumbers the entity is rejected as `InvalidValue` on field `id`.
pub trait FieldUpdate<E> {
    fn check(&self) -> Result<(), ConstraintViolation>;
    fn apply(self, entity: &mut E);
}

/// Replaces the stock quantity of a `Stocked` entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetQuantity(pub i64);

impl<E: Stocked> FieldUpdate<E> for SetQuantity {
    fn check(&self) -> Result<(), ConstraintViolation> {
        check_quantity(self.0)
    }

    fn apply(self, entity: &mut E) {
        entity.set_quantity(self.0);
    }
}

/// Repository interface for keyed entity storage.
pub trait Repository<E: Entity> {
    /// Inserts `entity` at the end of iteration order.
    ///
    /// Runs `Entity::validate` first, then rejects ids already present.
    fn add(&mut self, entity: E) -> RepoResult<()>;

    fn get_by_id(&self, id: EntityId) -> RepoResult<&E>;

    /// Returns an owned copy of every entity in insertion order.
    fn get_all(&self) -> Vec<E>;

    /// Returns the first entity, in insertion order, matching `predicate`.
    fn find_first<P>(&self, predicate: P) -> Option<&E>
    where
        P: FnMut(&E) -> bool;

    /// Returns owned copies of every entity matching `predicate`.
    fn filter<P>(&self, predicate: P) -> Vec<E>
    where
        P: FnMut(&E) -> bool;

    /// Removes and returns the entity stored under `id`.
    fn remove(&mut self, id: EntityId) -> RepoResult<E>;

    /// Applies `update` to the entity stored under `id`.
    ///
    /// The update's own constraint check runs before the lookup, so an invalid
    /// value is reported as `InvalidValue` even when `id` is absent.
    fn update_field<U>(&mut self, id: EntityId, update: U) -> RepoResult<()>
    where
        U: FieldUpdate<E>;

    fn update_quantity(&mut self, id: EntityId, quantity: i64) -> RepoResult<()>
    where
        E: Stocked,
    {
        self.update_field(id, SetQuantity(quantity))
    }

    fn contains(&self, id: EntityId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory repository keeping entities in insertion order.
///
/// Entities live in a map keyed by a monotonically increasing insertion
/// sequence; a second index maps ids to their sequence. Sequences are never
/// reused, so a removed and re-added id lands at the end.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<E> {
    entries: BTreeMap<u64, E>,
    positions: HashMap<EntityId, u64>,
    next_sequence: u64,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            positions: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Builds a repository by adding `entities` in order.
    ///
    /// Stops at the first rejected entity and returns its error.
    pub fn from_entities<I>(entities: I) -> RepoResult<Self>
    where
        I: IntoIterator<Item = E>,
    {
        let mut repo = Self::new();
        for entity in entities {
            repo.add(entity)?;
        }
        Ok(repo)
    }

    /// Replaces the whole content with `entities`.
    ///
    /// The new content is built off to the side; on failure the current
    /// content is left untouched.
    pub fn replace_all<I>(&mut self, entities: I) -> RepoResult<()>
    where
        I: IntoIterator<Item = E>,
    {
        *self = Self::from_entities(entities)?;
        Ok(())
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.values().map(Entity::id).collect()
    }

    /// Borrowing iterator in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn add(&mut self, entity: E) -> RepoResult<()> {
        entity.validate()?;

        let id = entity.id();
        if self.positions.contains_key(&id) {
            return Err(RepoError::DuplicateKey(id));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.positions.insert(id, sequence);
        self.entries.insert(sequence, entity);
        Ok(())
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<&E> {
        self.positions
            .get(&id)
            .and_then(|sequence| self.entries.get(sequence))
            .ok_or(RepoError::NotFound(id))
    }

    fn get_all(&self) -> Vec<E> {
        self.entries.values().cloned().collect()
    }

    fn find_first<P>(&self, mut predicate: P) -> Option<&E>
    where
        P: FnMut(&E) -> bool,
    {
        self.entries.values().find(|&entity| predicate(entity))
    }

    fn filter<P>(&self, mut predicate: P) -> Vec<E>
    where
        P: FnMut(&E) -> bool,
    {
        self.entries
            .values()
            .filter(|&entity| predicate(entity))
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: EntityId) -> RepoResult<E> {
        let sequence = self.positions.remove(&id).ok_or(RepoError::NotFound(id))?;
        self.entries
            .remove(&sequence)
            .ok_or(RepoError::NotFound(id))
    }

    fn update_field<U>(&mut self, id: EntityId, update: U) -> RepoResult<()>
    where
        U: FieldUpdate<E>,
    {
        update.check()?;

        let sequence = self.positions.get(&id).ok_or(RepoError::NotFound(id))?;
        let entity = self
            .entries
            .get_mut(sequence)
            .ok_or(RepoError::NotFound(id))?;

        // Staged on a copy so a renumbering update leaves the index intact.
        let mut staged = entity.clone();
        update.apply(&mut staged);
        if staged.id() != id {
            return Err(RepoError::InvalidValue(ConstraintViolation::new(
                "id",
                staged.id(),
                "the id to stay unchanged by an update",
            )));
        }
        *entity = staged;
        Ok(())
    }

    fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
