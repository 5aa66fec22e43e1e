//! Save/reload session harness.
//!
//! # Responsibility
//! - Run seed -> save -> discard -> reload -> verify against a snapshot store.
//! - Provide the demo inventory seed set.
//!
//! # Invariants
//! - The seeded repository is dropped before the reload starts; the reloaded
//!   repository shares no state with it.
//! - Verification compares values entity-for-entity, in order.

use crate::model::entity::{Entity, EntityId};
use crate::model::inventory::InventoryItem;
use crate::repo::entity_repo::{InMemoryRepository, RepoError, Repository};
use crate::store::{Record, SnapshotStore, StoreError};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// Session failure: a repository or store error, or a verification mismatch.
#[derive(Debug)]
pub enum SessionError {
    Repo(RepoError),
    Store(StoreError),
    CountMismatch { expected: usize, actual: usize },
    EntityMismatch { index: usize, id: EntityId },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::CountMismatch { expected, actual } => write!(
                f,
                "reloaded {actual} entities but {expected} were saved"
            ),
            Self::EntityMismatch { index, id } => write!(
                f,
                "reloaded entity {index} (id {id}) differs from the saved one"
            ),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::CountMismatch { .. } | Self::EntityMismatch { .. } => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a verified round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport<E> {
    pub path: PathBuf,
    pub saved: usize,
    /// Reloaded entities in snapshot order.
    pub reloaded: Vec<E>,
}

/// Seeds a fresh repository, saves it, drops it, reloads, and verifies.
pub fn run_round_trip<E>(
    store: &SnapshotStore<E>,
    seed: Vec<E>,
) -> Result<SessionReport<E>, SessionError>
where
    E: Record + PartialEq,
{
    let started_at = Instant::now();
    info!(
        "event=session_round_trip module=session status=start kind={} path={} seed={}",
        E::KIND,
        store.path().display(),
        seed.len()
    );

    let saved = {
        let mut repo: InMemoryRepository<E> = InMemoryRepository::new();
        for entity in seed.iter().cloned() {
            repo.add(entity)?;
        }
        store.save(&repo)?
    };

    let reloaded = store.load_repository()?.get_all();
    verify(&seed, &reloaded)?;

    info!(
        "event=session_round_trip module=session status=ok kind={} path={} records={} duration_ms={}",
        E::KIND,
        store.path().display(),
        reloaded.len(),
        started_at.elapsed().as_millis()
    );

    Ok(SessionReport {
        path: store.path().to_path_buf(),
        saved,
        reloaded,
    })
}

fn verify<E>(expected: &[E], actual: &[E]) -> Result<(), SessionError>
where
    E: Entity + PartialEq,
{
    if expected.len() != actual.len() {
        return Err(SessionError::CountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match expected
        .iter()
        .zip(actual)
        .position(|(left, right)| left != right)
    {
        Some(index) => Err(SessionError::EntityMismatch {
            index,
            id: expected[index].id(),
        }),
        None => Ok(()),
    }
}

/// Demo office inventory, all added at `added_at`.
pub fn sample_inventory(added_at: DateTime<Utc>) -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(1, "Stapler", 12, added_at),
        InventoryItem::new(2, "Printer Paper (A4)", 500, added_at),
        InventoryItem::new(3, "Ink Cartridge", 36, added_at),
        InventoryItem::new(4, "Whiteboard Markers", 20, added_at),
        InventoryItem::new(5, "Folders", 60, added_at),
    ]
}
