//! Snapshot store bound to one entity kind and one file.

use super::file::{load_from_store, save_to_store};
use super::record::Record;
use super::{StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::repo::entity_repo::{InMemoryRepository, Repository};
use std::marker::PhantomData;
use std::path::Path;

/// Saves and reloads repositories of `E` at a configured path.
///
/// A reloaded repository is always a new instance rebuilt from the file;
/// nothing but values carries over.
#[derive(Debug, Clone)]
pub struct SnapshotStore<E> {
    config: StoreConfig,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Record> SnapshotStore<E> {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            _kind: PhantomData,
        }
    }

    /// Store at `path` with default formatting.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns whether a snapshot file is present.
    pub fn exists(&self) -> bool {
        self.config.path.is_file()
    }

    /// Saves the full content of `repo`; returns the number of records written.
    pub fn save<R>(&self, repo: &R) -> StoreResult<usize>
    where
        R: Repository<E>,
    {
        let entities = repo.get_all();
        self.save_entities(&entities)?;
        Ok(entities.len())
    }

    pub fn save_entities(&self, entities: &[E]) -> StoreResult<()> {
        save_to_store(&self.config.path, entities, self.config.codec_options())
    }

    /// Loads the snapshot as a plain list; empty when no file exists.
    pub fn load(&self) -> StoreResult<Vec<E>> {
        load_from_store(&self.config.path)
    }

    /// Loads the snapshot into a new repository.
    ///
    /// # Errors
    /// - Anything `load` returns.
    /// - `MalformedData` when the snapshot repeats an id.
    pub fn load_repository(&self) -> StoreResult<InMemoryRepository<E>> {
        let entities = self.load()?;
        InMemoryRepository::from_entities(entities).map_err(|err| {
            StoreError::MalformedData(format!(
                "snapshot `{}` cannot be loaded: {err}",
                self.config.path.display()
            ))
        })
    }
}
