//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide stock-level entry points (seed, increase, set, remove) over any
//!   repository of `Stocked` entities.
//! - Offer the batch-tolerant "report and continue" policy for callers that
//!   must not abort on a single entity failure.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::entity::{ConstraintViolation, EntityId, Stocked};
use crate::repo::entity_repo::{RepoResult, Repository};
use log::{info, warn};
use std::marker::PhantomData;

/// Use-case wrapper over a repository of stocked entities.
pub struct InventoryService<E, R> {
    repo: R,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> InventoryService<E, R>
where
    E: Stocked,
    R: Repository<E>,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Adds every item, reporting rejected ones and carrying on.
    ///
    /// Returns how many items were stored.
    pub fn seed<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        let mut added = 0;
        for item in items {
            if report_and_continue("seed", self.add_item(item)).is_some() {
                added += 1;
            }
        }
        info!("event=inventory_seed module=service status=ok added={added}");
        added
    }

    pub fn add_item(&mut self, item: E) -> RepoResult<()> {
        let id = item.id();
        self.repo.add(item)?;
        info!("event=inventory_add module=service status=ok id={id}");
        Ok(())
    }

    /// Adds `amount` to the current quantity of `id`; returns the new quantity.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `InvalidValue` when the result would be negative or overflow.
    pub fn increase_stock(&mut self, id: EntityId, amount: i64) -> RepoResult<i64> {
        let current = self.repo.get_by_id(id)?.quantity();
        let next = current.checked_add(amount).ok_or_else(|| {
            ConstraintViolation::new(
                "quantity",
                format!("{current} + {amount}"),
                "a quantity that fits in 64 bits",
            )
        })?;

        self.repo.update_quantity(id, next)?;
        info!("event=stock_increase module=service status=ok id={id} quantity={next}");
        Ok(next)
    }

    pub fn set_quantity(&mut self, id: EntityId, quantity: i64) -> RepoResult<()> {
        self.repo.update_quantity(id, quantity)
    }

    pub fn remove_item(&mut self, id: EntityId) -> RepoResult<E> {
        let removed = self.repo.remove(id)?;
        info!("event=inventory_remove module=service status=ok id={id}");
        Ok(removed)
    }

    pub fn get_item(&self, id: EntityId) -> RepoResult<&E> {
        self.repo.get_by_id(id)
    }

    pub fn items(&self) -> Vec<E> {
        self.repo.get_all()
    }

    /// Items whose quantity is at or below `threshold`, in insertion order.
    pub fn low_stock(&self, threshold: i64) -> Vec<E> {
        self.repo.filter(|item| item.quantity() <= threshold)
    }
}

/// Logs a failed repository call as a warning and turns it into `None`.
///
/// Every repository error kind is handled the same way, so batch callers can
/// keep going after duplicates, missing ids or invalid values.
pub fn report_and_continue<T>(operation: &str, result: RepoResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=repo_failure module=service status=error operation={} error_kind={} error={}",
                operation,
                err.kind(),
                err
            );
            None
        }
    }
}
