use tracing::debug;

use super::unit_of_work::{ChangeSet, UnitOfWork};
use crate::actor_framework::Table;
use crate::domain::{Order, Product};

/// All persisted state: products and orders (with their line items).
///
/// Owned by the store actor. Jobs reach it one at a time, which makes each
/// unit of work serializable against every other.
#[derive(Debug, Clone, Default)]
pub struct Database {
    products: Table<Product>,
    orders: Table<Order>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &Table<Product> {
        &self.products
    }

    pub fn orders(&self) -> &Table<Order> {
        &self.orders
    }

    /// Runs `work` in a unit of work and commits it right away.
    ///
    /// `Ok` commits every staged write; `Err` discards them.
    pub fn transaction<R, E, F>(&mut self, work: F) -> Result<R, E>
    where
        F: FnOnce(&mut UnitOfWork<'_>) -> Result<R, E>,
    {
        let (value, changes) = self.stage(work)?;
        self.commit(changes);
        Ok(value)
    }

    /// Runs `work` against a read-only view and returns what it would write.
    ///
    /// The database itself is untouched until the [`ChangeSet`] goes through
    /// [`Database::commit`].
    pub fn stage<R, E, F>(&self, work: F) -> Result<(R, ChangeSet), E>
    where
        F: FnOnce(&mut UnitOfWork<'_>) -> Result<R, E>,
    {
        let mut tx = UnitOfWork::begin(self);
        match work(&mut tx) {
            Ok(value) => Ok((value, tx.into_changes())),
            Err(e) => {
                debug!("Unit of work failed, rolling back");
                Err(e)
            }
        }
    }

    pub fn commit(&mut self, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }
        debug!(
            products = changes.products.len(),
            orders_inserted = changes.inserted.len(),
            orders_deleted = changes.deleted.len(),
            "Committing unit of work"
        );

        self.products.consume_ids(changes.products_created);
        for product in changes.products {
            self.products.put(product);
        }

        self.orders.consume_ids(changes.orders_created);
        for order in changes.inserted {
            self.orders.put(order);
        }
        for id in changes.deleted {
            self.orders.remove(&id);
        }
    }
}
