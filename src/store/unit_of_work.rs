use std::collections::{BTreeSet, HashMap};

use super::database::Database;
use super::ports::{OrderStore, ProductCatalog};
use crate::actor_framework::{Actionable, Entity};
use crate::domain::{
    NewOrder, Order, OrderId, Product, ProductCreate, ProductId, ProductUpdate, UserId,
};
use crate::error::{PlacementError, ProductError};
use crate::product::{ProductAction, ProductActionResult};

/// Staged reads and writes against a [`Database`].
///
/// Reads fall through to committed state unless the row was written in this
/// unit of work. Nothing reaches the database until [`Database::transaction`]
/// applies the resulting [`ChangeSet`].
pub struct UnitOfWork<'db> {
    db: &'db Database,
    products: HashMap<ProductId, Product>,
    products_created: u32,
    inserted: Vec<Order>,
    orders_created: u32,
    deleted: BTreeSet<OrderId>,
}

/// Everything a committed unit of work writes.
#[derive(Debug, Default)]
pub struct ChangeSet {
    pub products: Vec<Product>,
    pub products_created: u32,
    pub inserted: Vec<Order>,
    pub orders_created: u32,
    pub deleted: Vec<OrderId>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.products_created == 0
            && self.orders_created == 0
            && self.deleted.is_empty()
    }
}

impl<'db> UnitOfWork<'db> {
    pub fn begin(db: &'db Database) -> Self {
        Self {
            db,
            products: HashMap::new(),
            products_created: 0,
            inserted: Vec::new(),
            orders_created: 0,
            deleted: BTreeSet::new(),
        }
    }

    pub fn into_changes(self) -> ChangeSet {
        ChangeSet {
            products: self.products.into_values().collect(),
            products_created: self.products_created,
            inserted: self.inserted,
            orders_created: self.orders_created,
            deleted: self.deleted.into_iter().collect(),
        }
    }

    fn stage(&mut self, product: Product) -> &Product {
        let id = product.id;
        self.products.insert(id, product);
        &self.products[&id]
    }

    fn apply_action(
        &mut self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<&Product, ProductError> {
        let mut product = self.product(id).cloned().ok_or(ProductError::NotFound(id))?;
        product.handle_action(action)?;
        Ok(self.stage(product))
    }

    fn visible_orders(&self) -> Vec<&Order> {
        self.db
            .orders()
            .values()
            .filter(|order| !self.deleted.contains(&order.id))
            .chain(self.inserted.iter())
            .collect()
    }
}

fn most_recent_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    orders
}

impl ProductCatalog for UnitOfWork<'_> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id).or_else(|| self.db.products().get(&id))
    }

    fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        let mut product = self.product(id).cloned().ok_or(ProductError::NotFound(id))?;
        product
            .handle_action(ProductAction::CheckStock)
            .map(ProductActionResult::stock)
    }

    fn reduce_stock(&mut self, id: ProductId, amount: u32) -> Result<&Product, ProductError> {
        self.apply_action(id, ProductAction::ReduceStock(amount))
    }

    fn restock(&mut self, id: ProductId, amount: u32) -> Result<&Product, ProductError> {
        self.apply_action(id, ProductAction::Restock(amount))
    }

    fn insert_product(&mut self, params: ProductCreate) -> Result<&Product, ProductError> {
        let id = self.db.products().peek_id(self.products_created);
        let product = Product::from_create_params(id, params)?;
        self.products_created += 1;
        Ok(self.stage(product))
    }

    fn update_product(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<&Product, ProductError> {
        let mut product = self.product(id).cloned().ok_or(ProductError::NotFound(id))?;
        product.on_update(update)?;
        Ok(self.stage(product))
    }
}

impl OrderStore for UnitOfWork<'_> {
    fn insert_order(&mut self, order: NewOrder) -> Result<Order, PlacementError> {
        let id = self.db.orders().peek_id(self.orders_created);
        let order = Order::from_create_params(id, order)?;
        self.orders_created += 1;
        self.inserted.push(order.clone());
        Ok(order)
    }

    fn order(&self, id: OrderId) -> Option<&Order> {
        self.visible_orders().into_iter().find(|order| order.id == id)
    }

    fn orders_by_user(&self, user_id: &UserId) -> Vec<Order> {
        most_recent_first(
            self.visible_orders()
                .into_iter()
                .filter(|order| &order.user_id == user_id)
                .cloned()
                .collect(),
        )
    }

    fn all_orders(&self) -> Vec<Order> {
        most_recent_first(self.visible_orders().into_iter().cloned().collect())
    }

    fn delete_order(&mut self, id: OrderId) -> bool {
        if let Some(pos) = self.inserted.iter().position(|order| order.id == id) {
            self.inserted.remove(pos);
            return true;
        }
        if self.deleted.contains(&id) || self.db.orders().get(&id).is_none() {
            return false;
        }
        self.deleted.insert(id);
        true
    }
}
