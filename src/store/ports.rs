use crate::domain::{
    NewOrder, Order, OrderId, Product, ProductCreate, ProductId, ProductUpdate, UserId,
};
use crate::error::{PlacementError, ProductError};

/// Product rows as seen from inside a unit of work.
///
/// Writes are visible to later reads in the same unit of work and to nobody
/// else until it commits.
pub trait ProductCatalog {
    fn product(&self, id: ProductId) -> Option<&Product>;

    /// Current stock level, including writes staged in this unit of work.
    fn check_stock(&self, id: ProductId) -> Result<u32, ProductError>;

    /// Removes `amount` units. Refuses to go below zero regardless of what
    /// the caller checked beforehand.
    fn reduce_stock(&mut self, id: ProductId, amount: u32) -> Result<&Product, ProductError>;

    fn restock(&mut self, id: ProductId, amount: u32) -> Result<&Product, ProductError>;

    fn insert_product(&mut self, params: ProductCreate) -> Result<&Product, ProductError>;

    fn update_product(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<&Product, ProductError>;
}

/// Order rows as seen from inside a unit of work.
///
/// Listings are most recent first, ties broken by descending id.
pub trait OrderStore {
    /// Stores the order with its line items and assigns its id.
    fn insert_order(&mut self, order: NewOrder) -> Result<Order, PlacementError>;

    fn order(&self, id: OrderId) -> Option<&Order>;

    fn orders_by_user(&self, user_id: &UserId) -> Vec<Order>;

    fn all_orders(&self) -> Vec<Order>;

    /// Removes the order and its line items. Returns whether anything was removed.
    fn delete_order(&mut self, id: OrderId) -> bool;
}
