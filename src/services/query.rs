use tracing::{debug, info, instrument};

use crate::actor_framework::FrameworkError;
use crate::domain::{Order, OrderId, OrderView, UserId};
use crate::store::{OrderStore, ProductCatalog, StoreClient, UnitOfWork};

/// Read side of orders, plus the administrative delete.
///
/// Line item images come from the catalog at query time; prices and totals
/// are the ones stored with the order.
#[derive(Clone)]
pub struct OrderQueryService {
    store: StoreClient,
}

fn to_view(tx: &UnitOfWork<'_>, order: Order) -> OrderView {
    OrderView::from_order(order, |id| tx.product(id).and_then(|product| product.image.clone()))
}

impl OrderQueryService {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Option<OrderView>, FrameworkError> {
        debug!("Processing get_order request");
        self.store
            .transaction(move |tx| Ok(tx.order(id).cloned().map(|order| to_view(tx, order))))
            .await
    }

    /// Orders of one user, most recent first. A blank id owns no orders.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: &str) -> Result<Vec<OrderView>, FrameworkError> {
        let Some(user_id) = UserId::parse(user_id) else {
            return Ok(Vec::new());
        };
        self.store
            .transaction(move |tx| {
                let orders = tx.orders_by_user(&user_id);
                Ok(orders.into_iter().map(|order| to_view(tx, order)).collect())
            })
            .await
    }

    /// Every order in the store, most recent first.
    #[instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<OrderView>, FrameworkError> {
        self.store
            .transaction(|tx| {
                let orders = tx.all_orders();
                Ok(orders.into_iter().map(|order| to_view(tx, order)).collect())
            })
            .await
    }

    /// Deletes the order and its line items. Deleting an unknown order succeeds
    /// without doing anything.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), FrameworkError> {
        let removed = self
            .store
            .transaction(move |tx| Ok::<_, FrameworkError>(tx.delete_order(id)))
            .await?;
        if removed {
            info!("Order deleted");
        } else {
            debug!("Order not found, nothing to delete");
        }
        Ok(())
    }
}
