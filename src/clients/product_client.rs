use tracing::{debug, info, instrument};

use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::error::ProductError;
use crate::store::{ProductCatalog, StoreClient};

/// Catalog administration outside order placement: adding products,
/// editing them, and the restock path.
///
/// Every call is its own unit of work.
#[derive(Clone)]
pub struct ProductClient {
    store: StoreClient,
}

impl ProductClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        let id = self
            .store
            .transaction(move |tx| tx.insert_product(product).map(|p| p.id))
            .await?;
        info!(product_id = %id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.store
            .transaction(move |tx| Ok(tx.product(id).cloned()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        self.store
            .transaction(move |tx| tx.check_stock(id))
            .await
    }

    /// Adds stock. Returns the new level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, amount: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        let stock = self
            .store
            .transaction(move |tx| tx.restock(id, amount).map(|p| p.stock))
            .await?;
        info!(stock, "Product restocked");
        Ok(stock)
    }

    /// Removes stock outside an order. The same non-negative check applies.
    #[instrument(skip(self))]
    pub async fn reduce_stock(&self, id: ProductId, amount: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        self.store
            .transaction(move |tx| tx.reduce_stock(id, amount).map(|p| p.stock))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.store
            .transaction(move |tx| tx.update_product(id, update).cloned())
            .await
    }
}
