use rust_decimal::Decimal;
use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::ProductId;

/// Errors raised by catalog operations, inside or outside a placement.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),
    #[error("Store error: {0}")]
    Store(#[from] FrameworkError),
}

/// Outcome of a rejected order placement.
///
/// Every variant means nothing was committed: no order exists and no stock
/// moved.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlacementError {
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("Invalid order request: {0}")]
    InvalidRequest(String),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },
    #[error("Order total overflows at {0}")]
    PriceOverflow(ProductId),
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] FrameworkError),
}

impl PlacementError {
    /// Only store faults are worth retrying; the rest need a different request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PlacementError::PersistenceFailure(_))
    }
}

impl From<ProductError> for PlacementError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => PlacementError::ProductNotFound(id),
            ProductError::InsufficientStock {
                product_id,
                available,
                requested,
            } => PlacementError::InsufficientStock {
                product_id,
                available,
                requested,
            },
            ProductError::InvalidQuantity(quantity) => {
                PlacementError::InvalidRequest(format!(
                    "quantity must be positive, got {}",
                    quantity
                ))
            }
            ProductError::InvalidPrice(price) => {
                PlacementError::InvalidRequest(format!("invalid price {}", price))
            }
            ProductError::Store(e) => PlacementError::PersistenceFailure(e),
        }
    }
}
