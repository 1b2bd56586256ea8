use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::{Actionable, Entity};
use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::error::ProductError;

fn check_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() {
        Err(ProductError::InvalidPrice(price))
    } else {
        Ok(price)
    }
}

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Rejects a negative price.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            name: params.name,
            price: check_price(params.price)?,
            stock: params.stock,
            image: params.image,
        })
    }

    /// Updates name, price and/or image. Nothing is changed if the new price is invalid.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        if let Some(price) = update.price {
            self.price = check_price(price)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        Ok(())
    }
}

impl Actionable for Product {
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    /// Handles stock actions.
    ///
    /// # Errors
    /// `InvalidQuantity` for a zero amount, `InsufficientStock` when reducing
    /// by more than is available.
    fn handle_action(
        &mut self,
        action: ProductAction,
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReduceStock(0) | ProductAction::Restock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReduceStock(amount) => {
                if self.stock >= amount {
                    self.stock -= amount;
                    Ok(ProductActionResult::Reduced(self.stock))
                } else {
                    Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        available: self.stock,
                        requested: amount,
                    })
                }
            }
            ProductAction::Restock(amount) => {
                self.stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or(ProductError::InvalidQuantity(amount))?;
                Ok(ProductActionResult::Restocked(self.stock))
            }
        }
    }
}
