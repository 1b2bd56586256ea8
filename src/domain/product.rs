//! Products in the catalog.
//!
//! # Actor Framework
//! [`Product`] implements the [`Entity`](crate::actor_framework::Entity) trait,
//! so it can live in a [`Table`](crate::actor_framework::Table) owned by the store actor.
//!
//! The trait impl lives in [`crate::product`]. It covers:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Stock actions ([`ProductAction`](crate::product::ProductAction))

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Units available. Unsigned, so it cannot go below zero.
    pub stock: u32,
    pub image: Option<String>,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the store)
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Available stock quantity
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            image: None,
        }
    }
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub image: Option<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Catalog edits. Stock is deliberately absent: it only moves through
/// [`ProductAction`](crate::product::ProductAction).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
}
