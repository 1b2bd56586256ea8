use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::{ProductId, UserId};

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Shipping and payment details captured with the order, echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub payment_reference: String,
}

/// One requested `(product, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl LineRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self { product_id, quantity }
    }
}

/// The "create order" request handed in by callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping: ShippingInfo,
    /// Applied in this order; later duplicates see stock already reduced by earlier ones.
    pub lines: Vec<LineRequest>,
}

impl CreateOrderRequest {
    pub fn new(shipping: ShippingInfo) -> Self {
        Self { shipping, lines: Vec::new() }
    }

    pub fn line(mut self, product_id: ProductId, quantity: u32) -> Self {
        self.lines.push(LineRequest::new(product_id, quantity));
        self
    }
}

/// A line of a persisted order. `line_total` is the unit price at placement
/// time times the quantity and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// A persisted customer order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub shipping: ShippingInfo,
    pub items: Vec<OrderLineItem>,
    pub total_price: Decimal,
}

/// Payload for inserting an order; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub shipping: ShippingInfo,
    pub items: Vec<OrderLineItem>,
    pub total_price: Decimal,
}
