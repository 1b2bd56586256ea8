//! External read representation of orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderId, ProductId, ShippingInfo, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemView {
    pub product_id: ProductId,
    pub quantity: u32,
    pub line_total: Decimal,
    /// Current catalog image, looked up when the view is built.
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub shipping: ShippingInfo,
    pub total_price: Decimal,
    pub items: Vec<LineItemView>,
}

impl OrderView {
    /// Builds the view, asking `image_of` for each line's display image.
    pub fn from_order(order: Order, image_of: impl Fn(ProductId) -> Option<String>) -> Self {
        let items = order
            .items
            .into_iter()
            .map(|item| LineItemView {
                image: image_of(item.product_id),
                product_id: item.product_id,
                quantity: item.quantity,
                line_total: item.line_total,
            })
            .collect();

        Self {
            order_id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
            shipping: order.shipping,
            total_price: order.total_price,
            items,
        }
    }
}
