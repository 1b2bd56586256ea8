use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{NewOrder, Order, OrderId};
use crate::error::PlacementError;
use crate::pricing;

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = NewOrder;
    // Orders are immutable once stored.
    type UpdateParams = Infallible;
    type Error = PlacementError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a new Order from creation parameters.
    ///
    /// # Errors
    /// Rejects an order without line items, or one whose total does not
    /// match the sum of its line totals.
    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, PlacementError> {
        if params.items.is_empty() {
            return Err(PlacementError::InvalidRequest("order has no line items".to_string()));
        }
        let expected = pricing::order_total(&params.items)
            .ok_or_else(|| PlacementError::InvalidRequest("order total overflows".to_string()))?;
        if expected != params.total_price {
            return Err(PlacementError::InvalidRequest(format!(
                "order total {} does not match line items {}",
                params.total_price, expected
            )));
        }

        Ok(Self {
            id,
            user_id: params.user_id,
            created_at: params.created_at,
            shipping: params.shipping,
            items: params.items,
            total_price: params.total_price,
        })
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), PlacementError> {
        match update {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderLineItem, ProductId, ShippingInfo, UserId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn new_order(total: Decimal) -> NewOrder {
        NewOrder {
            user_id: UserId::parse("alice").unwrap(),
            created_at: Utc::now(),
            shipping: ShippingInfo::default(),
            items: vec![OrderLineItem {
                product_id: ProductId(1),
                quantity: 3,
                line_total: Decimal::new(3000, 2),
            }],
            total_price: total,
        }
    }

    #[test]
    fn test_consistent_order_is_accepted() {
        let order = Order::from_create_params(OrderId(1), new_order(Decimal::new(30, 0))).unwrap();
        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.total_price, Decimal::new(3000, 2));
    }

    #[test]
    fn test_inconsistent_total_is_rejected() {
        let result = Order::from_create_params(OrderId(1), new_order(Decimal::new(31, 0)));
        assert!(matches!(result, Err(PlacementError::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let mut params = new_order(Decimal::ZERO);
        params.items.clear();
        assert!(Order::from_create_params(OrderId(1), params).is_err());
    }
}
