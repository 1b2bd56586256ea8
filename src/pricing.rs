//! Line and order totals. Pure functions over `Decimal`.
//!
//! Arithmetic is checked: `None` means the amount does not fit in a `Decimal`.

use rust_decimal::Decimal;

use crate::domain::{Order, OrderLineItem};

/// `unit_price * quantity`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Sum of the line totals.
pub fn order_total(items: &[OrderLineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.line_total))
}

/// Audit check: does the stored total still equal the sum of its lines?
pub fn verify_totals(order: &Order) -> bool {
    order_total(&order.items) == Some(order.total_price)
}
