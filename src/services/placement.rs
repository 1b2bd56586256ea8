use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{CreateOrderRequest, NewOrder, Order, OrderLineItem, OrderView, UserId};
use crate::error::PlacementError;
use crate::pricing;
use crate::store::{OrderStore, ProductCatalog, StoreClient};

/// Places orders: stock check, stock decrement, pricing and order insert
/// happen in a single unit of work, so a failure leaves nothing behind.
#[derive(Clone)]
pub struct OrderPlacementService {
    store: StoreClient,
}

impl OrderPlacementService {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Places an order for `user_id`, who the caller has already authenticated.
    ///
    /// # Errors
    /// - `Unauthenticated` for a blank user id
    /// - `InvalidRequest` for an empty order or a zero quantity
    /// - `ProductNotFound` / `InsufficientStock` for the first offending line
    /// - `PriceOverflow` when a line or the order total does not fit a `Decimal`
    /// - `PersistenceFailure` when the store is unavailable or too slow
    #[instrument(skip(self, request), fields(lines = request.lines.len()))]
    pub async fn place_order(
        &self,
        user_id: &str,
        request: CreateOrderRequest,
    ) -> Result<OrderView, PlacementError> {
        let Some(user_id) = UserId::parse(user_id) else {
            warn!("Rejected order from unauthenticated caller");
            return Err(PlacementError::Unauthenticated);
        };
        validate(&request)?;

        let now = Utc::now();
        let result: Result<OrderView, PlacementError> = self
            .store
            .transaction(move |tx| {
                let order = place_in(tx, user_id, request, now)?;
                Ok(OrderView::from_order(order, |id| {
                    tx.product(id).and_then(|product| product.image.clone())
                }))
            })
            .await;

        match &result {
            Ok(view) => info!(order_id = %view.order_id, total = %view.total_price, "Order placed"),
            Err(e) if e.is_retryable() => error!(error = %e, "Order placement failed in the store"),
            Err(e) => warn!(error = %e, "Order placement rejected"),
        }
        result
    }
}

fn validate(request: &CreateOrderRequest) -> Result<(), PlacementError> {
    if request.lines.is_empty() {
        return Err(PlacementError::InvalidRequest("order has no lines".to_string()));
    }
    if let Some(line) = request.lines.iter().find(|line| line.quantity == 0) {
        return Err(PlacementError::InvalidRequest(format!(
            "quantity for {} must be positive",
            line.product_id
        )));
    }
    Ok(())
}

/// The placement itself, run inside an open unit of work.
///
/// Lines are applied in request order, so a product listed twice sees the
/// stock left by its earlier line. The first failing line aborts the whole
/// placement; the caller's unit of work discards every earlier decrement.
pub fn place_in<T>(
    tx: &mut T,
    user_id: UserId,
    request: CreateOrderRequest,
    now: DateTime<Utc>,
) -> Result<Order, PlacementError>
where
    T: ProductCatalog + OrderStore,
{
    validate(&request)?;

    let mut total = Decimal::ZERO;
    let mut items = Vec::with_capacity(request.lines.len());

    for line in &request.lines {
        let product = tx
            .product(line.product_id)
            .ok_or(PlacementError::ProductNotFound(line.product_id))?;
        if product.stock < line.quantity {
            return Err(PlacementError::InsufficientStock {
                product_id: line.product_id,
                available: product.stock,
                requested: line.quantity,
            });
        }
        let line_total = pricing::line_total(product.price, line.quantity)
            .ok_or(PlacementError::PriceOverflow(line.product_id))?;
        total = total
            .checked_add(line_total)
            .ok_or(PlacementError::PriceOverflow(line.product_id))?;

        tx.reduce_stock(line.product_id, line.quantity)?;
        debug!(
            product_id = %line.product_id,
            quantity = line.quantity,
            %line_total,
            "Line applied"
        );
        items.push(OrderLineItem {
            product_id: line.product_id,
            quantity: line.quantity,
            line_total,
        });
    }

    tx.insert_order(NewOrder {
        user_id,
        created_at: now,
        shipping: request.shipping,
        items,
        total_price: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductCreate, ProductId, ShippingInfo};
    use crate::error::ProductError;
    use crate::store::Database;

    fn seeded() -> Database {
        let mut db = Database::new();
        db.transaction(|tx| {
            tx.insert_product(ProductCreate::new("Book", Decimal::new(1000, 2), 5))?;
            tx.insert_product(ProductCreate::new("Pen", Decimal::new(125, 2), 10))?;
            Ok::<_, ProductError>(())
        })
        .unwrap();
        db
    }

    fn alice() -> UserId {
        UserId::parse("alice").unwrap()
    }

    fn place(db: &mut Database, request: CreateOrderRequest) -> Result<Order, PlacementError> {
        db.transaction(|tx| place_in(tx, alice(), request, Utc::now()))
    }

    fn stock(db: &Database, id: u32) -> u32 {
        db.products().get(&ProductId(id)).unwrap().stock
    }

    #[test]
    fn test_successful_placement_prices_and_decrements() {
        let mut db = seeded();
        let request = CreateOrderRequest::new(ShippingInfo::default())
            .line(ProductId(1), 3)
            .line(ProductId(2), 4);

        let order = place(&mut db, request).unwrap();

        assert_eq!(order.items[0].line_total, Decimal::new(3000, 2));
        assert_eq!(order.items[1].line_total, Decimal::new(500, 2));
        assert_eq!(order.total_price, Decimal::new(3500, 2));
        assert!(pricing::verify_totals(&order));
        assert_eq!(stock(&db, 1), 2);
        assert_eq!(stock(&db, 2), 6);
        assert_eq!(db.orders().len(), 1);
    }

    #[test]
    fn test_insufficient_stock_rolls_back_everything() {
        let mut db = seeded();
        place(&mut db, CreateOrderRequest::default().line(ProductId(1), 3)).unwrap();

        let request = CreateOrderRequest::default()
            .line(ProductId(2), 1)
            .line(ProductId(1), 3);
        let err = place(&mut db, request).unwrap_err();

        assert_eq!(
            err,
            PlacementError::InsufficientStock {
                product_id: ProductId(1),
                available: 2,
                requested: 3
            }
        );
        assert_eq!(stock(&db, 1), 2);
        assert_eq!(stock(&db, 2), 10);
        assert_eq!(db.orders().len(), 1);
    }

    #[test]
    fn test_unknown_product_leaves_store_unchanged() {
        let mut db = seeded();
        let request = CreateOrderRequest::default()
            .line(ProductId(1), 1)
            .line(ProductId(77), 1);

        assert_eq!(
            place(&mut db, request).unwrap_err(),
            PlacementError::ProductNotFound(ProductId(77))
        );
        assert_eq!(stock(&db, 1), 5);
        assert!(db.orders().is_empty());
    }

    #[test]
    fn test_duplicate_lines_see_reduced_stock() {
        let mut db = seeded();
        let request = CreateOrderRequest::default()
            .line(ProductId(1), 3)
            .line(ProductId(1), 3);

        assert_eq!(
            place(&mut db, request).unwrap_err(),
            PlacementError::InsufficientStock {
                product_id: ProductId(1),
                available: 2,
                requested: 3
            }
        );
        assert_eq!(stock(&db, 1), 5);

        let request = CreateOrderRequest::default()
            .line(ProductId(1), 3)
            .line(ProductId(1), 2);
        let order = place(&mut db, request).unwrap();
        assert_eq!(order.total_price, Decimal::new(5000, 2));
        assert_eq!(stock(&db, 1), 0);
    }

    #[test]
    fn test_invalid_requests_are_rejected() {
        let mut db = seeded();
        assert!(matches!(
            place(&mut db, CreateOrderRequest::default()),
            Err(PlacementError::InvalidRequest(_))
        ));
        assert!(matches!(
            place(&mut db, CreateOrderRequest::default().line(ProductId(1), 0)),
            Err(PlacementError::InvalidRequest(_))
        ));
        assert_eq!(stock(&db, 1), 5);
    }

    #[test]
    fn test_retry_after_failure_matches_fresh_placement() {
        let mut failed = seeded();
        let mut fresh = seeded();

        assert!(place(&mut failed, CreateOrderRequest::default().line(ProductId(1), 9)).is_err());
        let request = CreateOrderRequest::default().line(ProductId(1), 4);
        let retried = place(&mut failed, request.clone()).unwrap();
        let direct = place(&mut fresh, request).unwrap();

        assert_eq!(retried.id, direct.id);
        assert_eq!(retried.items, direct.items);
        assert_eq!(retried.total_price, direct.total_price);
        assert_eq!(stock(&failed, 1), stock(&fresh, 1));
    }

    #[test]
    fn test_price_overflow_is_rejected_without_side_effects() {
        let mut db = seeded();
        db.transaction(|tx| {
            tx.insert_product(ProductCreate::new("Vault", Decimal::MAX, 10))
                .map(|p| p.id)
        })
        .unwrap();

        // one unit still prices fine, two do not
        let request = CreateOrderRequest::default()
            .line(ProductId(1), 1)
            .line(ProductId(3), 2);
        assert_eq!(
            place(&mut db, request).unwrap_err(),
            PlacementError::PriceOverflow(ProductId(3))
        );

        // the lines fit on their own but not summed
        let request = CreateOrderRequest::default()
            .line(ProductId(3), 1)
            .line(ProductId(1), 1);
        assert_eq!(
            place(&mut db, request).unwrap_err(),
            PlacementError::PriceOverflow(ProductId(1))
        );

        assert_eq!(stock(&db, 1), 5);
        assert_eq!(stock(&db, 3), 10);
        assert!(db.orders().is_empty());
        assert!(!PlacementError::PriceOverflow(ProductId(3)).is_retryable());
    }
}
