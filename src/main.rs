use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use order_placement::app_system::{setup_tracing, OrderSystem};
use order_placement::config::SystemConfig;
use order_placement::domain::{CreateOrderRequest, ProductCreate, ShippingInfo};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = SystemConfig::from_env();
    setup_tracing(&config.log_filter);

    info!("Starting application with order placement system");

    let system = OrderSystem::new(&config);

    let span = tracing::info_span!("catalog_setup");
    let (book, pen) = async {
        info!("Creating catalog");
        let book = ProductCreate::new("Book", Decimal::new(1000, 2), 5).with_image("book.png");
        let book = system.product_client.create_product(book).await?;
        let pen = system
            .product_client
            .create_product(ProductCreate::new("Pen", Decimal::new(250, 2), 20))
            .await?;
        Ok::<_, order_placement::error::ProductError>((book, pen))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let shipping = ShippingInfo {
        first_name: "Alice".into(),
        last_name: "Example".into(),
        address: "1 Main Street".into(),
        phone_number: "555-0100".into(),
        payment_reference: "card-on-file".into(),
    };

    let requests = [
        CreateOrderRequest::new(shipping.clone()).line(book, 3).line(pen, 2),
        // only 2 books are left, so this one is rejected and changes nothing
        CreateOrderRequest::new(shipping.clone()).line(pen, 1).line(book, 3),
    ];

    for request in requests {
        let span = tracing::info_span!("order_processing");
        let result = async {
            info!("Placing order");
            system.placement.place_order("alice", request).await
        }
        .instrument(span)
        .await;

        match result {
            Ok(order) => match serde_json::to_string(&order) {
                Ok(json) => info!(order_id = %order.order_id, %json, "Order placed"),
                Err(e) => error!(error = %e, "Could not render order"),
            },
            Err(e) => error!(error = %e, retryable = e.is_retryable(), "Order placement failed"),
        }
    }

    let orders = system.queries.orders_for_user("alice").await.map_err(|e| e.to_string())?;
    info!(order_count = orders.len(), "Retrieved order list");

    let stock = system.product_client.check_stock(book).await.map_err(|e| e.to_string())?;
    info!(product_id = %book, stock, "Remaining stock");

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
