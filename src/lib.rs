//! # Order Placement
//!
//! Order management core for an e-commerce backend: records customer
//! orders with their line items, decrements inventory, and returns
//! normalized order views.
//!
//! ## Ingredients
//!
//! - **Domain types** - plain data → [`domain::Order`], [`domain::Product`],
//!   [`domain::OrderView`]
//! - **Store actor** - a [`actor_framework::ResourceActor`] owning the [`store::Database`];
//!   every request runs as one [`store::UnitOfWork`] that commits or rolls back as a whole
//! - **Services** - [`services::OrderPlacementService`] and [`services::OrderQueryService`]
//! - **Catalog client** - [`clients::ProductClient`] for product admin and restocking
//! - **System coordinator** - [`app_system::OrderSystem`] for startup and shutdown
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use order_placement::app_system::OrderSystem;
//! use order_placement::config::SystemConfig;
//! use order_placement::domain::{CreateOrderRequest, ProductCreate, ShippingInfo};
//! use rust_decimal::Decimal;
//!
//! let system = OrderSystem::new(&SystemConfig::default());
//! let book = system
//!     .product_client
//!     .create_product(ProductCreate::new("Book", Decimal::new(1000, 2), 5))
//!     .await?;
//!
//! let request = CreateOrderRequest::new(ShippingInfo::default()).line(book, 3);
//! let order = system.placement.place_order("alice", request).await?;
//! assert_eq!(order.total_price, Decimal::new(3000, 2));
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod order;
pub mod pricing;
pub mod product;
pub mod services;
pub mod store;

#[cfg(test)]
mod mock_framework;
