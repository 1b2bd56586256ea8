//! Order services built on top of the store.
//!
//! - [`OrderPlacementService`] validates, prices, persists and adjusts stock in one unit of work
//! - [`OrderQueryService`] reads and deletes stored orders

pub mod placement;
pub mod query;

pub use placement::*;
pub use query::*;
