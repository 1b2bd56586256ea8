//! System orchestration, startup, and shutdown logic.

pub mod logging;
pub mod order_system;

pub use logging::*;
pub use order_system::*;
