//! The persistent store: tables owned by a single actor, accessed through
//! units of work that commit or roll back as a whole.

pub mod client;
pub mod database;
pub mod ports;
pub mod unit_of_work;

pub use client::*;
pub use database::*;
pub use ports::*;
pub use unit_of_work::*;
