//! Products domain module.
//!
//! This crate contains the product entity and the aggregates derived from its
//! purchase/order history, implemented purely as deterministic domain logic
//! (no IO, no logging, no storage).

pub mod product;

pub use product::{Product, StockMovement};
