//! Walkout
//!
//! Walkout simulates a walk-out grocery store: shoppers scan barcodes into a
//! cart, pay for what they picked up, and are let through the exit gate once
//! nothing is left unpaid.
//!
//! [`store::CartStore`] owns all mutable state; everything else reads from it
//! or calls its operations.

pub mod assistant;
pub mod barcode;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod store;
