//! `burger-index` library crate.
//!
//! The binary (`burger`) is a thin wrapper around this library so that:
//!
//! - pricing and caching are testable without spawning processes or servers
//! - the `PriceSource` seam can be swapped for canned data in tests
//! - the HTTP layer stays a small shell over `pricing`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod pricing;
pub mod report;
pub mod server;
