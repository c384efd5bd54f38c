//! Domain types used throughout the service.
//!
//! This module defines:
//!
//! - the static series catalog (`Component`, `ComponentSpec`, `Catalog`)
//! - current-price and trend records (`IngredientPrice`, `HistoricalPoint`)
//! - cache range keys (`RangeKey`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
