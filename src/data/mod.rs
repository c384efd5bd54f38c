//! Upstream price data.
//!
//! - the `PriceSource` trait the aggregator depends on (`source`)
//! - the FRED observations client (`fred`)

pub mod fred;
pub mod source;

pub use fred::FredClient;
pub use source::{PriceSource, QueryWindow, SeriesQuery, SortOrder};
