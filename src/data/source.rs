//! The seam between the aggregator and whatever serves observations.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::Observation;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Which slice of a series to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWindow {
    /// The first `n` observations in the requested sort order.
    Limit(usize),
    /// All observations dated within `start..=end`.
    Range { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesQuery<'a> {
    pub series_id: &'a str,
    pub sort_order: SortOrder,
    pub window: QueryWindow,
}

impl<'a> SeriesQuery<'a> {
    /// Most recent observation only.
    pub fn latest(series_id: &'a str) -> Self {
        Self {
            series_id,
            sort_order: SortOrder::Desc,
            window: QueryWindow::Limit(1),
        }
    }

    /// Chronological observations inside `start..=end`.
    pub fn range(series_id: &'a str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            series_id,
            sort_order: SortOrder::Asc,
            window: QueryWindow::Range { start, end },
        }
    }
}

/// A read-only provider of dated series observations.
///
/// Implementations return observations in the order the query asks for and
/// drop values that are not numbers. Any transport or decoding failure is an
/// [`Error::Fetch`].
pub trait PriceSource: Send + Sync {
    fn fetch_observations(
        &self,
        query: &SeriesQuery<'_>,
    ) -> impl Future<Output = Result<Vec<Observation>, Error>> + Send;
}
