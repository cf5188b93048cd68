//! Page window resolution and the shared listing recipe.
//!
//! Every "list resources" endpoint accepts `recordPerPage`, `page` and an
//! optional `startIndex`. The window is resolved once here and handed to the
//! repository, which answers with a [`Page`]: the total number of matched
//! documents plus the requested slice.

use serde::Deserialize;

/// Page size used when `recordPerPage` is absent, unparseable or below one.
pub const DEFAULT_RECORDS_PER_PAGE: u64 = 10;

/// Raw listing parameters as they arrive on the query string.
///
/// Kept as strings so that garbage values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParams {
    // ---
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

/// A resolved `[start, start + limit)` window over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    // ---
    pub start: u64,
    pub limit: u64,
}

impl PageWindow {
    // ---
    pub fn new(start: u64, limit: u64) -> Self {
        // ---
        Self {
            start,
            limit: limit.max(1),
        }
    }

    /// Resolves the window from query parameters.
    ///
    /// `recordPerPage` and `page` are clamped to at least one. The start index
    /// is `(page - 1) * recordPerPage` unless `startIndex` is present and parses
    /// as a non-negative integer, in which case it wins.
    pub fn from_params(params: &ListParams) -> Self {
        // ---
        let limit = parse_positive(params.record_per_page.as_deref())
            .unwrap_or(DEFAULT_RECORDS_PER_PAGE);
        let page = parse_positive(params.page.as_deref()).unwrap_or(1);

        let derived = (page - 1).saturating_mul(limit);
        let start = params
            .start_index
            .as_deref()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(derived);

        Self::new(start, limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    // ---
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v >= 1)
}

/// One page of a listing plus the size of the whole matched set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    // ---
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    // ---
    pub fn empty() -> Self {
        // ---
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }

    /// Groups every matched document into one row and projects the window.
    ///
    /// An empty match set yields an empty page rather than a missing row.
    pub fn collect<I>(matched: I, window: PageWindow) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        // ---
        let all: Vec<T> = matched.into_iter().collect();
        let total_count = all.len() as u64;

        let start = usize::try_from(window.start).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(start).take(limit).collect();

        Self { total_count, items }
    }
}
