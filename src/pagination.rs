//! Continuation-token draining and offset/limit windows.
//!
//! QuickSight list operations hand back an opaque `NextToken`. [`drain`]
//! follows that chain to the end and [`page`] cuts the complete sequence into
//! the window the caller asked for.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Upper bound on upstream calls made by a single [`drain`].
pub const MAX_DRAIN_PAGES: usize = 1_000;

/// The continuation token chain kept going past [`MAX_DRAIN_PAGES`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("listing did not finish after {pages} pages")]
pub struct DrainLimitExceeded {
    pub pages: usize,
}

/// One upstream call's worth of items.
#[derive(Debug, Clone, PartialEq)]
pub struct PageChunk<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> PageChunk<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// Offset/limit window requested by a tool caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "PageArgs")]
pub struct PageRequest {
    offset: usize,
    limit: usize,
}

#[derive(Deserialize)]
struct PageArgs {
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        Self::new(
            args.offset.unwrap_or(0),
            args.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
    }
}

impl PageRequest {
    /// Builds a request, clamping `limit` into `1..=MAX_PAGE_LIMIT`.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

impl PaginationInfo {
    /// Metadata reported alongside a failed listing.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            limit: request.limit,
            offset: request.offset,
            total: 0,
            has_more: false,
            next_offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub info: PaginationInfo,
}

/// Calls `fetch_page` until it stops returning a continuation token and
/// returns every item in the order upstream produced them.
///
/// The first call gets `None`. An empty token ends the chain just like a
/// missing one. The first error is returned as-is and whatever was collected
/// before it is dropped.
pub async fn drain<T, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PageChunk<T>, E>>,
    E: From<DrainLimitExceeded>,
{
    let mut all_items = Vec::new();
    let mut token: Option<String> = None;

    for _ in 0..MAX_DRAIN_PAGES {
        let chunk = fetch_page(token.take()).await?;
        all_items.extend(chunk.items);

        match chunk.next_token.filter(|t| !t.is_empty()) {
            Some(next) => token = Some(next),
            None => return Ok(all_items),
        }
    }

    Err(DrainLimitExceeded {
        pages: MAX_DRAIN_PAGES,
    }
    .into())
}

/// Cuts `all_items` down to the window described by `request`.
pub fn page<T>(all_items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = all_items.len();
    let end = request.offset.saturating_add(request.limit);
    let has_more = end < total;

    let items = all_items
        .into_iter()
        .skip(request.offset)
        .take(request.limit)
        .collect();

    Page {
        items,
        info: PaginationInfo {
            limit: request.limit,
            offset: request.offset,
            total,
            has_more,
            next_offset: has_more.then_some(end),
        },
    }
}

/// Materializes the full listing with `list_all` and returns one window of it.
pub async fn list_page<T, E, F, Fut>(list_all: F, request: PageRequest) -> Result<Page<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let all_items = list_all().await?;
    Ok(page(all_items, request))
}
