//! Exhaustive fetching of page-numbered collections.
//!
//! Mixin collection endpoints take `page` (1-based) and `per_page` (1 to 100)
//! query parameters and wrap each page in an envelope whose `next` field is
//! `null` on the last page. [`fetch_all`] walks such an endpoint until it runs
//! out, accumulating every record in vendor order.
//!
//! # Termination
//!
//! The loop stops at the first page that:
//!
//! - did not answer with a 2xx status (or never answered at all),
//! - answered 2xx with a body that is not a page envelope,
//! - returned an empty result list, or
//! - had no `next` marker.
//!
//! None of these is an error. Whatever was accumulated so far is returned,
//! and [`Collected::end`] records why the walk stopped so a caller can tell
//! a short result from a complete one with [`Collected::is_complete`].
//!
//! # Cursor Ownership
//!
//! The cursor is a plain value passed into each fetch and handed back, reset
//! to page 1, in the result. Nothing is stored on the client, so concurrent
//! fetches through one [`RestClient`] never interfere.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{fetch_all, PageCursor, RestPageExecutor};
//! use mixin_api::rest::resources::Category;
//!
//! let executor = RestPageExecutor::<Category>::new(&client, "categories/");
//! let collected = fetch_all(&executor, PageCursor::default()).await;
//!
//! println!("{} categories ({:?})", collected.records.len(), collected.end);
//! ```

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;

/// Largest page size the vendor accepts, also the default.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    per_page: u32,
}

impl PageCursor {
    /// Creates a cursor, clamping `page` to at least 1 and `per_page` to `1..=100`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::rest::PageCursor;
    ///
    /// let cursor = PageCursor::new(0, 500);
    /// assert_eq!(cursor.page(), 1);
    /// assert_eq!(cursor.per_page(), 100);
    /// ```
    #[must_use]
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: clamp_to_u32(page, 1, u32::MAX),
            per_page: clamp_to_u32(per_page, 1, MAX_PAGE_SIZE),
        }
    }

    /// Creates a cursor at page 1 with the given page size.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, i64::from(per_page))
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the cursor for the following page.
    #[must_use]
    pub const fn advance(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    /// Returns the cursor rewound to page 1, keeping the page size.
    #[must_use]
    pub const fn reset(self) -> Self {
        Self {
            page: 1,
            per_page: self.per_page,
        }
    }

    /// Returns the `page` and `per_page` query parameters for this cursor.
    #[must_use]
    pub fn query_params(&self) -> [(String, String); 2] {
        [
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: MAX_PAGE_SIZE,
        }
    }
}

fn clamp_to_u32(value: i64, min: u32, max: u32) -> u32 {
    u32::try_from(value.clamp(i64::from(min), i64::from(max))).unwrap_or(min)
}

/// The vendor's page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    /// URL of the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// The page this envelope holds.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// Page size the vendor applied.
    #[serde(default)]
    pub per_page: Option<u32>,
    /// The records on this page.
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// One page as seen by the fetch loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse<T> {
    /// HTTP status, `None` when no response was received.
    pub status: Option<u16>,
    /// Decoded records.
    pub results: Vec<T>,
    /// Continuation marker, `None` on the last page.
    pub next: Option<String>,
    /// Set when a 2xx body could not be decoded as a page.
    pub undecodable: bool,
}

impl<T> PageResponse<T> {
    /// A page that ended the stream without records.
    #[must_use]
    pub const fn failed(status: Option<u16>) -> Self {
        Self {
            status,
            results: Vec::new(),
            next: None,
            undecodable: false,
        }
    }

    /// A successful answer whose body was not a page envelope.
    #[must_use]
    pub const fn undecodable(status: u16) -> Self {
        Self {
            status: Some(status),
            results: Vec::new(),
            next: None,
            undecodable: true,
        }
    }

    /// Returns `true` if the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|code| (200..=299).contains(&code))
    }
}

impl<T> From<PageEnvelope<T>> for PageResponse<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Self {
            status: Some(200),
            results: envelope.result,
            next: envelope.next,
            undecodable: false,
        }
    }
}

/// Issues the request for one page of a collection.
///
/// Implementations never fail: transport and decode problems are reported
/// through [`PageResponse::status`] and end the stream.
#[allow(async_fn_in_trait)]
pub trait PageExecutor<T> {
    /// Fetches the page the cursor points at.
    async fn execute(&self, cursor: PageCursor) -> PageResponse<T>;
}

/// Why a fetch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The last page had no `next` marker.
    Exhausted,
    /// A page came back with no records.
    EmptyPage,
    /// A page failed; `status` is `None` when no response was received.
    FailedPage {
        /// The failing status, if any.
        status: Option<u16>,
    },
    /// A page answered 2xx but its body was not a page envelope.
    UndecodablePage {
        /// The status of the unreadable page.
        status: u16,
    },
}

/// The outcome of [`fetch_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
    /// Every record fetched, in vendor order.
    pub records: Vec<T>,
    /// The cursor, rewound to page 1 for reuse.
    pub cursor: PageCursor,
    /// Why the walk stopped.
    pub end: StreamEnd,
}

impl<T> Collected<T> {
    /// Returns `true` unless a failed or unreadable page cut the walk short.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(
            self.end,
            StreamEnd::FailedPage { .. } | StreamEnd::UndecodablePage { .. }
        )
    }

    /// Consumes the result and returns the records.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Fetches every page from `cursor` onwards.
///
/// # Example
///
/// ```rust,ignore
/// let collected = fetch_all(&executor, PageCursor::new(3, 20)).await;
/// assert_eq!(collected.cursor, PageCursor::new(1, 20));
/// ```
pub async fn fetch_all<T, E>(executor: &E, cursor: PageCursor) -> Collected<T>
where
    E: PageExecutor<T> + ?Sized,
{
    let mut records = Vec::new();
    let mut current = cursor;

    let end = loop {
        let page = executor.execute(current).await;

        if !page.is_success() {
            tracing::warn!(
                page = current.page(),
                status = ?page.status,
                fetched = records.len(),
                "Page fetch failed, ending collection early"
            );
            break StreamEnd::FailedPage {
                status: page.status,
            };
        }

        if page.undecodable {
            tracing::warn!(
                page = current.page(),
                fetched = records.len(),
                "Page body unreadable, ending collection early"
            );
            break StreamEnd::UndecodablePage {
                status: page.status.unwrap_or_default(),
            };
        }

        if page.results.is_empty() {
            break StreamEnd::EmptyPage;
        }

        tracing::debug!(
            page = current.page(),
            count = page.results.len(),
            "Fetched collection page"
        );

        let has_next = page.next.is_some();
        records.extend(page.results);

        if !has_next {
            break StreamEnd::Exhausted;
        }

        current = current.advance();
    };

    Collected {
        records,
        cursor: current.reset(),
        end,
    }
}

/// Page executor that GETs a management endpoint through a [`RestClient`].
#[derive(Debug)]
pub struct RestPageExecutor<'a, T> {
    client: &'a RestClient,
    path: String,
    query: HashMap<String, String>,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T> RestPageExecutor<'a, T> {
    /// Creates an executor for the collection at `path`.
    #[must_use]
    pub fn new(client: &'a RestClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            query: HashMap::new(),
            _record: PhantomData,
        }
    }

    /// Adds a query parameter sent with every page request.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds several query parameters sent with every page request.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }
}

impl<T: DeserializeOwned> PageExecutor<T> for RestPageExecutor<'_, T> {
    async fn execute(&self, cursor: PageCursor) -> PageResponse<T> {
        let mut query = self.query.clone();
        query.extend(cursor.query_params());

        let response = match self.client.get(&self.path, Some(query)).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(path = %self.path, %error, "Page request did not complete");
                return PageResponse::failed(None);
            }
        };

        if !response.is_ok() {
            return PageResponse::failed(Some(response.code));
        }

        if response.raw_body().is_some() {
            tracing::warn!(path = %self.path, "Page body is not JSON");
            return PageResponse::undecodable(response.code);
        }

        match serde_json::from_value::<PageEnvelope<T>>(response.body) {
            Ok(envelope) => PageResponse {
                status: Some(response.code),
                results: envelope.result,
                next: envelope.next,
                undecodable: false,
            },
            Err(error) => {
                tracing::warn!(path = %self.path, %error, "Could not decode page body");
                PageResponse::undecodable(response.code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves scripted pages and records which pages were requested.
    struct ScriptedPages {
        pages: Vec<PageResponse<u32>>,
        requested: Mutex<Vec<PageCursor>>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<PageResponse<u32>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.requested
                .lock()
                .unwrap()
                .iter()
                .map(PageCursor::page)
                .collect()
        }
    }

    impl PageExecutor<u32> for ScriptedPages {
        async fn execute(&self, cursor: PageCursor) -> PageResponse<u32> {
            self.requested.lock().unwrap().push(cursor);
            let index = usize::try_from(cursor.page() - 1).unwrap();
            self.pages
                .get(index)
                .cloned()
                .unwrap_or_else(|| PageResponse::failed(Some(404)))
        }
    }

    fn page(records: &[u32], has_next: bool) -> PageResponse<u32> {
        PageResponse {
            status: Some(200),
            results: records.to_vec(),
            next: has_next.then(|| "https://shop.example.com/next".to_string()),
            undecodable: false,
        }
    }

    #[test]
    fn test_cursor_clamps_out_of_range_values() {
        assert_eq!(PageCursor::new(-3, -1), PageCursor::new(1, 1));
        assert_eq!(PageCursor::new(0, 0).page(), 1);
        assert_eq!(PageCursor::new(2, 101).per_page(), 100);
        assert_eq!(PageCursor::new(7, 25).per_page(), 25);
        assert_eq!(PageCursor::default(), PageCursor::new(1, 100));
    }

    #[test]
    fn test_cursor_advance_and_reset_keep_page_size() {
        let cursor = PageCursor::new(1, 20).advance().advance();
        assert_eq!(cursor.page(), 3);
        assert_eq!(cursor.reset(), PageCursor::new(1, 20));
    }

    #[test]
    fn test_cursor_query_params() {
        let params = PageCursor::new(4, 50).query_params();
        assert_eq!(params[0], ("page".to_string(), "4".to_string()));
        assert_eq!(params[1], ("per_page".to_string(), "50".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_all_returns_every_page_in_order() {
        let executor = ScriptedPages::new(vec![
            page(&[1], true),
            page(&[2], true),
            page(&[3], true),
            page(&[4], false),
        ]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert_eq!(collected.records, vec![1, 2, 3, 4]);
        assert_eq!(collected.end, StreamEnd::Exhausted);
        assert!(collected.is_complete());
        assert_eq!(executor.requested_pages(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_fetch_all_returns_nothing_when_first_page_fails() {
        let executor = ScriptedPages::new(vec![PageResponse::failed(Some(500)), page(&[2], false)]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert!(collected.records.is_empty());
        assert_eq!(collected.end, StreamEnd::FailedPage { status: Some(500) });
        assert!(!collected.is_complete());
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_missing_next_marker() {
        let executor = ScriptedPages::new(vec![
            page(&[1, 2], true),
            page(&[3], false),
            page(&[4], false),
        ]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert_eq!(collected.records, vec![1, 2, 3]);
        assert_eq!(executor.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_empty_page() {
        let executor = ScriptedPages::new(vec![page(&[1], true), page(&[], true), page(&[3], false)]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert_eq!(collected.records, vec![1]);
        assert_eq!(collected.end, StreamEnd::EmptyPage);
        assert!(collected.is_complete());
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_records_before_a_failed_page() {
        let executor = ScriptedPages::new(vec![page(&[1], true), PageResponse::failed(None)]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert_eq!(collected.records, vec![1]);
        assert_eq!(collected.end, StreamEnd::FailedPage { status: None });
    }

    #[tokio::test]
    async fn test_fetch_all_starts_at_cursor_and_returns_rewound_cursor() {
        let executor = ScriptedPages::new(vec![
            page(&[1], true),
            page(&[2], true),
            page(&[3], false),
        ]);

        let collected = fetch_all(&executor, PageCursor::new(2, 10)).await;

        assert_eq!(collected.records, vec![2, 3]);
        assert_eq!(collected.cursor, PageCursor::new(1, 10));
        assert_eq!(executor.requested_pages(), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_all_marks_unreadable_page_incomplete() {
        let executor = ScriptedPages::new(vec![
            page(&[1], true),
            PageResponse::undecodable(200),
            page(&[3], false),
        ]);

        let collected = fetch_all(&executor, PageCursor::default()).await;

        assert_eq!(collected.records, vec![1]);
        assert_eq!(collected.end, StreamEnd::UndecodablePage { status: 200 });
        assert!(!collected.is_complete());
        assert_eq!(executor.requested_pages(), vec![1, 2]);
    }

    #[test]
    fn test_page_envelope_decodes_vendor_shape() {
        let envelope: PageEnvelope<u32> = serde_json::from_value(serde_json::json!({
            "next": null,
            "previous": "https://shop.example.com/api/management/v1/products/?page=1",
            "total_pages": 2,
            "current_page": 2,
            "per_page": 100,
            "result": [7, 8]
        }))
        .unwrap();

        assert_eq!(envelope.result, vec![7, 8]);
        assert!(envelope.next.is_none());
        assert_eq!(envelope.total_pages, Some(2));

        let response = PageResponse::from(envelope);
        assert!(response.is_success());
        assert_eq!(response.results, vec![7, 8]);
    }
}
