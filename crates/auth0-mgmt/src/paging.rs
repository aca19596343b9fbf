//! Lazy pagination over list endpoints.
//!
//! [`PagedResult`] walks a list endpoint one page at a time, issuing no
//! request until [`PagedResult::fetch_next`] is called. It handles both
//! pagination styles behind one interface: offset pages driven by the
//! `page` parameter and checkpoint pages driven by the `from` cursor. The
//! style of the next request is decided from the shape of the previous
//! response.

use async_trait::async_trait;
use futures::stream::{self, Stream};

use crate::error::Result;
use crate::page::Page;

/// Position of the next page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// First request, sent with the caller's original parameters.
    Initial,
    /// Offset request for the given zero-based page index.
    Offset { page: u32 },
    /// Checkpoint request resuming from an opaque cursor.
    Checkpoint { from: String },
}

/// Fetches one page at a cursor position. Implemented by the resource
/// clients; test code substitutes scripted fetchers.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch(&self, cursor: &PageCursor) -> Result<Page<T>>;
}

/// A lazy, single-pass walk over a paginated result set.
///
/// Requires `&mut self` to advance, so a page fetch cannot race with
/// another on the same walk. After exhaustion or a failed fetch, further
/// calls return an empty batch without touching the network.
pub struct PagedResult<T> {
    fetcher: Box<dyn PageFetcher<T>>,
    cursor: Option<PageCursor>,
    /// Zero-based page index the walk started at, for offset fallback.
    initial_page: u32,
    pages_fetched: u32,
    total: Option<u64>,
}

impl<T> PagedResult<T> {
    /// Begin a walk at the given fetcher's initial position. `initial_page`
    /// is the offset page index the caller's parameters select (0 if none).
    pub fn new(fetcher: Box<dyn PageFetcher<T>>, initial_page: u32) -> Self {
        Self {
            fetcher,
            cursor: Some(PageCursor::Initial),
            initial_page,
            pages_fetched: 0,
            total: None,
        }
    }

    /// Total matching items as reported by the most recent page summary, if
    /// the server sent one.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether the walk has reached the end of the result set.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Whether another page may exist. The next fetch can still come back
    /// empty when the last page ended exactly on a boundary.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Fetch the next batch of items. Returns an empty batch once the walk
    /// is exhausted; a mid-walk page can also be empty while more remain,
    /// so check [`PagedResult::has_more`] rather than the batch length.
    /// A fetch error exhausts the walk; the error is returned once and
    /// subsequent calls yield empty batches.
    pub async fn fetch_next(&mut self) -> Result<Vec<T>> {
        let Some(cursor) = self.cursor.take() else {
            return Ok(Vec::new());
        };
        // cursor stays None on error, so a failed walk does not resume.
        let page = self.fetcher.fetch(&cursor).await?;
        self.pages_fetched += 1;
        if page.total.is_some() {
            self.total = page.total;
        }
        self.cursor = self.next_cursor(&page);
        Ok(page.items)
    }

    /// Drain the remaining pages into one vector.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while !self.is_exhausted() {
            all.extend(self.fetch_next().await?);
        }
        Ok(all)
    }

    /// Turn the walk into a stream of batches. The stream ends after
    /// yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>>>
    where
        T: 'static,
    {
        stream::unfold(self, |mut walk| async move {
            loop {
                if walk.is_exhausted() {
                    return None;
                }
                // Skip empty batches that still carry a continuation signal.
                match walk.fetch_next().await {
                    Ok(items) if items.is_empty() => continue,
                    other => return Some((other, walk)),
                }
            }
        })
    }

    /// Decide where the next request goes, or `None` when the result set is
    /// complete. A continuation signal (a non-empty `next` cursor, or an
    /// offset summary with items remaining) keeps the walk alive even when
    /// the batch itself is empty; only a page with no signal at all is
    /// terminal.
    fn next_cursor(&self, page: &Page<T>) -> Option<PageCursor> {
        match &page.next {
            Some(next) if !next.is_empty() => {
                return Some(PageCursor::Checkpoint { from: next.clone() });
            }
            // The server reported the checkpoint end explicitly.
            Some(_) => return None,
            None => {}
        }
        if page.envelope {
            match (page.start, page.limit, page.total) {
                (Some(start), Some(limit), Some(total)) if limit > 0 => {
                    let seen = start.saturating_add(page.items.len() as u64);
                    if seen < total {
                        let next_page = (start / limit).saturating_add(1);
                        Some(PageCursor::Offset {
                            page: u32::try_from(next_page).ok()?,
                        })
                    } else {
                        None
                    }
                }
                // An envelope without cursor or summary carries no way to
                // continue.
                _ => None,
            }
        } else if page.items.is_empty() {
            // Bare array with nothing in it: the probe walked past the end.
            None
        } else {
            // Bare array: no metadata at all. Probe the next offset page
            // until an empty batch comes back.
            Some(PageCursor::Offset {
                page: self.initial_page.saturating_add(self.pages_fetched),
            })
        }
    }
}

impl<T> std::fmt::Debug for PagedResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedResult")
            .field("cursor", &self.cursor)
            .field("pages_fetched", &self.pages_fetched)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
