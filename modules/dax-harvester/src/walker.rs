//! Cursor-based walk over the search API.
//!
//! Each request after the first is bounded above by the smallest id seen on
//! the previous page, minus one. The bound must strictly decrease; a page that
//! fails to move it ends the walk with [`HarvestError::Descent`] instead of
//! looping forever.

use tracing::{debug, info};

use crate::error::HarvestError;
use crate::traits::{SearchRequest, TweetSearch};
use crate::types::RawPost;

/// The API's per-request maximum.
pub const PAGE_SIZE: u32 = 100;

/// Lower id bound for every request. Effectively unbounded.
pub const SINCE_ID_FLOOR: u64 = 1;

/// Outcome of a walk. On failure `posts` still holds everything collected
/// before the failing request.
#[derive(Debug)]
pub struct Walk {
    pub posts: Vec<RawPost>,
    /// Requests that returned a page (empty pages included).
    pub pages: usize,
    pub error: Option<HarvestError>,
}

impl Walk {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

pub struct PageWalker<'a, S: ?Sized> {
    search: &'a S,
    page_size: u32,
    since_id: u64,
}

impl<'a, S: TweetSearch + ?Sized> PageWalker<'a, S> {
    pub fn new(search: &'a S) -> Self {
        Self {
            search,
            page_size: PAGE_SIZE,
            since_id: SINCE_ID_FLOOR,
        }
    }

    /// Fetch every post matching `query`, newest page first, until a page comes back empty.
    ///
    /// Duplicate ids across pages are passed through as-is.
    pub async fn collect(&self, query: &str) -> Walk {
        let mut posts = Vec::new();
        let mut pages = 0;
        let mut max_id: Option<u64> = None;
        let mut previous_bound = u64::MAX;

        loop {
            let request = SearchRequest {
                query: query.to_string(),
                count: self.page_size,
                since_id: self.since_id,
                max_id,
            };

            let page = match self.search.search(&request).await {
                Ok(page) => page,
                Err(error) => {
                    return Walk {
                        posts,
                        pages,
                        error: Some(error),
                    }
                }
            };
            pages += 1;

            let Some(min_id) = page.iter().map(|p| p.id).min() else {
                debug!(page = pages, "Empty page, search exhausted");
                break;
            };
            debug!(page = pages, count = page.len(), min_id, "Fetched page");
            posts.extend(page);

            // Nothing can sit below id 0.
            let Some(next) = min_id.checked_sub(1) else {
                break;
            };
            if next >= previous_bound {
                return Walk {
                    posts,
                    pages,
                    error: Some(HarvestError::Descent {
                        previous: previous_bound,
                        next,
                    }),
                };
            }
            previous_bound = next;
            max_id = Some(next);
        }

        info!(query, pages, count = posts.len(), "Search walk complete");
        Walk {
            posts,
            pages,
            error: None,
        }
    }
}
