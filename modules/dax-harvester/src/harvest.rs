use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::dedup::{filter_novel, load_existing};
use crate::persister::persist;
use crate::projector::project;
use crate::traits::{TweetSearch, TweetStore};
use crate::walker::PageWalker;

/// The only query this harvester runs.
pub const SEARCH_TERM: &str = "#DAX";

/// Summary of one run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pages: usize,
    pub collected: usize,
    /// Set when the search walk ended early.
    pub search_error: Option<String>,
    pub already_stored: usize,
    pub inserted: usize,
    pub failed: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages={} collected={} already_stored={} inserted={} failed={} duration={}ms",
            self.pages,
            self.collected,
            self.already_stored,
            self.inserted,
            self.failed,
            (self.finished_at - self.started_at).num_milliseconds()
        )?;
        if let Some(e) = &self.search_error {
            write!(f, " search_error=\"{e}\"")?;
        }
        Ok(())
    }
}

/// One harvest: walk the search, project, drop what is already stored, insert the rest.
pub struct Harvester<S, T> {
    search: S,
    store: T,
    query: String,
}

impl<S: TweetSearch, T: TweetStore> Harvester<S, T> {
    pub fn new(search: S, store: T) -> Self {
        Self {
            search,
            store,
            query: SEARCH_TERM.to_string(),
        }
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Execute a run. Never fails: every external error is logged where it
    /// happens and the run carries on with what it has.
    pub async fn run(&self) -> RunStats {
        let started_at = Utc::now();
        info!(%started_at, query = %self.query, "Harvest run started");

        let walk = PageWalker::new(&self.search).collect(&self.query).await;
        let search_error = walk.error.as_ref().map(|e| e.to_string());
        if let Some(e) = &walk.error {
            error!(
                error = %e,
                kept = walk.posts.len(),
                "Search aborted, persisting what was collected"
            );
        }

        let pages = walk.pages;
        let collected = walk.posts.len();
        let records: Vec<_> = walk.posts.into_iter().map(project).collect();

        let existing = load_existing(&self.store).await;
        let novel = filter_novel(records, &existing);
        let already_stored = collected - novel.len();

        let report = persist(&self.store, &novel).await;

        let stats = RunStats {
            started_at,
            finished_at: Utc::now(),
            pages,
            collected,
            search_error,
            already_stored,
            inserted: report.inserted,
            failed: report.failed,
        };
        info!(finished_at = %stats.finished_at, "Harvest run completed. {stats}");
        stats
    }
}
