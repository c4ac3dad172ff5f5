// Test doubles for the harvest run.
//
// - MockSearch (TweetSearch): scripted pages, records every request
// - MockStore (TweetStore): in-memory table with a primary key, injectable failures
//
// Plus helpers for building posts and pages.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::codec;
use crate::error::{HarvestError, Result};
use crate::traits::{SearchRequest, TweetSearch, TweetStore};
use crate::types::{RawPost, StoredRecord};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A plausible post with the given id.
pub fn raw_post(id: u64) -> RawPost {
    RawPost {
        id,
        created_at: Utc.with_ymd_and_hms(2019, 3, 14, 9, 45, 0).unwrap(),
        screen_name: format!("trader{id}"),
        location: "Frankfurt".to_string(),
        verified: false,
        follower_count: 250,
        text: format!("#DAX update {id}"),
        full_text: format!("#DAX update {id} with the long version"),
        retweeted: false,
        retweet_count: 0,
        favorite_count: Some(1),
        hashtags: vec!["DAX".to_string()],
    }
}

/// A page of posts for every id in `ids`, newest first like the API.
pub fn page(ids: Range<u64>) -> Vec<RawPost> {
    ids.rev().map(raw_post).collect()
}

// ---------------------------------------------------------------------------
// MockSearch
// ---------------------------------------------------------------------------

enum Step {
    Page(Vec<RawPost>),
    Fail(String),
}

/// Serves scripted steps in order, then empty pages forever.
/// Builder pattern: `.then_page()`, `.then_fail()`.
pub struct MockSearch {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then_page(self, posts: Vec<RawPost>) -> Self {
        self.steps.lock().unwrap().push_back(Step::Page(posts));
        self
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Fail(message.to_string()));
        self
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TweetSearch for MockSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawPost>> {
        self.requests.lock().unwrap().push(request.clone());
        match self.steps.lock().unwrap().pop_front() {
            Some(Step::Page(posts)) => Ok(posts),
            Some(Step::Fail(message)) => Err(HarvestError::Other(anyhow::anyhow!(
                "MockSearch: {message}"
            ))),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// In-memory `dax_tweets`. Keyed by storage id, so a second insert of the
/// same tweet fails like a primary-key violation.
pub struct MockStore {
    rows: Mutex<BTreeMap<i64, StoredRecord>>,
    insert_attempts: Mutex<Vec<u64>>,
    fail_reads: bool,
    fail_inserts: HashSet<u64>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            insert_attempts: Mutex::new(Vec::new()),
            fail_reads: false,
            fail_inserts: HashSet::new(),
        }
    }

    /// Pre-populate with records for these ids.
    pub fn with_stored(self, ids: &[u64]) -> Self {
        {
            let mut rows = self.rows.lock().unwrap();
            for &id in ids {
                rows.insert(codec::encode(id), crate::projector::project(raw_post(id)));
            }
        }
        self
    }

    /// Make `stored_ids` fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make inserts of this id fail.
    pub fn failing_insert(mut self, id: u64) -> Self {
        self.fail_inserts.insert(id);
        self
    }

    /// Ids passed to `insert`, successful or not, in call order.
    pub fn insert_attempts(&self) -> Vec<u64> {
        self.insert_attempts.lock().unwrap().clone()
    }

    /// Ids currently stored, ascending.
    pub fn stored(&self) -> Vec<u64> {
        self.rows
            .lock()
            .unwrap()
            .keys()
            .map(|&k| codec::decode(k))
            .collect()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TweetStore for MockStore {
    async fn stored_ids(&self) -> Result<Vec<i64>> {
        if self.fail_reads {
            return Err(HarvestError::Other(anyhow::anyhow!(
                "MockStore: connection refused"
            )));
        }
        Ok(self.rows.lock().unwrap().keys().copied().collect())
    }

    async fn insert(&self, record: &StoredRecord) -> Result<()> {
        self.insert_attempts.lock().unwrap().push(record.id);
        if self.fail_inserts.contains(&record.id) {
            return Err(HarvestError::Other(anyhow::anyhow!(
                "MockStore: injected failure for {}",
                record.id
            )));
        }

        let mut rows = self.rows.lock().unwrap();
        let key = codec::encode(record.id);
        if rows.contains_key(&key) {
            return Err(HarvestError::Other(anyhow::anyhow!(
                "MockStore: duplicate key {}",
                record.id
            )));
        }
        rows.insert(key, record.clone());
        Ok(())
    }
}
