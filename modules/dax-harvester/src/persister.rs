use tracing::{info, warn};

use crate::traits::TweetStore;
use crate::types::StoredRecord;

/// Counts from one persistence pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersistReport {
    pub inserted: usize,
    pub failed: usize,
}

/// Insert each record on its own. A failed insert is logged and skipped; the
/// rest still go through.
pub async fn persist<T: TweetStore + ?Sized>(store: &T, records: &[StoredRecord]) -> PersistReport {
    let mut report = PersistReport::default();

    for record in records {
        match store.insert(record).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                warn!(tweet_id = record.id, error = %e, "Failed to insert tweet");
                report.failed += 1;
            }
        }
    }

    info!(
        inserted = report.inserted,
        failed = report.failed,
        "Persisted new tweets"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::project;
    use crate::testing::{raw_post, MockStore};

    #[tokio::test]
    async fn failure_is_isolated() {
        let store = MockStore::new().failing_insert(2);
        let records: Vec<_> = [1, 2, 3].into_iter().map(|id| project(raw_post(id))).collect();

        let report = persist(&store, &records).await;

        assert_eq!(report, PersistReport { inserted: 2, failed: 1 });
        assert_eq!(store.insert_attempts(), vec![1, 2, 3]);
        assert_eq!(store.stored(), vec![1, 3]);
    }

    #[tokio::test]
    async fn duplicate_key_is_swallowed() {
        let store = MockStore::new().with_stored(&[8]);
        let records = vec![project(raw_post(8)), project(raw_post(9))];

        let report = persist(&store, &records).await;

        assert_eq!(report, PersistReport { inserted: 1, failed: 1 });
        assert_eq!(store.stored(), vec![8, 9]);
    }

    #[tokio::test]
    async fn nothing_to_do() {
        let store = MockStore::new();
        assert_eq!(persist(&store, &[]).await, PersistReport::default());
        assert!(store.insert_attempts().is_empty());
    }
}
