use std::collections::HashSet;

use tracing::{info, warn};

use crate::codec;
use crate::traits::TweetStore;
use crate::types::StoredRecord;

/// Read every stored id and decode it to the source id space.
///
/// A failed read is logged and yields an empty set, so the run still attempts
/// its inserts; the primary key rejects anything that was already there.
pub async fn load_existing<T: TweetStore + ?Sized>(store: &T) -> HashSet<u64> {
    match store.stored_ids().await {
        Ok(ids) => {
            let existing: HashSet<u64> = ids.into_iter().map(codec::decode).collect();
            info!(count = existing.len(), "Loaded stored tweet ids");
            existing
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored tweet ids, continuing with none");
            HashSet::new()
        }
    }
}

/// Keep the candidates whose id is not yet stored, preserving order.
pub fn filter_novel(candidates: Vec<StoredRecord>, existing: &HashSet<u64>) -> Vec<StoredRecord> {
    candidates
        .into_iter()
        .filter(|record| !existing.contains(&record.id))
        .collect()
}
