//! Periodic trigger using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (0 45 * * * *)
//!     │
//!     └─► Harvester::run()   (skipped if the previous run is still going)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::harvest::{Harvester, RunStats};
use crate::traits::{TweetSearch, TweetStore};

/// Start the harvest job on `schedule` (six-field cron, seconds first).
pub async fn start_scheduler<S, T>(harvester: Arc<Harvester<S, T>>, schedule: &str) -> Result<JobScheduler>
where
    S: TweetSearch + 'static,
    T: TweetStore + 'static,
{
    let scheduler = JobScheduler::new().await?;
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let harvester = harvester.clone();
        let running = running.clone();
        Box::pin(async move {
            run_exclusive(harvester.as_ref(), running.as_ref()).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!(schedule, "Harvest scheduler started");
    Ok(scheduler)
}

/// Run unless another run holds `running`.
pub(crate) async fn run_exclusive<S, T>(
    harvester: &Harvester<S, T>,
    running: &AtomicBool,
) -> Option<RunStats>
where
    S: TweetSearch,
    T: TweetStore,
{
    if running
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        warn!("Previous harvest run still in progress, skipping this tick");
        return None;
    }

    let _release = Release(running);
    Some(harvester.run().await)
}

/// Clears the in-flight flag when dropped, including on unwind.
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
