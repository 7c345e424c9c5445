use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{RefreshContext, RefreshJob, RefreshOutcome};

/// One tokio task per job, each on its own interval.
pub struct RefreshScheduler {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl RefreshScheduler {
    /// Starts every job. With `run_on_start` the first run happens immediately, otherwise
    /// after one full interval.
    pub fn spawn(ctx: RefreshContext, jobs: &[Arc<dyn RefreshJob>], run_on_start: bool) -> Self {
        let tasks = jobs
            .iter()
            .map(|job| {
                let job = Arc::clone(job);
                let ctx = ctx.clone();
                let name = job.name();
                let period = job.interval();

                let task = tokio::spawn(async move {
                    let start = if run_on_start {
                        time::Instant::now()
                    } else {
                        time::Instant::now() + period
                    };
                    let mut ticker = time::interval_at(start, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                    loop {
                        ticker.tick().await;
                        Self::run_once(job.as_ref(), &ctx).await;
                    }
                });

                info!(job = name, interval = ?period, run_on_start, "Refresh job scheduled");
                (name, task)
            })
            .collect();

        Self { tasks }
    }

    /// Runs `job` a single time and logs the outcome.
    pub async fn run_once(job: &dyn RefreshJob, ctx: &RefreshContext) -> RefreshOutcome {
        let started = Instant::now();
        debug!(job = job.name(), "Refresh started");

        let outcome = job.run(ctx).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &outcome {
            RefreshOutcome::Fresh { rows } => {
                info!(job = job.name(), rows, elapsed_ms, "Refresh complete");
            }
            RefreshOutcome::Fallback { rows } => {
                info!(job = job.name(), rows, elapsed_ms, "Refresh stored fallback");
            }
            RefreshOutcome::KeptStale => {
                info!(job = job.name(), elapsed_ms, "Refresh kept stale cache");
            }
            RefreshOutcome::Failed { reason } => {
                warn!(job = job.name(), %reason, elapsed_ms, "Refresh failed");
            }
        }
        outcome
    }

    pub fn job_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tasks.iter().map(|(name, _)| *name)
    }

    /// Aborts every job task. A run in flight is dropped at its next await point; cache
    /// replacement is transactional, so nothing is left half-written.
    pub fn shutdown(self) {
        for (name, task) in self.tasks {
            task.abort();
            debug!(job = name, "Refresh job stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RefreshJob for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn interval(&self) -> Duration {
            Duration::from_secs(60)
        }

        async fn run(&self, _ctx: &RefreshContext) -> RefreshOutcome {
            self.runs.fetch_add(1, Ordering::SeqCst);
            RefreshOutcome::KeptStale
        }
    }

    #[tokio::test]
    async fn runs_on_start_then_every_interval() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let db_path = std::env::temp_dir().join(format!(
            "onair-scheduler-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let db = crate::db::spawn(&format!("sqlite:{}", db_path.display())).await;
        let sources = crate::sources::Sources::new(&crate::config::Config::default()).unwrap();
        let ctx = RefreshContext { db, sources };

        // The counting job never touches the database, so virtual time is safe from here on.
        tokio::time::pause();

        let runs = Arc::new(AtomicUsize::new(0));
        let jobs: Vec<Arc<dyn RefreshJob>> = vec![Arc::new(Counting { runs: runs.clone() })];
        let scheduler = RefreshScheduler::spawn(ctx, &jobs, true);
        assert_eq!(scheduler.job_names().collect::<Vec<_>>(), ["counting"]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        scheduler.shutdown();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        let _ = std::fs::remove_file(&db_path);
    }
}
