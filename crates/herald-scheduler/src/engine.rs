use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info};

use herald_jobs::ResolvedJob;
use herald_transport::Transport;

use crate::dispatch::dispatch_job;
use crate::ledger::TimerLedger;
use crate::schedule::next_fire_instant;

/// Arms one Tokio timer per resolved job and hands fired jobs to the
/// dispatcher.
///
/// The ledger is incremented before each timer task is spawned, and all
/// jobs are armed synchronously before the caller seals the ledger, so the
/// drain cannot fire while arming is still in progress.
pub struct SchedulerEngine {
    transport: Arc<dyn Transport>,
    ledger: Arc<TimerLedger>,
    send_timeout: Option<Duration>,
}

impl SchedulerEngine {
    pub fn new(
        transport: Arc<dyn Transport>,
        ledger: Arc<TimerLedger>,
        send_timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            ledger,
            send_timeout,
        }
    }

    /// Arm every job. Returns the number of timers set.
    pub fn arm_all(&self, jobs: Vec<ResolvedJob>) -> usize {
        let mut armed = 0;
        for job in jobs {
            if self.arm(job) {
                armed += 1;
            }
        }
        armed
    }

    /// Arm one job at its next fire instant in local time.
    pub fn arm(&self, job: ResolvedJob) -> bool {
        let now = Local::now();
        let Some(fire_at) = next_fire_instant(job.hour, job.minute, now) else {
            // Only reachable when HH:MM falls into a DST gap today.
            error!(
                message = %job.label(),
                hour = job.hour,
                minute = job.minute,
                "fire time does not exist in the local time zone; job not armed"
            );
            return false;
        };

        let delay = (fire_at - now).to_std().unwrap_or(Duration::ZERO);
        let live = self.ledger.arm();
        info!(
            message = %job.label(),
            fire_at = %fire_at.format("%d-%m-%Y %H:%M:%S %z"),
            live,
            "job scheduled"
        );
        self.spawn_timer(job, delay);
        true
    }

    /// Spawn the timer task for one armed job. The ledger entry must
    /// already exist.
    fn spawn_timer(&self, job: ResolvedJob, delay: Duration) {
        let transport = Arc::clone(&self.transport);
        let ledger = Arc::clone(&self.ledger);
        let send_timeout = self.send_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(message = %job.label(), "job timer fired");

            let outcome = dispatch_job(transport.as_ref(), &job, send_timeout).await;

            let live = ledger.complete();
            info!(
                message = %job.label(),
                sent = outcome.sent,
                failed = outcome.failed,
                live,
                "job dispatch complete"
            );
        });
    }
}
