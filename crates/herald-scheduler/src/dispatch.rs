use std::time::Duration;

use tracing::{info, warn};

use herald_jobs::ResolvedJob;
use herald_transport::{Transport, TransportError};

/// Per-recipient accounting for one dispatched job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sent: usize,
    pub failed: usize,
}

/// Send `job`'s message to every resolved recipient, in order.
///
/// Failures are isolated per recipient: one failed send never prevents the
/// remaining attempts, and nothing is retried. Each outcome is logged in
/// issuance order. `send_timeout` of `None` waits indefinitely on a hung
/// send (the original behaviour).
pub async fn dispatch_job(
    transport: &dyn Transport,
    job: &ResolvedJob,
    send_timeout: Option<Duration>,
) -> DispatchOutcome {
    info!(
        message = %job.label(),
        recipients = job.recipients.len(),
        "dispatching job"
    );

    let mut outcome = DispatchOutcome { sent: 0, failed: 0 };
    for recipient in &job.recipients {
        let result = match send_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, transport.send(&recipient.phone, &job.message))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::Timeout {
                        ms: limit.as_millis() as u64,
                    }),
                }
            }
            None => transport.send(&recipient.phone, &job.message).await,
        };

        match result {
            Ok(receipt) => {
                outcome.sent += 1;
                info!(
                    recipient = %recipient.id,
                    phone = %recipient.phone,
                    status = %receipt.status,
                    "message delivered"
                );
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(
                    recipient = %recipient.id,
                    phone = %recipient.phone,
                    error = %e,
                    "message not delivered"
                );
            }
        }
    }
    outcome
}
