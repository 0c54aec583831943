//! The run coordinator — owns the process state machine.
//!
//! Load → resolve → connect → await ready → arm → drain, in that order.
//! Validators stay pure; this module is the only place that turns their
//! failures into a process exit.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{info, warn};

use herald_core::{HeraldConfig, HeraldError};
use herald_jobs::ResolvedJob;
use herald_scheduler::{SchedulerEngine, TimerLedger};
use herald_transport::whatsapp::WhatsAppConfig;
use herald_transport::{Transport, TransportEvent, WhatsAppTransport};

use crate::io;

/// Why the process is terminating cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Every armed job has fully dispatched.
    Drained,
    /// "exit" received on the control input.
    UserExit,
    /// SIGINT.
    Interrupted,
}

impl ExitReason {
    pub fn exit_code(self) -> i32 {
        match self {
            ExitReason::Drained | ExitReason::UserExit => 0,
            ExitReason::Interrupted => 2,
        }
    }
}

/// Execute one full run. Returns how the process should exit; every fatal
/// failure propagates as a [`HeraldError`] instead of exiting from deep
/// inside a subsystem.
pub async fn run(config: HeraldConfig) -> Result<ExitReason, HeraldError> {
    // Loading: directory and catalog are built once, then shared read-only.
    let directory = io::load_phonebook(&config.inputs.phonebook)?;
    let catalog = io::load_catalog(&config.inputs.messages)?;
    let raw_jobs = io::load_jobs(&config.inputs.jobs)?;

    // Resolving: all-or-nothing — a partial job list is never scheduled.
    let mut jobs: Vec<ResolvedJob> = Vec::with_capacity(raw_jobs.len());
    for raw in &raw_jobs {
        let job = herald_jobs::resolve(raw, &directory, &catalog).map_err(|e| {
            HeraldError::Validation {
                code: e.code(),
                reason: e.to_string(),
            }
        })?;
        jobs.push(job);
    }
    info!(count = jobs.len(), "jobs resolved");

    // Connect the transport; arming waits for its ready event.
    let mut transport = WhatsAppTransport::new(WhatsAppConfig {
        access_token: config.transport.access_token.clone(),
        phone_number_id: config.transport.phone_number_id.clone(),
        base_url: config.transport.base_url.clone(),
    });
    let events = transport
        .connect()
        .await
        .map_err(|e| HeraldError::TransportConnect(e.to_string()))?;
    info!(transport = transport.name(), "transport connected");
    let transport: Arc<dyn Transport> = Arc::new(transport);

    let ledger = Arc::new(TimerLedger::new());
    let send_timeout = match config.transport.send_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let engine = SchedulerEngine::new(Arc::clone(&transport), Arc::clone(&ledger), send_timeout);

    let exit_rx = spawn_exit_listener();

    supervise(engine, ledger, jobs, events, exit_rx).await
}

/// Drive the armed phase: react to transport events, the control input,
/// SIGINT, and the ledger draining.
async fn supervise(
    engine: SchedulerEngine,
    ledger: Arc<TimerLedger>,
    mut jobs: Vec<ResolvedJob>,
    mut events: mpsc::Receiver<TransportEvent>,
    mut exit_rx: mpsc::Receiver<()>,
) -> Result<ExitReason, HeraldError> {
    let mut armed = false;
    let mut events_open = true;
    let mut exit_open = true;

    loop {
        tokio::select! {
            maybe = events.recv(), if events_open => match maybe {
                Some(TransportEvent::Ready) if !armed => {
                    info!("initial sync complete; arming jobs");
                    let count = engine.arm_all(std::mem::take(&mut jobs));
                    ledger.seal();
                    info!(jobs = count, live = ledger.live(), "all jobs armed");
                    armed = true;
                }
                Some(TransportEvent::Ready) => {}
                Some(TransportEvent::ContactsReceived(contacts)) => {
                    info!(count = contacts.len(), "contacts received");
                }
                Some(TransportEvent::Closed { reason }) => {
                    if armed {
                        warn!(%reason, "transport connection closed");
                    } else {
                        return Err(HeraldError::TransportConnect(reason));
                    }
                }
                None => {
                    if !armed {
                        return Err(HeraldError::Internal(
                            "transport event stream ended before ready".to_string(),
                        ));
                    }
                    events_open = false;
                }
            },
            _ = ledger.drained(), if armed => {
                info!("all jobs finished");
                return Ok(ExitReason::Drained);
            }
            maybe = exit_rx.recv(), if exit_open => match maybe {
                Some(()) => {
                    info!("exit requested on control input");
                    return Ok(ExitReason::UserExit);
                }
                // stdin closed (e.g. detached run); keep going without it.
                None => exit_open = false,
            },
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupt received");
                return Ok(ExitReason::Interrupted);
            }
        }
    }
}

/// Watch stdin for the single textual command `exit`.
fn spawn_exit_listener() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim() == "exit" {
                let _ = tx.send(()).await;
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use herald_directory::ContactRecord;
    use herald_transport::{SendReceipt, TransportError};

    #[derive(Default)]
    struct StubTransport;

    #[async_trait]
    impl Transport for StubTransport {
        fn name(&self) -> &str {
            "stub"
        }

        async fn connect(&mut self) -> Result<mpsc::Receiver<TransportEvent>, TransportError> {
            let (tx, rx) = mpsc::channel(1);
            let _ = tx.try_send(TransportEvent::Ready);
            Ok(rx)
        }

        async fn send(&self, _address: &str, _text: &str) -> Result<SendReceipt, TransportError> {
            Ok(SendReceipt {
                message_id: "wamid.stub".to_string(),
                status: "accepted".to_string(),
            })
        }
    }

    fn harness() -> (
        SchedulerEngine,
        Arc<TimerLedger>,
        mpsc::Sender<TransportEvent>,
        mpsc::Receiver<TransportEvent>,
        mpsc::Sender<()>,
        mpsc::Receiver<()>,
    ) {
        let transport: Arc<dyn Transport> = Arc::new(StubTransport);
        let ledger = Arc::new(TimerLedger::new());
        let engine = SchedulerEngine::new(transport, Arc::clone(&ledger), None);
        let (ev_tx, ev_rx) = mpsc::channel(4);
        let (exit_tx, exit_rx) = mpsc::channel(1);
        (engine, ledger, ev_tx, ev_rx, exit_tx, exit_rx)
    }

    #[test]
    fn exit_codes_follow_the_contract() {
        assert_eq!(ExitReason::Drained.exit_code(), 0);
        assert_eq!(ExitReason::UserExit.exit_code(), 0);
        assert_eq!(ExitReason::Interrupted.exit_code(), 2);
    }

    #[tokio::test]
    async fn missing_inputs_fail_before_connecting() {
        let mut config = HeraldConfig::default();
        config.inputs.phonebook = "/nonexistent/phonebook.csv".to_string();
        let err = run(config).await.unwrap_err();
        assert!(matches!(err, HeraldError::ConfigMissing { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn ready_event_arms_and_drains() {
        let (engine, ledger, ev_tx, ev_rx, _exit_tx, exit_rx) = harness();

        // Contact sync before ready is logged, not acted on.
        ev_tx.send(TransportEvent::ContactsReceived(vec![ContactRecord::remote(
            "Synced",
            "628999999999",
        )]))
        .await
        .unwrap();
        ev_tx.send(TransportEvent::Ready).await.unwrap();

        let reason = tokio::time::timeout(
            Duration::from_secs(2),
            supervise(engine, ledger, Vec::new(), ev_rx, exit_rx),
        )
        .await
        .expect("supervise should drain")
        .unwrap();
        assert_eq!(reason, ExitReason::Drained);
    }

    #[tokio::test]
    async fn closed_before_ready_is_fatal() {
        let (engine, ledger, ev_tx, ev_rx, _exit_tx, exit_rx) = harness();
        ev_tx.send(TransportEvent::Closed {
            reason: "auth expired".to_string(),
        })
        .await
        .unwrap();

        let err = supervise(engine, ledger, Vec::new(), ev_rx, exit_rx)
            .await
            .unwrap_err();
        assert!(matches!(err, HeraldError::TransportConnect(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn control_exit_terminates_with_success() {
        let (engine, ledger, _ev_tx, ev_rx, exit_tx, exit_rx) = harness();
        exit_tx.send(()).await.unwrap();

        let reason = supervise(engine, ledger, Vec::new(), ev_rx, exit_rx)
            .await
            .unwrap();
        assert_eq!(reason, ExitReason::UserExit);
    }

    #[tokio::test]
    async fn event_stream_ending_before_ready_is_internal() {
        let (engine, ledger, ev_tx, ev_rx, _exit_tx, exit_rx) = harness();
        drop(ev_tx);

        let err = supervise(engine, ledger, Vec::new(), ev_rx, exit_rx)
            .await
            .unwrap_err();
        assert!(matches!(err, HeraldError::Internal(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
