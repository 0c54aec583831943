//! `herald-scheduler` — per-job timers, dispatch, and completion tracking.
//!
//! # Overview
//!
//! Each resolved job becomes one Tokio timer, armed after the transport
//! reports ready. A job's time of day is converted into an absolute fire
//! instant (today, or tomorrow if the time has already passed) by
//! [`schedule::next_fire_instant`]. When the timer elapses the dispatcher
//! sends the job's message to every recipient, isolating per-recipient
//! failures, and the [`ledger::TimerLedger`] records the job as fully
//! discharged. The run coordinator awaits the ledger draining to zero to
//! terminate the process.

pub mod dispatch;
pub mod engine;
pub mod ledger;
pub mod schedule;

pub use dispatch::{dispatch_job, DispatchOutcome};
pub use engine::SchedulerEngine;
pub use ledger::TimerLedger;
pub use schedule::next_fire_instant;
