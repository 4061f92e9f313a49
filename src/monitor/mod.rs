//! Monitor module: the self-sustaining polling loop
//!
//! This module contains the core of urlpoll:
//! - Resources, the single-owner work tokens passed between stages
//! - The probe transport and its reqwest implementation
//! - The status table actor and its periodic snapshot log
//! - The rescheduler that applies linear failure backoff
//! - The prober pool and the dispatcher that closes the loop

mod dispatcher;
mod pool;
mod prober;
mod rescheduler;
mod resource;
mod status;

pub use dispatcher::{run_monitor, Dispatcher};
pub use pool::{spawn_pool, SharedReceiver};
pub use prober::{build_http_client, HttpProber, Probe, ProbeOutcome};
pub use rescheduler::{reschedule, reschedule_delay};
pub use resource::Resource;
pub use status::{StatusHandle, StatusRecord, StatusTable};
