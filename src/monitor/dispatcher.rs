//! Dispatcher - the main polling loop
//!
//! This module wires the monitor together:
//! - Creates the pending and completed queues
//! - Starts the status table and the prober pool
//! - Seeds the pending queue with one resource per URL
//! - Launches a rescheduler for every resource leaving the pool
//!
//! The loop is closed: a resource that enters it is never removed.

use crate::config::{Config, PollerConfig};
use crate::monitor::pool::spawn_pool;
use crate::monitor::prober::{build_http_client, HttpProber, Probe};
use crate::monitor::rescheduler::{reschedule, reschedule_delay};
use crate::monitor::resource::Resource;
use crate::monitor::status::{StatusHandle, StatusTable};
use crate::urls::load_urls;
use crate::PollError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Capacity of the pending and completed queues
const QUEUE_CAPACITY: usize = 1;

/// Orchestrates the polling loop
pub struct Dispatcher<P> {
    config: PollerConfig,
    prober: Arc<P>,
    status_table: StatusTable,
    status: StatusHandle,
}

impl<P> Dispatcher<P>
where
    P: Probe + Send + Sync + 'static,
{
    /// Creates a dispatcher; nothing runs until [`Dispatcher::run`]
    pub fn new(config: PollerConfig, prober: P) -> Self {
        let (status_table, status) = StatusTable::new(config.status_interval());

        Self {
            config,
            prober: Arc::new(prober),
            status_table,
            status,
        }
    }

    /// A handle onto the status table this dispatcher feeds
    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Runs the polling loop over `urls`
    ///
    /// Under normal operation this never returns. An error means the
    /// completed queue closed, which only happens if every prober stopped.
    pub async fn run(self, urls: Vec<String>) -> Result<(), PollError> {
        let Self {
            config,
            prober,
            status_table,
            status,
        } = self;

        let (pending_tx, pending_rx) = mpsc::channel::<Resource>(QUEUE_CAPACITY);
        let (completed_tx, mut completed_rx) = mpsc::channel::<Resource>(QUEUE_CAPACITY);

        tokio::spawn(status_table.run());

        spawn_pool(
            config.num_pollers,
            Arc::new(Mutex::new(pending_rx)),
            completed_tx,
            status,
            prober,
        );

        tracing::info!(
            "Polling {} URLs with {} probers (interval {:?}, backoff {:?} per error)",
            urls.len(),
            config.num_pollers,
            config.poll_interval(),
            config.err_timeout()
        );

        // Seeding runs beside the loop: the queues are too small to take every URL up front
        let seed_tx = pending_tx.clone();
        tokio::spawn(async move {
            for url in urls {
                if seed_tx.send(Resource::new(url)).await.is_err() {
                    tracing::error!("Pending queue closed while seeding");
                    break;
                }
            }
        });

        while let Some(resource) = completed_rx.recv().await {
            let delay = reschedule_delay(&config, resource.consecutive_errors());
            tracing::trace!("Rescheduling {} in {:?}", resource.url(), delay);
            tokio::spawn(reschedule(resource, delay, pending_tx.clone()));
        }

        Err(PollError::QueueClosed { queue: "completed" })
    }
}

/// Runs the monitor described by `config`
///
/// Loads the URL list and builds the HTTP client before the first probe;
/// either failing aborts startup.
///
/// # Example
///
/// ```no_run
/// use urlpoll::config::load_config;
/// use urlpoll::monitor::run_monitor;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("urlpoll.toml"))?;
/// run_monitor(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_monitor(config: Config) -> Result<(), PollError> {
    let urls = load_urls(Path::new(&config.input.urls_filepath))?;
    tracing::info!(
        "Loaded {} URLs from {}",
        urls.len(),
        config.input.urls_filepath
    );

    let client = build_http_client(&config.poller.user_agent())?;
    let dispatcher = Dispatcher::new(config.poller, HttpProber::new(client));

    dispatcher.run(urls).await
}
