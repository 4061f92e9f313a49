//! Prober pool
//!
//! A fixed number of workers share the pending queue. Each worker takes one
//! resource at a time, probes it, reports the outcome to the status table,
//! and passes the resource on to the completed queue.

use crate::monitor::prober::Probe;
use crate::monitor::resource::Resource;
use crate::monitor::status::{StatusHandle, StatusRecord};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// Pending queue receiver shared by all workers
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<Resource>>>;

/// Spawns `count` prober workers
///
/// Workers run until the pending queue closes or the completed queue can no
/// longer accept resources.
pub fn spawn_pool<P>(
    count: usize,
    pending: SharedReceiver,
    completed: mpsc::Sender<Resource>,
    status: StatusHandle,
    prober: Arc<P>,
) -> Vec<JoinHandle<()>>
where
    P: Probe + Send + Sync + 'static,
{
    (0..count)
        .map(|id| {
            tokio::spawn(run_prober(
                id,
                pending.clone(),
                completed.clone(),
                status.clone(),
                prober.clone(),
            ))
        })
        .collect()
}

async fn run_prober<P>(
    id: usize,
    pending: SharedReceiver,
    completed: mpsc::Sender<Resource>,
    status: StatusHandle,
    prober: Arc<P>,
) where
    P: Probe + Send + Sync + 'static,
{
    tracing::debug!("Prober {} started", id);

    loop {
        // Only the waiting worker holds the lock; it is released before probing
        let next = pending.lock().await.recv().await;
        let Some(mut resource) = next else {
            break;
        };

        let outcome = resource.poll(prober.as_ref()).await;
        tracing::debug!(
            "Prober {}: {} -> {} ({} consecutive errors)",
            id,
            resource.url(),
            outcome,
            resource.consecutive_errors()
        );

        if !status.update(StatusRecord::new(resource.url(), outcome)).await {
            tracing::warn!("Status table is gone, status for {} not recorded", resource.url());
        }

        if let Err(mpsc::error::SendError(resource)) = completed.send(resource).await {
            tracing::error!(
                "Completed queue closed, prober {} stopping with {} in hand",
                id,
                resource.url()
            );
            return;
        }
    }

    tracing::debug!("Prober {} stopped: pending queue closed", id);
}
