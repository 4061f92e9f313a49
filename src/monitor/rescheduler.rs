use crate::config::PollerConfig;
use crate::monitor::resource::Resource;
use std::time::Duration;
use tokio::sync::mpsc;

/// Computes how long a resource waits before its next probe
///
/// `poll_interval + err_timeout * consecutive_errors`. The backoff is linear
/// and has no ceiling; saturating arithmetic only keeps extreme streaks from
/// overflowing `Duration`.
pub fn reschedule_delay(config: &PollerConfig, consecutive_errors: u32) -> Duration {
    config
        .poll_interval()
        .saturating_add(config.err_timeout().saturating_mul(consecutive_errors))
}

/// Waits out `delay`, then hands `resource` back to the pending queue
///
/// If the pending queue has closed the resource cannot be delivered; that is
/// only expected while the runtime shuts down.
pub async fn reschedule(resource: Resource, delay: Duration, pending: mpsc::Sender<Resource>) {
    tokio::time::sleep(delay).await;

    if let Err(mpsc::error::SendError(resource)) = pending.send(resource).await {
        tracing::error!(
            "Pending queue closed, dropping {} from the polling loop",
            resource.url()
        );
    }
}
