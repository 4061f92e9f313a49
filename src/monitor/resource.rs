use crate::monitor::prober::{Probe, ProbeOutcome};

/// A monitored URL and its current failure streak
///
/// Exactly one stage of the loop owns a `Resource` at any time: the pending
/// queue, a prober, the completed queue, or a sleeping rescheduler. It is
/// moved between them, never cloned.
#[derive(Debug, PartialEq, Eq)]
pub struct Resource {
    url: String,
    consecutive_errors: u32,
}

impl Resource {
    /// Creates a resource with a clean failure streak
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            consecutive_errors: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of probes that have failed in a row
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Probes this resource once and returns the status string to record
    ///
    /// A response of any kind resets the failure streak. A transport error
    /// extends it by one and is reported as the error's text.
    pub async fn poll<P: Probe>(&mut self, prober: &P) -> String {
        match prober.probe(&self.url).await {
            ProbeOutcome::Responded(status) => {
                self.record_success();
                status
            }
            ProbeOutcome::Failed(error) => {
                tracing::warn!("Error probing {}: {}", self.url, error);
                self.record_failure();
                error
            }
        }
    }

    fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    fn record_failure(&mut self) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }
}
