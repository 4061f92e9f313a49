//! Probe transport
//!
//! This module defines the seam between the polling loop and the network:
//! - The `Probe` trait, one header-only liveness check per call
//! - `HttpProber`, the reqwest implementation issuing HEAD requests
//! - Client construction with the configured user agent
//!
//! Timeouts and redirect handling are left at the reqwest defaults.

use reqwest::Client;
use std::future::Future;

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered; holds the status line (e.g. "200 OK")
    Responded(String),

    /// No response was obtained; holds the transport error text
    Failed(String),
}

/// A liveness check against a URL
///
/// Implementations never fail in the `Result` sense: transport problems are
/// reported as [`ProbeOutcome::Failed`] so that one bad URL cannot disturb
/// the rest of the loop.
pub trait Probe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Builds the HTTP client used for probing
///
/// # Arguments
///
/// * `user_agent` - Value of the User-Agent header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use urlpoll::monitor::build_http_client;
///
/// let client = build_http_client("urlpoll/0.1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(user_agent).build()
}

/// Probes URLs with HTTP HEAD requests
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProber {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send {
        let request = self.client.head(url);

        async move {
            match request.send().await {
                // StatusCode displays as "<code> <canonical reason>"
                Ok(response) => ProbeOutcome::Responded(response.status().to_string()),
                Err(e) => ProbeOutcome::Failed(e.to_string()),
            }
        }
    }
}
