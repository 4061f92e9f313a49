//! Status table actor
//!
//! One task owns the map from URL to last-known status. Probers send it
//! `StatusRecord`s through a `StatusHandle`; on every tick of its interval it
//! logs the whole map. Nothing outside the task touches the map directly:
//! snapshots are requested over the same channel and answered by the actor.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Status channel capacity; producers block while the table is busy
const STATUS_QUEUE_CAPACITY: usize = 1;

/// Outcome of one probe, as reported to the status table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub url: String,
    pub status: String,
}

impl StatusRecord {
    pub fn new(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: status.into(),
        }
    }
}

/// Messages accepted by the status table task
#[derive(Debug)]
enum StatusMessage {
    Update(StatusRecord),
    Snapshot(oneshot::Sender<HashMap<String, String>>),
}

/// Cloneable write side of the status table
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: mpsc::Sender<StatusMessage>,
}

impl StatusHandle {
    /// Sends a record to the table, waiting if the table is busy
    ///
    /// Returns `false` if the table task is gone.
    pub async fn update(&self, record: StatusRecord) -> bool {
        self.tx.send(StatusMessage::Update(record)).await.is_ok()
    }

    /// Asks the table for a copy of its current contents
    ///
    /// Returns `None` if the table task is gone.
    pub async fn snapshot(&self) -> Option<HashMap<String, String>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StatusMessage::Snapshot(reply_tx))
            .await
            .ok()?;
        reply_rx.await.ok()
    }
}

/// Single owner of the latest status per URL
pub struct StatusTable {
    statuses: HashMap<String, String>,
    interval: Duration,
    rx: mpsc::Receiver<StatusMessage>,
}

impl StatusTable {
    /// Creates a table that logs a snapshot every `interval`
    ///
    /// The table does nothing until [`StatusTable::run`] is spawned.
    pub fn new(interval: Duration) -> (Self, StatusHandle) {
        let (tx, rx) = mpsc::channel(STATUS_QUEUE_CAPACITY);
        let table = Self {
            statuses: HashMap::new(),
            interval,
            rx,
        };
        (table, StatusHandle { tx })
    }

    /// Runs the table until every handle has been dropped
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately; skip the empty snapshot
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.log_snapshot(),
                message = self.rx.recv() => match message {
                    Some(StatusMessage::Update(record)) => self.merge(record),
                    Some(StatusMessage::Snapshot(reply)) => {
                        let _ = reply.send(self.statuses.clone());
                    }
                    None => break,
                },
            }
        }

        tracing::debug!("Status table stopped");
    }

    /// Last write wins per URL
    fn merge(&mut self, record: StatusRecord) {
        self.statuses.insert(record.url, record.status);
    }

    fn log_snapshot(&self) {
        for line in snapshot_lines(&self.statuses) {
            tracing::info!("{}", line);
        }
    }
}

/// Formats the table as a header followed by one line per URL, sorted by URL
fn snapshot_lines(statuses: &HashMap<String, String>) -> Vec<String> {
    let mut entries: Vec<_> = statuses.iter().collect();
    entries.sort();

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("Current state ({} resources):", statuses.len()));
    for (url, status) in entries {
        lines.push(format!("  {} {}", url, status));
    }
    lines
}
