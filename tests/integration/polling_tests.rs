//! End-to-end tests of the polling loop with a scripted probe
//!
//! Time is paused, so tokio advances the clock straight to the next timer
//! and every interval below is exact to the millisecond.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use urlpoll::config::PollerConfig;
use urlpoll::monitor::{Dispatcher, Probe, ProbeOutcome};

/// Records every probe; URLs containing "down" always fail
#[derive(Clone, Default)]
struct RecordingProbe {
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl RecordingProbe {
    fn times_for(&self, url: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| called == url)
            .map(|(_, at)| *at)
            .collect()
    }

    fn counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for (url, _) in self.calls.lock().unwrap().iter() {
            *counts.entry(url.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Probe for RecordingProbe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        let outcome = if url.contains("down") {
            ProbeOutcome::Failed("error trying to connect: Connection refused".to_string())
        } else {
            ProbeOutcome::Responded("200 OK".to_string())
        };
        async move { outcome }
    }
}

fn test_config(num_pollers: usize) -> PollerConfig {
    PollerConfig {
        num_pollers,
        poll_interval_ms: 60_000,
        status_interval_ms: 10_000,
        err_timeout_ms: 10_000,
        user_agent: None,
    }
}

fn gaps(times: &[Instant]) -> Vec<Duration> {
    times.windows(2).map(|w| w[1] - w[0]).collect()
}

#[tokio::test(start_paused = true)]
async fn test_failing_resource_backs_off_linearly() {
    let probe = RecordingProbe::default();
    let dispatcher = Dispatcher::new(test_config(2), probe.clone());
    let status = dispatcher.status_handle();

    let task = tokio::spawn(dispatcher.run(vec![
        "http://a.test".to_string(),
        "http://down.b.test".to_string(),
    ]));

    tokio::time::sleep(Duration::from_secs(400)).await;

    let snapshot = status.snapshot().await.expect("status table running");
    assert_eq!(snapshot["http://a.test"], "200 OK");
    assert_eq!(
        snapshot["http://down.b.test"],
        "error trying to connect: Connection refused"
    );

    // a: probed at 0, 60, 120, ... s
    let healthy = gaps(&probe.times_for("http://a.test"));
    assert!(healthy.len() >= 5, "healthy gaps: {:?}", healthy);
    for gap in &healthy {
        assert!(*gap >= Duration::from_secs(60) && *gap < Duration::from_secs(61));
    }

    // b: probed at 0, 70, 150, 240, 340 s
    let failing = gaps(&probe.times_for("http://down.b.test"));
    assert!(failing.len() >= 3, "failing gaps: {:?}", failing);
    for (i, gap) in failing.iter().enumerate() {
        let expected = Duration::from_secs(60 + 10 * (i as u64 + 1));
        assert!(*gap >= expected, "gap {} was {:?}", i, gap);
        assert!(*gap > healthy[0]);
    }
    for pair in failing.windows(2) {
        assert!(pair[1] > pair[0]);
    }

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_single_prober_serves_all_resources() {
    let probe = RecordingProbe::default();
    let dispatcher = Dispatcher::new(test_config(1), probe.clone());
    let status = dispatcher.status_handle();

    let task = tokio::spawn(dispatcher.run(vec![
        "http://one.test".to_string(),
        "http://two.test".to_string(),
    ]));

    tokio::time::sleep(Duration::from_secs(1)).await;

    let counts = probe.counts();
    assert_eq!(counts.get("http://one.test"), Some(&1));
    assert_eq!(counts.get("http://two.test"), Some(&1));

    let snapshot = status.snapshot().await.expect("status table running");
    assert_eq!(snapshot.len(), 2);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_no_resource_is_starved_or_duplicated() {
    let probe = RecordingProbe::default();
    let dispatcher = Dispatcher::new(test_config(1), probe.clone());

    let urls: Vec<String> = (0..8)
        .map(|i| {
            if i % 3 == 0 {
                format!("http://down{}.test", i)
            } else {
                format!("http://up{}.test", i)
            }
        })
        .collect();
    let task = tokio::spawn(dispatcher.run(urls.clone()));

    // Healthy URLs get 5 probes by t=240s, failing ones 4 (0, 70, 150, 240)
    tokio::time::sleep(Duration::from_secs(250)).await;

    let counts = probe.counts();
    assert_eq!(counts.len(), urls.len());
    for url in &urls {
        let expected = if url.contains("down") { 4 } else { 5 };
        assert_eq!(counts[url], expected, "probe count for {}", url);
    }

    task.abort();
}
