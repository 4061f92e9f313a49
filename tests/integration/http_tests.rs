//! Tests of the reqwest prober and startup against mock HTTP servers

use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;
use tempfile::NamedTempFile;
use urlpoll::config::{Config, InputConfig, PollerConfig};
use urlpoll::monitor::{
    build_http_client, run_monitor, Dispatcher, HttpProber, Probe, ProbeOutcome,
};
use urlpoll::{ConfigError, PollError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_prober() -> HttpProber {
    HttpProber::new(build_http_client("urlpoll-test/1.0").expect("Failed to build client"))
}

/// A local URL with nothing listening behind it
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[tokio::test]
async fn test_head_success_reports_status_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let outcome = test_prober()
        .probe(&format!("{}/health", mock_server.uri()))
        .await;
    assert_eq!(outcome, ProbeOutcome::Responded("200 OK".to_string()));
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = test_prober()
        .probe(&format!("{}/gone", mock_server.uri()))
        .await;
    assert_eq!(outcome, ProbeOutcome::Responded("404 Not Found".to_string()));
}

#[tokio::test]
async fn test_connection_refused_is_failure() {
    match test_prober().probe(&refused_url()).await {
        ProbeOutcome::Failed(error) => assert!(!error.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loop_against_live_servers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let healthy = format!("{}/", mock_server.uri());
    let broken = refused_url();

    let config = PollerConfig {
        num_pollers: 2,
        poll_interval_ms: 50,
        status_interval_ms: 20,
        err_timeout_ms: 50,
        user_agent: None,
    };
    let dispatcher = Dispatcher::new(config, test_prober());
    let status = dispatcher.status_handle();
    let task = tokio::spawn(dispatcher.run(vec![healthy.clone(), broken.clone()]));

    tokio::time::sleep(Duration::from_millis(400)).await;

    let snapshot = status.snapshot().await.expect("status table running");
    assert_eq!(snapshot[&healthy], "200 OK");
    assert_ne!(snapshot[&broken], "200 OK");
    assert!(!snapshot[&broken].is_empty());

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(
        requests.len() >= 2,
        "expected repeated probes, got {}",
        requests.len()
    );
    assert!(requests.iter().all(|r| r.method.to_string() == "HEAD"));

    task.abort();
}

#[tokio::test]
async fn test_malformed_url_file_sends_no_probes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{}/", mock_server.uri()).unwrap();
    writeln!(file, "not a url at all").unwrap();
    file.flush().unwrap();

    let config = Config {
        poller: PollerConfig::default(),
        input: InputConfig {
            urls_filepath: file.path().display().to_string(),
        },
    };

    let result = run_monitor(config).await;
    assert!(matches!(
        result,
        Err(PollError::Config(ConfigError::InvalidUrl(_)))
    ));

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty());
}
