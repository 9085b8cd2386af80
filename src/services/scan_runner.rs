//! Background scan runner
//!
//! Spawns the scan request on the tokio runtime and hands the outcome back
//! to the UI thread over a channel polled on each tick.

use crate::error::ScanError;
use crate::model::rescan::{RescanRequest, ScanOutcome};
use crate::services::scan_client::send_scan_request;
use crate::services::session::TokenProvider;
use reqwest::Client;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::warn;

pub struct ScanRunner {
    handle: Handle,
    client: Client,
    endpoint: String,
    tokens: Arc<dyn TokenProvider>,
    /// Receiver for the request currently in flight (if any)
    pending: Option<Receiver<ScanOutcome>>,
}

impl ScanRunner {
    pub fn new(
        handle: Handle,
        client: Client,
        endpoint: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            handle,
            client,
            endpoint: endpoint.into(),
            tokens,
            pending: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a request in the background
    pub fn spawn(&mut self, request: RescanRequest) {
        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let tokens = Arc::clone(&self.tokens);

        self.handle.spawn(async move {
            let outcome = send_scan_request(&client, &endpoint, tokens.as_ref(), &request).await;
            let _ = tx.send(outcome);
        });

        self.pending = Some(rx);
    }

    /// Take the outcome if the request has finished
    pub fn poll(&mut self) -> Option<ScanOutcome> {
        let rx = self.pending.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                warn!("Scan task dropped its channel");
                ScanOutcome::Failed(ScanError::Interrupted)
            }
        };
        self.pending = None;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scan_client::build_client;
    use crate::services::session::StaticToken;
    use serde_json::json;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_outcome_arrives_through_poll() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "scan started" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut runner = ScanRunner::new(
            Handle::current(),
            build_client(5).unwrap(),
            format!("{}/manual_scan/", mock_server.uri()),
            Arc::new(StaticToken("tok".into())),
        );
        assert!(runner.poll().is_none());

        runner.spawn(RescanRequest::organization());
        assert!(runner.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = loop {
            if let Some(outcome) = runner.poll() {
                break outcome;
            }
            assert!(Instant::now() < deadline, "scan outcome never arrived");
            tokio::time::sleep(Duration::from_millis(10)).await;
        };

        assert!(matches!(outcome, ScanOutcome::Started(ref m) if m == "scan started"));
        assert!(!runner.is_running());
        assert!(runner.poll().is_none());
    }
}
