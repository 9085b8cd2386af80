//! Manual scan endpoint client
//!
//! One POST per confirmed rescan. The response is classified into a
//! [`ScanOutcome`]; nothing here returns an error to the caller.

use crate::error::{Result, ScanError};
use crate::model::rescan::{RescanRequest, ScanOutcome};
use crate::services::session::TokenProvider;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Build the HTTP client used for scan requests
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("surface-tui/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Send one rescan request and classify the reply
pub async fn send_scan_request(
    client: &Client,
    endpoint: &str,
    tokens: &dyn TokenProvider,
    request: &RescanRequest,
) -> ScanOutcome {
    match try_send(client, endpoint, tokens, request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(scope = %request.scope_label(), error = %e, "Rescan request failed");
            ScanOutcome::Failed(e)
        }
    }
}

async fn try_send(
    client: &Client,
    endpoint: &str,
    tokens: &dyn TokenProvider,
    request: &RescanRequest,
) -> Result<ScanOutcome> {
    let token = tokens.access_token()?;

    let mut builder = client
        .post(endpoint)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json");
    if let Some(body) = request.body() {
        builder = builder.json(&body);
    }

    info!(scope = %request.scope_label(), endpoint, "Sending rescan request");
    let response = builder.send().await?;
    let status = response.status();
    debug!(%status, "Rescan response received");

    if status == StatusCode::TOO_MANY_REQUESTS {
        let body = response.text().await?;
        let message = data_message(&body)?;
        warn!(message = %message, "Rescan rate limited");
        return Ok(ScanOutcome::RateLimited(message));
    }

    if !status.is_success() {
        return Err(ScanError::Status(status));
    }

    let body = response.text().await?;
    let message = data_message(&body)?;
    info!(message = %message, "Rescan accepted");
    Ok(ScanOutcome::Started(message))
}

/// Extract the `data` field of a response body as display text
fn data_message(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).map_err(|e| ScanError::Body(e.to_string()))?;
    match value.get("data") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(ScanError::Body("response has no `data` field".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::StaticToken;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct NoToken;

    impl TokenProvider for NoToken {
        fn access_token(&self) -> Result<String> {
            Err(ScanError::Credential("signed out".into()))
        }
    }

    async fn send(server: &MockServer, request: &RescanRequest) -> ScanOutcome {
        let client = build_client(5).unwrap();
        let endpoint = format!("{}/manual_scan/", server.uri());
        send_scan_request(&client, &endpoint, &StaticToken("tok-1".into()), request).await
    }

    #[tokio::test]
    async fn test_success_returns_data_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "scan started" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = send(&mock_server, &RescanRequest::organization()).await;
        assert!(matches!(outcome, ScanOutcome::Started(ref m) if m == "scan started"));
    }

    #[tokio::test]
    async fn test_organization_scan_sends_no_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "ok" })))
            .mount(&mock_server)
            .await;

        send(&mock_server, &RescanRequest::organization()).await;

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_domain_scan_sends_domain_name() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .and(body_json(json!({ "domain_name": "shop.example.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "queued" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = send(&mock_server, &RescanRequest::domain("shop.example.com")).await;
        assert!(matches!(outcome, ScanOutcome::Started(ref m) if m == "queued"));
    }

    #[tokio::test]
    async fn test_rate_limited_uses_server_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "data": "rate limited" })))
            .mount(&mock_server)
            .await;

        let outcome = send(&mock_server, &RescanRequest::organization()).await;
        assert!(matches!(outcome, ScanOutcome::RateLimited(ref m) if m == "rate limited"));
    }

    #[tokio::test]
    async fn test_rate_limited_with_unparseable_body_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&mock_server)
            .await;

        let outcome = send(&mock_server, &RescanRequest::organization()).await;
        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::Body(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_generic_failure_with_or_without_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "data": "boom" })))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/manual_scan/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        for _ in 0..2 {
            let outcome = send(&mock_server, &RescanRequest::organization()).await;
            match outcome {
                ScanOutcome::Failed(ScanError::Status(status)) => {
                    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
                }
                other => panic!("expected status failure, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_non_string_data_is_rendered_as_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({ "data": { "job": 7 } })),
            )
            .mount(&mock_server)
            .await;

        let outcome = send(&mock_server, &RescanRequest::organization()).await;
        assert!(matches!(outcome, ScanOutcome::Started(ref m) if m == r#"{"job":7}"#));
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = build_client(5).unwrap();
        let endpoint = format!("{}/manual_scan/", mock_server.uri());
        let outcome =
            send_scan_request(&client, &endpoint, &NoToken, &RescanRequest::organization()).await;
        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::Credential(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let client = build_client(1).unwrap();
        let outcome = send_scan_request(
            &client,
            "http://127.0.0.1:9/manual_scan/",
            &StaticToken("tok".into()),
            &RescanRequest::organization(),
        )
        .await;
        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::Transport(_))));
    }

    #[test]
    fn test_data_message_requires_data_field() {
        assert_eq!(data_message(r#"{"data":"x"}"#).unwrap(), "x");
        assert!(matches!(data_message(r#"{"detail":"x"}"#), Err(ScanError::Body(_))));
    }
}
