use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::http_client::{build_webhook_client, try_build_webhook_client};
use super::scrub::sanitize_error_body;
use super::wire::{CommentRequest, FetchedVariables, SaveRequest, TestRequest};
use crate::config::WebhookConfig;
use crate::error::{ConfigError, FormatError, TransportError, WebhookError};
use crate::newsletter::extract::extract;
use crate::newsletter::types::NewsletterVariables;

/// Remote side of the newsletter workflow.
///
/// Each call is one request/response exchange: no retry, no streaming.
#[async_trait]
pub trait NewsletterBackend: Send + Sync {
    async fn fetch_variables(&self) -> Result<FetchedVariables, WebhookError>;

    async fn save_variables(&self, variables: &NewsletterVariables) -> Result<(), WebhookError>;

    /// Generate content for `keywords`; returns the extracted content string.
    async fn test_keywords(&self, keywords: &str) -> Result<String, WebhookError>;

    /// Refine the current verification content with `comment`.
    async fn send_comment(
        &self,
        comment: &str,
        variables: &NewsletterVariables,
    ) -> Result<String, WebhookError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Fetch,
    Save,
    Test,
    Comment,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The four fixed webhook URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoints {
    pub fetch: Url,
    pub save: Url,
    pub test: Url,
    pub comment: Url,
}

impl WebhookEndpoints {
    pub fn parse(fetch: &str, save: &str, test: &str, comment: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            fetch: parse_endpoint_url("fetch_url", fetch)?,
            save: parse_endpoint_url("save_url", save)?,
            test: parse_endpoint_url("test_url", test)?,
            comment: parse_endpoint_url("comment_url", comment)?,
        })
    }

    pub fn from_config(config: &WebhookConfig) -> Result<Self, ConfigError> {
        Self::parse(
            &config.fetch_url,
            &config.save_url,
            &config.test_url,
            &config.comment_url,
        )
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Fetch => self.fetch.as_str(),
            Endpoint::Save => self.save.as_str(),
            Endpoint::Test => self.test.as_str(),
            Endpoint::Comment => self.comment.as_str(),
        }
    }
}

/// Parse an absolute `http`/`https` URL, naming the config key on failure.
pub fn parse_endpoint_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ConfigError::Validation(format!("webhooks.{key}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "webhooks.{key}: unsupported scheme `{}`",
            url.scheme()
        )));
    }
    Ok(url)
}

/// [`NewsletterBackend`] over HTTP webhooks.
pub struct WebhookClient {
    endpoints: WebhookEndpoints,
    client: Client,
}

impl WebhookClient {
    pub fn new(endpoints: WebhookEndpoints) -> Self {
        Self::with_client(endpoints, build_webhook_client())
    }

    pub fn with_client(endpoints: WebhookEndpoints, client: Client) -> Self {
        Self { endpoints, client }
    }

    pub fn from_config(config: &WebhookConfig) -> Result<Self, ConfigError> {
        let endpoints = WebhookEndpoints::from_config(config)?;
        let client = try_build_webhook_client(config.timeout_secs, config.connect_timeout_secs)?;
        Ok(Self::with_client(endpoints, client))
    }

    pub fn endpoints(&self) -> &WebhookEndpoints {
        &self.endpoints
    }

    fn get(&self, endpoint: Endpoint) -> RequestBuilder {
        self.client.get(self.endpoints.url(endpoint))
    }

    fn post(&self, endpoint: Endpoint) -> RequestBuilder {
        self.client.post(self.endpoints.url(endpoint))
    }

    /// Send one request and enforce a success status.
    async fn exchange(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<Response, WebhookError> {
        let started = Instant::now();
        debug!(endpoint = endpoint.name(), "webhook.request");

        let response = request
            .send()
            .await
            .map_err(|err| transport_error(endpoint, &err))?;
        let status = response.status();
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = sanitize_error_body(&body);
            warn!(
                endpoint = endpoint.name(),
                status = status.as_u16(),
                elapsed_ms,
                body = %body,
                "webhook.failed"
            );
            return Err(TransportError::Status {
                endpoint: endpoint.name(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        info!(
            endpoint = endpoint.name(),
            status = status.as_u16(),
            elapsed_ms,
            "webhook.response"
        );
        Ok(response)
    }

    async fn exchange_json(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<Value, WebhookError> {
        let response = self.exchange(endpoint, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| transport_error(endpoint, &err))?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(endpoint = endpoint.name(), error = %err, "webhook.decode_failed");
            FormatError::Decode {
                endpoint: endpoint.name(),
                message: err.to_string(),
            }
            .into()
        })
    }

    async fn generate(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<String, WebhookError> {
        let raw = self.exchange_json(endpoint, request).await?;
        extract(&raw).map_err(|err| {
            warn!(endpoint = endpoint.name(), "webhook.empty_content");
            err.into()
        })
    }
}

fn transport_error(endpoint: Endpoint, err: &reqwest::Error) -> WebhookError {
    if err.is_timeout() {
        warn!(endpoint = endpoint.name(), "webhook.timeout");
        TransportError::Timeout {
            endpoint: endpoint.name(),
        }
        .into()
    } else {
        warn!(endpoint = endpoint.name(), error = %err, "webhook.unreachable");
        TransportError::Network {
            endpoint: endpoint.name(),
            message: err.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl NewsletterBackend for WebhookClient {
    async fn fetch_variables(&self) -> Result<FetchedVariables, WebhookError> {
        let raw = self
            .exchange_json(Endpoint::Fetch, self.get(Endpoint::Fetch))
            .await?;
        Ok(FetchedVariables::from_payload(&raw)?)
    }

    async fn save_variables(&self, variables: &NewsletterVariables) -> Result<(), WebhookError> {
        let request = self
            .post(Endpoint::Save)
            .json(&SaveRequest::from(variables));
        self.exchange(Endpoint::Save, request).await?;
        Ok(())
    }

    async fn test_keywords(&self, keywords: &str) -> Result<String, WebhookError> {
        let request = self.post(Endpoint::Test).json(&TestRequest { keywords });
        self.generate(Endpoint::Test, request).await
    }

    async fn send_comment(
        &self,
        comment: &str,
        variables: &NewsletterVariables,
    ) -> Result<String, WebhookError> {
        let request = self
            .post(Endpoint::Comment)
            .json(&CommentRequest::new(comment, variables));
        self.generate(Endpoint::Comment, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::http_client::build_webhook_client_with_duration;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoints(base: &str) -> WebhookEndpoints {
        WebhookEndpoints::parse(
            &format!("{base}/fetch"),
            &format!("{base}/save"),
            &format!("{base}/test"),
            &format!("{base}/comment"),
        )
        .unwrap()
    }

    fn make_client(server: &MockServer) -> WebhookClient {
        WebhookClient::new(endpoints(&server.uri()))
    }

    fn sample_variables() -> NewsletterVariables {
        NewsletterVariables {
            selected_tone_id: 2,
            max_lines: 5,
            include_image: false,
            keywords: "sale".into(),
            verification: "Current draft".into(),
        }
    }

    #[test]
    fn endpoint_names() {
        assert_eq!(Endpoint::Fetch.name(), "fetch");
        assert_eq!(Endpoint::Comment.to_string(), "comment");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(parse_endpoint_url("fetch_url", "ftp://x/y").is_err());
        assert!(parse_endpoint_url("fetch_url", "not a url").is_err());
        assert!(parse_endpoint_url("fetch_url", "https://n8n.example/webhook/abc").is_ok());
    }

    #[tokio::test]
    async fn fetch_sends_json_headers_and_decodes_first_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fetch"))
            .and(header("accept", "application/json"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "ton": 1,
                "n_lignes": 20,
                "image": true,
                "list_ton": [{ "id": 1, "description": "Formel" }]
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let fetched = make_client(&server).fetch_variables().await.unwrap();
        assert_eq!(fetched.variables.selected_tone_id, 1);
        assert_eq!(fetched.variables.max_lines, 20);
        assert_eq!(fetched.tone_options.len(), 1);
    }

    #[tokio::test]
    async fn fetch_empty_array_is_format_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fetch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_variables().await.unwrap_err();
        assert!(err.is_format());
    }

    #[tokio::test]
    async fn fetch_invalid_json_is_format_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fetch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_variables().await.unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Format(FormatError::Decode { endpoint: "fetch", .. })
        ));
    }

    #[tokio::test]
    async fn save_posts_wire_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/save"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "ton": 2,
                "n_lignes": 5,
                "image": false,
                "keywords": "sale",
                "verification": "Current draft"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server)
            .save_variables(&sample_variables())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn save_server_error_is_transport_error_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/save"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("{\"message\":\"boom\",\"token\":\"s3cret\"}"),
            )
            .mount(&server)
            .await;

        let err = make_client(&server)
            .save_variables(&sample_variables())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert!(!err.to_string().contains("s3cret"));
    }

    #[tokio::test]
    async fn test_keywords_extracts_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/test"))
            .and(header("accept", "application/json"))
            .and(header("cache-control", "no-cache"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "keywords": "spring, sale" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "response": { "body": { "post": "Spring is here", "image": "http://x/y.png" } }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let content = make_client(&server)
            .test_keywords("spring, sale")
            .await
            .unwrap();
        assert_eq!(
            content,
            "Spring is here\n\n![Generated Image](http://x/y.png)"
        );
    }

    #[tokio::test]
    async fn test_keywords_empty_response_is_format_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = make_client(&server).test_keywords("x").await.unwrap_err();
        assert!(matches!(err, WebhookError::Format(FormatError::EmptyContent)));
    }

    #[tokio::test]
    async fn comment_strips_inline_images_before_sending() {
        let server = MockServer::start().await;
        let mut vars = sample_variables();
        vars.verification = "Draft\n\n![Generated Image](data:image/png;base64,AAAA)".into();

        Mock::given(method("POST"))
            .and(path("/comment"))
            .and(header("accept", "application/json"))
            .and(header("cache-control", "no-cache"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "comment": "more formal",
                "verification": "Draft",
                "ton": 2,
                "n_lignes": 5,
                "image": false,
                "keywords": "sale"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "post": "Revised" })))
            .expect(1)
            .mount(&server)
            .await;

        let content = make_client(&server)
            .send_comment("more formal", &vars)
            .await
            .unwrap();
        assert_eq!(content, "Revised");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = WebhookClient::new(endpoints(&base))
            .fetch_variables()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Transport(TransportError::Network { endpoint: "fetch", .. })
        ));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "post": "late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = WebhookClient::with_client(
            endpoints(&server.uri()),
            build_webhook_client_with_duration(Duration::from_millis(200)),
        );
        let err = client.test_keywords("x").await.unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Transport(TransportError::Timeout { endpoint: "test" })
        ));
    }
}
