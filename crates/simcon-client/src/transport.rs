//! HTTP transport for the control API
//!
//! [`HttpTransport::request`] is the only place that touches the network.
//! Every outcome is normalized into `Result<Value, ApiError>`:
//! - 2xx with a JSON body (or an empty body, mapped to `Value::Null`) is `Ok`
//! - non-2xx yields [`ApiError::Server`] carrying the `detail` of the error
//!   body, or `HTTP <status>: <reason>` when the body has none
//! - connection failures yield [`ApiError::Transport`]
//!
//! Failures are logged with their endpoint; logging never alters control flow.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{ApiError, UNEXPECTED_RESPONSE_MESSAGE, UNREACHABLE_MESSAGE};

/// Default control API location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection parameters for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    /// Timeout for reads (`GET`). Mutations are left unbounded here; the
    /// action layer bounds them and reports [`ApiError::TimedOut`].
    pub request_timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    request_timeout: Option<Duration>,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            request_timeout: config.request_timeout,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/api/status`
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue one request and normalize the outcome.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(endpoint);
        trace!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(timeout) = self.request_timeout.filter(|_| method == Method::GET) {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = match request.send().await {
            Ok(response) => decode_response(response).await,
            Err(e) if e.is_timeout() => Err(ApiError::transport(format!(
                "{UNREACHABLE_MESSAGE} (request timed out)"
            ))),
            Err(e) => {
                debug!("Request to {} failed: {}", url, e);
                Err(ApiError::transport(UNREACHABLE_MESSAGE))
            }
        };

        if let Err(ref e) = result {
            warn!("API Error ({} {}): {}", method, endpoint, e);
        }
        result
    }
}

async fn decode_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        warn!("Failed to read control API response body: {}", e);
        ApiError::transport(UNREACHABLE_MESSAGE)
    })?;

    if !status.is_success() {
        return Err(server_error(status, &bytes));
    }

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!("Control API returned a non-JSON success body: {}", e);
        ApiError::decode(UNEXPECTED_RESPONSE_MESSAGE)
    })
}

/// Build the error for a non-2xx response.
///
/// A string `detail` is used verbatim; any other JSON `detail` (such as a
/// validation error list) is rendered compactly.
pub fn server_error(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            Some(Value::Null) | Some(Value::String(_)) | None => None,
            Some(other) => Some(other.to_string()),
        });

    let message = detail.unwrap_or_else(|| {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )
    });
    ApiError::server(status.as_u16(), message)
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ApiError::InvalidBaseUrl(base_url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer it with a canned response and return
    /// the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_http_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    async fn read_http_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Accept connections and never answer them.
    async fn serve_silent() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        format!("http://{}", addr)
    }

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(TransportConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_base_url_normalization() {
        let t = transport("http://sim.local:8080/");
        assert_eq!(t.base_url(), "http://sim.local:8080");
        assert_eq!(t.endpoint("/api/status"), "http://sim.local:8080/api/status");
        assert_eq!(t.endpoint("api/status"), "http://sim.local:8080/api/status");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let t = transport("https://ops.example.com/simulator");
        assert_eq!(
            t.endpoint("/api/health"),
            "https://ops.example.com/simulator/api/health"
        );
    }

    #[test]
    fn test_invalid_base_urls_rejected() {
        for bad in ["", "   ", "localhost:8080", "ftp://sim.local", "not a url"] {
            let result = HttpTransport::new(TransportConfig::new(bad));
            assert!(
                matches!(result, Err(ApiError::InvalidBaseUrl(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_server_error_uses_detail_verbatim() {
        let err = server_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"detail": "db locked"}"#,
        );
        assert_eq!(err, ApiError::server(500, "db locked"));
    }

    #[test]
    fn test_server_error_without_body_uses_status_line() {
        let err = server_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_server_error_with_unparseable_body_uses_status_line() {
        let err = server_error(StatusCode::SERVICE_UNAVAILABLE, b"<html>oops</html>");
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_server_error_without_detail_field_uses_status_line() {
        let err = server_error(StatusCode::NOT_FOUND, br#"{"error": "nope"}"#);
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_server_error_structured_detail_rendered_compactly() {
        let err = server_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail": [{"loc": ["body", "config"], "msg": "value is not a valid dict"}]}"#,
        );
        let text = err.to_string();
        assert!(text.starts_with('['));
        assert!(text.contains("value is not a valid dict"));
    }

    #[tokio::test]
    async fn test_request_success_returns_payload() {
        let (base, server) = serve_once("200 OK", r#"{"status": "healthy"}"#).await;
        let value = transport(&base)
            .request("/api/health", Method::GET, None)
            .await
            .unwrap();

        assert_eq!(value, json!({"status": "healthy"}));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/health HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_request_sends_json_body() {
        let (base, server) =
            serve_once("200 OK", r#"{"message": "ok", "status": "success"}"#).await;
        let body = json!({"config": {"foo": 1}});
        transport(&base)
            .request("/api/config", Method::PUT, Some(&body))
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /api/config HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"config":{"foo":1}}"#));
    }

    #[tokio::test]
    async fn test_request_server_error_detail() {
        let (base, _server) =
            serve_once("500 Internal Server Error", r#"{"detail": "db locked"}"#).await;
        let err = transport(&base)
            .request("/api/config", Method::PUT, Some(&json!({"config": {}})))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::server(500, "db locked"));
    }

    #[tokio::test]
    async fn test_request_empty_success_body_is_null() {
        let (base, _server) = serve_once("200 OK", "").await;
        let value = transport(&base)
            .request("/api/control/stop", Method::POST, None)
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_request_non_json_success_is_decode_error() {
        let (base, _server) = serve_once("200 OK", "definitely not json").await;
        let err = transport(&base)
            .request("/api/status", Method::GET, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), UNEXPECTED_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_request_connection_refused_is_transport_error() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport(&format!("http://{}", addr))
            .request("/api/status", Method::GET, None)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::transport(UNREACHABLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_read_timeout_applies_to_get() {
        let base = serve_silent().await;
        let t = HttpTransport::new(
            TransportConfig::new(base).with_request_timeout(Some(Duration::from_millis(100))),
        )
        .unwrap();

        let err = t.request("/api/status", Method::GET, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_read_timeout_does_not_cut_off_mutations() {
        let base = serve_silent().await;
        let t = HttpTransport::new(
            TransportConfig::new(base).with_request_timeout(Some(Duration::from_millis(100))),
        )
        .unwrap();

        let outcome = tokio::time::timeout(
            Duration::from_millis(500),
            t.request("/api/control/start", Method::POST, None),
        )
        .await;
        assert!(outcome.is_err(), "POST finished early: {:?}", outcome);
    }
}
