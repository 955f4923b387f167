//! Typed operations of the simulator control API
//!
//! [`ControlApi`] is the seam between the application layer and the network:
//! the app holds any `ControlApi` implementation, production code uses
//! [`SimulatorClient`], tests use `test_utils::FakeControlApi`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use simcon_core::{
    ActivityPage, ControlResponse, EventType, Health, Metrics, SimulatorState, SimulatorStatus,
};

use crate::error::{ApiError, UNEXPECTED_RESPONSE_MESSAGE};
use crate::paths;
use crate::transport::{HttpTransport, TransportConfig};

/// Control API operations, one per server capability
#[trait_variant::make(ControlApi: Send)]
pub trait LocalControlApi {
    async fn get_health(&self) -> Result<Health, ApiError>;

    async fn get_status(&self) -> Result<SimulatorStatus, ApiError>;

    async fn get_state(&self) -> Result<SimulatorState, ApiError>;

    async fn get_metrics(&self) -> Result<Metrics, ApiError>;

    /// Current simulator configuration as an arbitrary JSON document
    async fn get_config(&self) -> Result<Value, ApiError>;

    /// Replace the configuration. The document is sent wrapped as
    /// `{"config": <document>}`.
    async fn update_config(&self, config: Value) -> Result<ControlResponse, ApiError>;

    /// One page of the activity log, newest first
    async fn get_activity(
        &self,
        limit: u32,
        offset: u32,
        event_type: Option<EventType>,
    ) -> Result<ActivityPage, ApiError>;

    async fn start_simulator(&self) -> Result<ControlResponse, ApiError>;

    async fn stop_simulator(&self) -> Result<ControlResponse, ApiError>;

    /// Reset simulator state; `clear_data` also deletes generated data.
    async fn reset_simulator(&self, clear_data: bool) -> Result<ControlResponse, ApiError>;
}

/// [`ControlApi`] over HTTP
#[derive(Debug, Clone)]
pub struct SimulatorClient {
    transport: HttpTransport,
}

impl SimulatorClient {
    pub fn new(config: TransportConfig) -> Result<Self, ApiError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let value = self.transport.request(endpoint, Method::GET, None).await?;
        decode(endpoint, value)
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let value = self.transport.request(endpoint, Method::POST, None).await?;
        decode(endpoint, value)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!("Unexpected payload from {}: {}", endpoint, e);
        ApiError::decode(UNEXPECTED_RESPONSE_MESSAGE)
    })
}

impl ControlApi for SimulatorClient {
    async fn get_health(&self) -> Result<Health, ApiError> {
        self.get(paths::HEALTH).await
    }

    async fn get_status(&self) -> Result<SimulatorStatus, ApiError> {
        self.get(paths::STATUS).await
    }

    async fn get_state(&self) -> Result<SimulatorState, ApiError> {
        self.get(paths::STATE).await
    }

    async fn get_metrics(&self) -> Result<Metrics, ApiError> {
        self.get(paths::METRICS).await
    }

    async fn get_config(&self) -> Result<Value, ApiError> {
        self.transport
            .request(paths::CONFIG, Method::GET, None)
            .await
    }

    async fn update_config(&self, config: Value) -> Result<ControlResponse, ApiError> {
        let body = json!({ "config": config });
        let value = self
            .transport
            .request(paths::CONFIG, Method::PUT, Some(&body))
            .await?;
        decode(paths::CONFIG, value)
    }

    async fn get_activity(
        &self,
        limit: u32,
        offset: u32,
        event_type: Option<EventType>,
    ) -> Result<ActivityPage, ApiError> {
        let endpoint = paths::activity_path(limit, offset, event_type.as_ref());
        self.get(&endpoint).await
    }

    async fn start_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.post(paths::CONTROL_START).await
    }

    async fn stop_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.post(paths::CONTROL_STOP).await
    }

    async fn reset_simulator(&self, clear_data: bool) -> Result<ControlResponse, ApiError> {
        self.post(&paths::reset_path(clear_data)).await
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlApi, SimulatorClient};
    use crate::error::{ApiError, UNEXPECTED_RESPONSE_MESSAGE};
    use crate::transport::TransportConfig;
    use simcon_core::{EventType, RunStatus};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned 200 response and hand back the request line.
    async fn serve_json(body: &'static str) -> (SimulatorClient, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = stream.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request.lines().next().unwrap_or_default().to_string()
        });
        let client =
            SimulatorClient::new(TransportConfig::new(format!("http://{}", addr))).unwrap();
        (client, handle)
    }

    #[tokio::test]
    async fn test_get_status_decodes_payload() {
        let (client, server) = serve_json(
            r#"{"status":"running","last_run":"2024-05-01T12:00:00","points_generated_total":4200,"error_message":null}"#,
        )
        .await;

        let status = client.get_status().await.unwrap();
        assert_eq!(status.status, RunStatus::Running);
        assert_eq!(status.points_generated_total, Some(4200));
        assert_eq!(server.await.unwrap(), "GET /api/status HTTP/1.1");
    }

    #[tokio::test]
    async fn test_reset_with_data_hits_literal_query() {
        let (client, server) =
            serve_json(r#"{"message":"Simulator reset","status":"success"}"#).await;

        let response = client.reset_simulator(true).await.unwrap();
        assert_eq!(response.message, "Simulator reset");
        assert_eq!(
            server.await.unwrap(),
            "POST /api/control/reset?clear_data=true HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_get_activity_builds_query() {
        let (client, server) =
            serve_json(r#"{"events":[],"limit":50,"offset":50,"count":0}"#).await;

        let page = client
            .get_activity(50, 50, Some(EventType::Error))
            .await
            .unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(
            server.await.unwrap(),
            "GET /api/activity?limit=50&offset=50&event_type=error HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_get_config_returns_raw_document() {
        let (client, _server) = serve_json(r#"{"interval_minutes":15,"entities":["a","b"]}"#).await;

        let config = client.get_config().await.unwrap();
        assert_eq!(config["interval_minutes"], 15);
        assert_eq!(config["entities"][1], "b");
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let (client, _server) = serve_json(r#"{"unexpected": true}"#).await;

        let err = client.get_metrics().await.unwrap_err();
        assert_eq!(err, ApiError::decode(UNEXPECTED_RESPONSE_MESSAGE));
    }
}
