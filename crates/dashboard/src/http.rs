//! HTTP data gateway client.

use platform::{
    Gateway, GatewayError, SwitchCommand, TimeReport, TransitKind, TransitReport, WeatherReport,
    ZoneListing,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// [`Gateway`] over HTTP/JSON.
///
/// Routes are relative to the base URL: `GET /time`, `/weather`, `/busses`,
/// `/trains`, `/rooms` and `POST /switch`. No request timeout is set; a slow
/// response only delays the module waiting for it.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Client for the gateway at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(platform::config::app_title())
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use a preconfigured client (proxy settings, TLS roots).
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        tracing::trace!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(GatewayError::transport)?;
        let body = success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn success_body(response: Response) -> Result<Vec<u8>, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(GatewayError::transport)?;
    Ok(body.to_vec())
}

impl Gateway for HttpGateway {
    async fn fetch_time(&self) -> Result<TimeReport, GatewayError> {
        self.get_json("/time").await
    }

    async fn fetch_weather(&self) -> Result<WeatherReport, GatewayError> {
        self.get_json("/weather").await
    }

    async fn fetch_transit(&self, kind: TransitKind) -> Result<TransitReport, GatewayError> {
        self.get_json(kind.path()).await
    }

    async fn fetch_zones(&self) -> Result<ZoneListing, GatewayError> {
        self.get_json("/rooms").await
    }

    async fn switch_zone(&self, command: SwitchCommand) -> Result<(), GatewayError> {
        tracing::trace!(zone = %command.room_id, on = command.on, "POST /switch");
        let response = self
            .client
            .post(self.url("/switch"))
            .json(&command)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        success_body(response).await.map(drop)
    }
}
