//! HTTP implementation of [`DeviceApi`] on top of reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::DeviceApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::protocol::commands::CommandRequest;
use crate::protocol::response::{parse_ack, parse_data};
use crate::types::{Activity, Device, Id, InstalledApp};

/// Device API client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDeviceApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpDeviceApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "timeout_ms".to_string(),
                message: format!("HTTP client error: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "api response");
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let (status, body) = self.execute(self.request(Method::GET, segments)).await?;
        parse_data(status, &body)
    }
}

#[async_trait]
impl DeviceApi for HttpDeviceApi {
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        self.fetch(&["devices"]).await
    }

    async fn get_activities_by_device(&self, device_id: &Id) -> Result<Vec<Activity>, ApiError> {
        self.fetch(&["commands", "device", device_id.as_str()]).await
    }

    async fn get_installed_apps(&self, device_id: &Id) -> Result<Vec<InstalledApp>, ApiError> {
        self.fetch(&["devices", device_id.as_str(), "apps"]).await
    }

    async fn toggle_installed_app(
        &self,
        device_id: &Id,
        app_id: &Id,
        installed: bool,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &["devices", device_id.as_str(), "apps", app_id.as_str()],
            )
            .json(&json!({ "isInstalled": installed }));
        let (status, body) = self.execute(builder).await?;
        parse_ack(status, &body)
    }

    async fn send_command(&self, device_id: &Id, request: &CommandRequest) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, &["devices", device_id.as_str(), "commands"])
            .json(request);
        let (status, body) = self.execute(builder).await?;
        parse_ack(status, &body)
    }

    async fn delete_device(&self, device_id: &Id) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &["devices", device_id.as_str()]);
        let (status, body) = self.execute(builder).await?;
        parse_ack(status, &body)
    }
}
