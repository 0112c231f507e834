//! Remote device API.
//!
//! [`DeviceApi`] is the seam between the panel and the server. The HTTP
//! implementation lives in [`http`]; tests drive the panel with an
//! in-memory double.

pub mod http;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::protocol::commands::CommandRequest;
use crate::types::{Activity, Device, Id, InstalledApp};

pub use http::HttpDeviceApi;

/// Operations the panel consumes from the remote service.
///
/// Every call is a single request: no retries, no queueing, no caching.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// All managed devices, used by the hosting shell.
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError>;

    /// Activities for a device, most recent first.
    async fn get_activities_by_device(&self, device_id: &Id) -> Result<Vec<Activity>, ApiError>;

    async fn get_installed_apps(&self, device_id: &Id) -> Result<Vec<InstalledApp>, ApiError>;

    async fn toggle_installed_app(
        &self,
        device_id: &Id,
        app_id: &Id,
        installed: bool,
    ) -> Result<(), ApiError>;

    /// Submit a command. Success means accepted, not executed.
    async fn send_command(&self, device_id: &Id, request: &CommandRequest) -> Result<(), ApiError>;

    async fn delete_device(&self, device_id: &Id) -> Result<(), ApiError>;
}
