//! In-memory [`DeviceApi`] double for panel tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::DeviceApi;
use crate::error::ApiError;
use crate::protocol::commands::CommandRequest;
use crate::types::{Activity, ActivityAction, ActivityStatus, Device, DeviceStatus, Id, InstalledApp};

/// A scripted reply: ready now, or released later through a oneshot sender.
pub enum Reply<T> {
    Ready(Result<T, ApiError>),
    Gated(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, ApiError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".to_string()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListDevices,
    Activities(Id),
    Apps(Id),
    Toggle(Id, Id, bool),
    Command(Id, CommandRequest),
    Delete(Id),
}

/// Replies are consumed in FIFO order per endpoint. An empty queue answers
/// with an empty list for reads and success for writes.
#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<Call>>,
    activities: Mutex<VecDeque<Reply<Vec<Activity>>>>,
    apps: Mutex<VecDeque<Reply<Vec<InstalledApp>>>>,
    toggles: Mutex<VecDeque<Result<(), ApiError>>>,
    commands: Mutex<VecDeque<Result<(), ApiError>>>,
    deletes: Mutex<VecDeque<Result<(), ApiError>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_activities(&self, reply: Result<Vec<Activity>, ApiError>) {
        self.activities.lock().unwrap().push_back(Reply::Ready(reply));
    }

    pub fn push_apps(&self, reply: Result<Vec<InstalledApp>, ApiError>) {
        self.apps.lock().unwrap().push_back(Reply::Ready(reply));
    }

    pub fn gate_apps(&self) -> oneshot::Sender<Result<Vec<InstalledApp>, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.apps.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    pub fn push_toggle(&self, reply: Result<(), ApiError>) {
        self.toggles.lock().unwrap().push_back(reply);
    }

    pub fn push_command(&self, reply: Result<(), ApiError>) {
        self.commands.lock().unwrap().push_back(reply);
    }

    pub fn push_delete(&self, reply: Result<(), ApiError>) {
        self.deletes.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DeviceApi for MockApi {
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        self.record(Call::ListDevices);
        Ok(vec![device("D1")])
    }

    async fn get_activities_by_device(&self, device_id: &Id) -> Result<Vec<Activity>, ApiError> {
        self.record(Call::Activities(device_id.clone()));
        let reply = self.activities.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn get_installed_apps(&self, device_id: &Id) -> Result<Vec<InstalledApp>, ApiError> {
        self.record(Call::Apps(device_id.clone()));
        let reply = self.apps.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn toggle_installed_app(
        &self,
        device_id: &Id,
        app_id: &Id,
        installed: bool,
    ) -> Result<(), ApiError> {
        self.record(Call::Toggle(device_id.clone(), app_id.clone(), installed));
        self.toggles.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn send_command(&self, device_id: &Id, request: &CommandRequest) -> Result<(), ApiError> {
        self.record(Call::Command(device_id.clone(), request.clone()));
        self.commands.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn delete_device(&self, device_id: &Id) -> Result<(), ApiError> {
        self.record(Call::Delete(device_id.clone()));
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub fn device(id: &str) -> Device {
    Device {
        id: Id::from(id),
        name: format!("Device {}", id),
        model: "Galaxy A54".to_string(),
        status: DeviceStatus::Online,
        battery: 74,
        last_seen: "just now".to_string(),
        location: "Besiktas, Istanbul".to_string(),
        employee: "Deniz".to_string(),
        imei: "356938035643809".to_string(),
        phone_number: "+90 555 111 2233".to_string(),
        os_version: "Android 14".to_string(),
        kiosk_mode: false,
    }
}

pub fn activity(id: i64, action: &str) -> Activity {
    Activity {
        id: Id::from(id),
        device_id: Some(Id::from("D1")),
        action: ActivityAction::from(action.to_string()),
        description: format!("{} requested", action),
        status: ActivityStatus::Pending,
        created_at: "2024-05-01T10:00:00Z".to_string(),
    }
}

pub fn app(id: i64, name: &str, installed: bool) -> InstalledApp {
    InstalledApp {
        id: Id::from(id),
        device_id: Some(Id::from("D1")),
        name: name.to_string(),
        package_name: format!("com.example.{}", name.to_lowercase()),
        version: Some("1.0".to_string()),
        icon_url: None,
        is_installed: installed,
    }
}
