//! Type definitions for the MDM panel.
//!
//! These types mirror the JSON documents served by the device API.
//! Field names are camelCase on the wire.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of activities shown in the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Resource identifier. The API emits both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(i64),
    Str(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Num(n) => Id(n.to_string()),
            RawId::Str(s) => Id(s),
        }
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Id(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id(n.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a managed device. Read-only for the panel.
///
/// Decoding is lenient: missing or null fields fall back to their defaults so
/// one sparse record cannot fail a whole device list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Id,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub model: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: DeviceStatus,
    /// Battery percentage, 0-100
    #[serde(default, deserialize_with = "battery_percent")]
    pub battery: u8,
    /// Last-seen text as provided by the server
    #[serde(default, deserialize_with = "nullable")]
    pub last_seen: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    /// Assigned user
    #[serde(default, deserialize_with = "nullable")]
    pub employee: String,
    #[serde(default, deserialize_with = "nullable")]
    pub imei: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub os_version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub kiosk_mode: bool,
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON number, rounded and clamped to 0-100. Null reads as 0.
fn battery_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0))
}

impl Device {
    pub fn battery_level(&self) -> BatteryLevel {
        BatteryLevel::from_percent(self.battery)
    }

    pub fn is_connected(&self) -> bool {
        self.status == DeviceStatus::Online
    }
}

/// Connectivity status. Unrecognized values are treated as offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus::Offline
    }
}

impl From<String> for DeviceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "online" => DeviceStatus::Online,
            "warning" => DeviceStatus::Warning,
            _ => DeviceStatus::Offline,
        }
    }
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Warning => "warning",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "Online",
            DeviceStatus::Offline => "Offline",
            DeviceStatus::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryLevel {
    High,
    Medium,
    Low,
}

impl BatteryLevel {
    pub fn from_percent(percent: u8) -> Self {
        if percent > 60 {
            BatteryLevel::High
        } else if percent > 30 {
            BatteryLevel::Medium
        } else {
            BatteryLevel::Low
        }
    }
}

/// Logged record of a dispatched command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Id>,
    pub action: ActivityAction,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    pub status: ActivityStatus,
    /// RFC 3339 timestamp; empty when the server sent none
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
}

impl Activity {
    /// Description, or the action name when the server sent none.
    pub fn title(&self) -> &str {
        if self.description.trim().is_empty() {
            self.action.as_str()
        } else {
            &self.description
        }
    }

    /// Creation time rendered in local time, or the raw text if it does not parse.
    pub fn created_at_local(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => ts
                .with_timezone(&Local)
                .format("%d.%m.%Y %H:%M:%S")
                .to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityAction {
    Locate,
    Lock,
    Unlock,
    Restart,
    Wipe,
    Alert,
    InstallApp,
    UninstallApp,
    Other(String),
}

impl From<String> for ActivityAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "locate" => ActivityAction::Locate,
            "lock" => ActivityAction::Lock,
            "unlock" => ActivityAction::Unlock,
            "restart" => ActivityAction::Restart,
            "wipe" => ActivityAction::Wipe,
            "alert" => ActivityAction::Alert,
            "install_app" => ActivityAction::InstallApp,
            "uninstall_app" => ActivityAction::UninstallApp,
            _ => ActivityAction::Other(s),
        }
    }
}

impl From<ActivityAction> for String {
    fn from(a: ActivityAction) -> Self {
        a.as_str().to_string()
    }
}

impl ActivityAction {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityAction::Locate => "locate",
            ActivityAction::Lock => "lock",
            ActivityAction::Unlock => "unlock",
            ActivityAction::Restart => "restart",
            ActivityAction::Wipe => "wipe",
            ActivityAction::Alert => "alert",
            ActivityAction::InstallApp => "install_app",
            ActivityAction::UninstallApp => "uninstall_app",
            ActivityAction::Other(s) => s,
        }
    }

    /// Short glyph used in terminal activity lists.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityAction::Locate => "[loc]",
            ActivityAction::Lock => "[lck]",
            ActivityAction::Unlock => "[unl]",
            ActivityAction::Restart => "[rst]",
            ActivityAction::Wipe => "[wip]",
            ActivityAction::Alert => "[alm]",
            ActivityAction::InstallApp | ActivityAction::UninstallApp => "[app]",
            ActivityAction::Other(_) => "[dev]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl From<String> for ActivityStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => ActivityStatus::Completed,
            "pending" => ActivityStatus::Pending,
            "failed" => ActivityStatus::Failed,
            _ => ActivityStatus::Other(s),
        }
    }
}

impl From<ActivityStatus> for String {
    fn from(s: ActivityStatus) -> Self {
        match s {
            ActivityStatus::Completed => "completed".to_string(),
            ActivityStatus::Pending => "pending".to_string(),
            ActivityStatus::Failed => "failed".to_string(),
            ActivityStatus::Other(raw) => raw,
        }
    }
}

impl ActivityStatus {
    pub fn label(&self) -> &str {
        match self {
            ActivityStatus::Completed => "Completed",
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Failed => "Failed",
            ActivityStatus::Other(raw) => raw,
        }
    }
}

/// Application known to be present (or installable) on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApp {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Id>,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub is_installed: bool,
}

impl InstalledApp {
    /// Case-insensitive match against name or package name.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.package_name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::response::parse_data;

    #[test]
    fn test_device_deserialize_numeric_id() {
        let json = r#"{
            "id": 7,
            "name": "Field Phone",
            "model": "Pixel 8",
            "status": "online",
            "battery": 82,
            "lastSeen": "2 min ago",
            "location": "Istanbul",
            "employee": "Ayse",
            "imei": "356938035643809",
            "phoneNumber": "+90 555 000 0000",
            "osVersion": "Android 14"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id.as_str(), "7");
        assert_eq!(device.status, DeviceStatus::Online);
        assert!(!device.kiosk_mode);
        assert_eq!(device.battery_level(), BatteryLevel::High);
    }

    #[test]
    fn test_unknown_device_status_is_offline() {
        let status: DeviceStatus = serde_json::from_str(r#""rebooting""#).unwrap();
        assert_eq!(status, DeviceStatus::Offline);
    }

    #[test]
    fn test_battery_level_thresholds() {
        assert_eq!(BatteryLevel::from_percent(61), BatteryLevel::High);
        assert_eq!(BatteryLevel::from_percent(60), BatteryLevel::Medium);
        assert_eq!(BatteryLevel::from_percent(31), BatteryLevel::Medium);
        assert_eq!(BatteryLevel::from_percent(30), BatteryLevel::Low);
    }

    #[test]
    fn test_activity_unknown_action_preserved() {
        let json = r#"{"id":"a1","action":"reset_password","description":"","status":"queued","createdAt":"x"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(
            activity.action,
            ActivityAction::Other("reset_password".to_string())
        );
        assert_eq!(activity.title(), "reset_password");
        assert_eq!(activity.status.label(), "queued");
        assert_eq!(activity.created_at_local(), "x");

        let back = serde_json::to_value(&activity).unwrap();
        assert_eq!(back["action"], "reset_password");
        assert_eq!(back["status"], "queued");
    }

    #[test]
    fn test_activity_title_prefers_description() {
        let json = r#"{"id":1,"action":"install_app","description":"Installed Maps","status":"completed","createdAt":"2024-05-01T10:00:00Z"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.action, ActivityAction::InstallApp);
        assert_eq!(activity.title(), "Installed Maps");
        assert_eq!(activity.status, ActivityStatus::Completed);
    }

    #[test]
    fn test_app_filter_matches_name_or_package() {
        let app = InstalledApp {
            id: Id::new("1"),
            device_id: None,
            name: "WhatsApp".to_string(),
            package_name: "com.whatsapp".to_string(),
            version: None,
            icon_url: None,
            is_installed: true,
        };
        assert!(app.matches(""));
        assert!(app.matches("whats"));
        assert!(app.matches("COM.WHATS"));
        assert!(!app.matches("telegram"));
    }

    #[test]
    fn test_null_created_at_keeps_rest_of_feed() {
        let body = r#"{"success": true, "data": [
            {"id": 2, "action": "locate", "description": "Locate requested", "status": "pending", "createdAt": "2024-05-01T10:00:00Z"},
            {"id": 1, "action": "alert", "description": null, "status": "completed", "createdAt": null}
        ]}"#;
        let activities: Vec<Activity> = parse_data(200, body).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[1].created_at, "");
        assert_eq!(activities[1].title(), "alert");
    }

    #[test]
    fn test_sparse_devices_do_not_fail_the_list() {
        let body = r#"{"success": true, "data": [
            {"id": 1, "name": "Tablet", "status": "online", "battery": 85.5},
            {"id": 2, "name": "Phone", "status": null, "battery": null, "location": null},
            {"id": 3, "name": "Scanner", "battery": 140}
        ]}"#;
        let devices: Vec<Device> = parse_data(200, body).unwrap();
        assert_eq!(devices.len(), 3);

        assert_eq!(devices[0].battery, 86);
        assert_eq!(devices[0].status, DeviceStatus::Online);

        assert_eq!(devices[1].status, DeviceStatus::Offline);
        assert_eq!(devices[1].battery, 0);
        assert_eq!(devices[1].location, "");

        assert_eq!(devices[2].status, DeviceStatus::Offline);
        assert_eq!(devices[2].battery, 100);
    }

    #[test]
    fn test_negative_battery_clamps_to_zero() {
        let device: Device = serde_json::from_str(r#"{"id": "x", "battery": -4}"#).unwrap();
        assert_eq!(device.battery, 0);
        assert_eq!(device.battery_level(), BatteryLevel::Low);
    }
}
