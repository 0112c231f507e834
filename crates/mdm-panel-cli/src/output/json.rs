//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;

use mdm_panel_core::notify::NoticeKind;
use mdm_panel_core::types::{Device, InstalledApp};
use mdm_panel_core::{Control, PanelState};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        Self::to_json(&json!({
            "devices": devices,
            "count": devices.len()
        }))
    }

    fn format_panel(&self, device: &Device, state: &PanelState) -> String {
        let controls: Vec<_> = Control::ALL
            .iter()
            .map(|c| json!({ "control": c, "active": c.is_active() }))
            .collect();

        Self::to_json(&json!({
            "device": device,
            "batteryLevel": device.battery_level(),
            "recentActivities": state.recent_activities(),
            "controls": controls,
            "state": state,
        }))
    }

    fn format_apps(&self, device: &Device, apps: &[&InstalledApp], filter: &str) -> String {
        Self::to_json(&json!({
            "deviceId": device.id,
            "filter": filter,
            "apps": apps,
            "count": apps.len()
        }))
    }

    fn format_map_link(&self, device: &Device, link: Option<&str>) -> String {
        Self::to_json(&json!({
            "deviceId": device.id,
            "location": device.location,
            "mapLink": link
        }))
    }

    fn format_notice(&self, kind: NoticeKind, message: &str) -> String {
        serde_json::to_string(&json!({ "notice": kind, "message": message }))
            .unwrap_or_default()
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        Self::to_json(&json!({ "success": false, "error": error }))
    }
}
