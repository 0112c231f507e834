//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use mdm_panel_core::notify::NoticeKind;
use mdm_panel_core::types::{Device, InstalledApp};
use mdm_panel_core::PanelState;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format device list
    fn format_devices(&self, devices: &[Device]) -> String;

    /// Format the device panel: overview, info, recent activity, controls
    fn format_panel(&self, device: &Device, state: &PanelState) -> String;

    /// Format an app list, already filtered
    fn format_apps(&self, device: &Device, apps: &[&InstalledApp], filter: &str) -> String;

    /// Format a map link produced by a locate command
    fn format_map_link(&self, device: &Device, link: Option<&str>) -> String;

    /// Format a panel notice
    fn format_notice(&self, kind: NoticeKind, message: &str) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;

    /// Format an error
    fn format_error(&self, error: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
