//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use mdm_panel_core::notify::NoticeKind;
use mdm_panel_core::types::{BatteryLevel, Device, DeviceStatus, InstalledApp};
use mdm_panel_core::{Control, PanelState};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn status_cell(status: DeviceStatus) -> Cell {
        let color = match status {
            DeviceStatus::Online => Color::Green,
            DeviceStatus::Offline => Color::Red,
            DeviceStatus::Warning => Color::Yellow,
        };
        Cell::new(status.display_name()).fg(color)
    }

    fn battery_text(device: &Device) -> ColoredString {
        let text = format!("{}%", device.battery);
        match device.battery_level() {
            BatteryLevel::High => text.green(),
            BatteryLevel::Medium => text.yellow(),
            BatteryLevel::Low => text.red(),
        }
    }

    fn or_dash(value: &str) -> &str {
        if value.trim().is_empty() {
            "-"
        } else {
            value
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["ID", "Name", "Model", "Status", "Battery", "User", "Last Seen"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(&device.id),
                Cell::new(&device.name),
                Cell::new(Self::or_dash(&device.model)),
                Self::status_cell(device.status),
                Cell::new(format!("{}%", device.battery)),
                Cell::new(Self::or_dash(&device.employee)),
                Cell::new(Self::or_dash(&device.last_seen)),
            ]);
        }

        format!("{}\n\n{} device(s)", table, devices.len())
    }

    fn format_panel(&self, device: &Device, state: &PanelState) -> String {
        let mut lines = Vec::new();

        let status = match device.status {
            DeviceStatus::Online => device.status.display_name().green(),
            DeviceStatus::Offline => device.status.display_name().red(),
            DeviceStatus::Warning => device.status.display_name().yellow(),
        };
        lines.push(format!("{} ({})  {}", device.name.bold(), Self::or_dash(&device.model), status));
        lines.push(format!("  Battery:     {}", Self::battery_text(device)));
        lines.push(format!(
            "  Connection:  {}",
            if device.is_connected() { "Connected" } else { "Not connected" }
        ));
        lines.push(format!("  Last Seen:   {}", Self::or_dash(&device.last_seen)));
        if let Some(error) = &state.error_message {
            lines.push(format!("  {} {}", "Last error:".red(), error));
        }

        lines.push(String::new());
        lines.push("Device Information:".to_string());
        lines.push(format!("  IMEI:        {}", Self::or_dash(&device.imei)));
        lines.push(format!("  Phone:       {}", Self::or_dash(&device.phone_number)));
        lines.push(format!("  OS:          {}", Self::or_dash(&device.os_version)));
        lines.push(format!("  Location:    {}", Self::or_dash(&device.location)));
        lines.push(format!("  User:        {}", Self::or_dash(&device.employee)));
        lines.push(format!(
            "  Kiosk Mode:  {}",
            if device.kiosk_mode { "On" } else { "Off" }
        ));

        lines.push(String::new());
        lines.push("Recent Activity:".to_string());
        let recent = state.recent_activities();
        if recent.is_empty() {
            lines.push("  No activity for this device yet.".to_string());
        }
        for activity in recent {
            lines.push(format!(
                "  {} {}  {} - {}",
                activity.action.icon(),
                activity.title(),
                activity.status.label(),
                activity.created_at_local()
            ));
        }

        lines.push(String::new());
        lines.push("Controls:".to_string());
        for control in Control::ALL {
            let marker = if control.is_active() {
                "[x]".green()
            } else {
                "[ ]".dimmed()
            };
            let suffix = if control.is_active() { "" } else { " (not active yet)" };
            lines.push(format!("  {} {}{}", marker, control.label(), suffix));
        }

        lines.join("\n")
    }

    fn format_apps(&self, device: &Device, apps: &[&InstalledApp], filter: &str) -> String {
        if apps.is_empty() {
            return if filter.trim().is_empty() {
                format!("No applications found on {}.", device.name)
            } else {
                format!("No applications match '{}'.", filter)
            };
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["ID", "Name", "Package", "Version", "Status"]);

        for app in apps {
            let status = if app.is_installed {
                Cell::new("Active").fg(Color::Green)
            } else {
                Cell::new("Inactive").fg(Color::DarkGrey)
            };
            table.add_row(vec![
                Cell::new(&app.id),
                Cell::new(&app.name),
                Cell::new(&app.package_name),
                Cell::new(app.version.as_deref().map(|v| format!("v{}", v)).unwrap_or_default()),
                status,
            ]);
        }

        format!("{}\n\n{} app(s) on {}", table, apps.len(), device.name)
    }

    fn format_map_link(&self, device: &Device, link: Option<&str>) -> String {
        match link {
            Some(link) => format!("Last known location of {}: {}\n{}", device.name, device.location, link),
            None => format!("No location reported for {}.", device.name),
        }
    }

    fn format_notice(&self, kind: NoticeKind, message: &str) -> String {
        match kind {
            NoticeKind::Success => format!("{} {}", "[OK]".green(), message),
            NoticeKind::Error => format!("{} {}", "[FAIL]".red(), message),
        }
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} {}", "Error:".red(), error)
    }
}
