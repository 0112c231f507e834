//! Device management panel.
//!
//! [`DevicePanel`] is the controller; [`PanelState`] is the view state it
//! owns. Hosts construct a panel per device and discard it on close.

pub mod controller;
pub mod state;

use serde::Serialize;

pub use controller::DevicePanel;
pub use state::{BusyAction, BusyFlags, Modal, PanelState, PanelStatus};

/// Controls shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Apps,
    Locate,
    Alarm,
    Delete,
    Lock,
    Unlock,
    Restart,
    Wipe,
    KioskMode,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Lock,
        Control::Unlock,
        Control::Locate,
        Control::Restart,
        Control::Apps,
        Control::Wipe,
        Control::Alarm,
        Control::KioskMode,
        Control::Delete,
    ];

    /// Inactive controls stay visible but never issue a request.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Control::Apps | Control::Locate | Control::Alarm | Control::Delete
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Apps => "Manage apps",
            Control::Locate => "Locate device",
            Control::Alarm => "Send alarm",
            Control::Delete => "Delete device",
            Control::Lock => "Lock device",
            Control::Unlock => "Unlock device",
            Control::Restart => "Restart",
            Control::Wipe => "Wipe device",
            Control::KioskMode => "Kiosk mode",
        }
    }
}
