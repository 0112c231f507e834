//! Shared core library for the MDM device management panel.
//!
//! The panel shows one device, sends it commands through the remote API
//! and keeps its activity feed and app list in sync after each action.

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod panel;
pub mod protocol;
pub mod types;

pub use api::{DeviceApi, HttpDeviceApi};
pub use config::ClientConfig;
pub use error::{ApiError, CoreError, ValidationError};
pub use notify::{NoticeKind, NotificationSink};
pub use panel::{Control, DevicePanel, PanelState};
