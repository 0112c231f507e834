//! Per-invocation API session: config resolution, device lookup, panel setup.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use mdm_panel_core::config::{ClientConfig, ConfigOverrides};
use mdm_panel_core::types::Device;
use mdm_panel_core::{DeviceApi, DevicePanel, HttpDeviceApi};

use crate::cli::Cli;
use crate::error::CliError;
use crate::notifier::TerminalSink;
use crate::output::{get_formatter, OutputFormatter};

pub struct Session {
    pub api: Arc<HttpDeviceApi>,
    pub formatter: Box<dyn OutputFormatter>,
    pub json: bool,
}

impl Session {
    /// Resolve configuration (defaults < file < env/flags) and build the client.
    pub async fn connect(cli: &Cli) -> Result<Self, CliError> {
        let config = ClientConfig::load_or_default(cli.config.as_deref())
            .await?
            .with_overrides(ConfigOverrides {
                base_url: cli.api_url.clone(),
                timeout_ms: cli.timeout,
                token: cli.token.clone(),
            })?;
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "using API");

        Ok(Self {
            api: Arc::new(HttpDeviceApi::new(&config)?),
            formatter: get_formatter(cli.json),
            json: cli.json,
        })
    }

    pub async fn devices(&self) -> Result<Vec<Device>, CliError> {
        Ok(self.spin("Loading devices", self.api.list_devices()).await?)
    }

    /// Find a device by exact id, then by case-insensitive name.
    pub async fn find_device(&self, target: &str) -> Result<Device, CliError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(CliError::InvalidArgument("device cannot be empty".to_string()));
        }

        let devices = self.devices().await?;
        if let Some(device) = devices.iter().find(|d| d.id.as_str() == target) {
            return Ok(device.clone());
        }
        devices
            .into_iter()
            .find(|d| d.name.eq_ignore_ascii_case(target))
            .ok_or_else(|| CliError::DeviceNotFound(target.to_string()))
    }

    /// Open a panel for `device`. The returned flag is set when the panel
    /// reports that the device list changed.
    pub fn open_panel(&self, device: Device) -> (DevicePanel, Arc<AtomicBool>) {
        let changed = Arc::new(AtomicBool::new(false));
        let flag = changed.clone();
        let name = device.name.clone();

        let panel = DevicePanel::new(
            device,
            self.api.clone(),
            Arc::new(TerminalSink::new(self.json)),
            move || debug!(device = %name, "panel closed"),
        )
        .with_devices_changed(move || flag.store(true, Ordering::SeqCst));

        (panel, changed)
    }

    /// Run `fut` behind a spinner (terminal output only).
    pub async fn spin<F: Future>(&self, message: &str, fut: F) -> F::Output {
        if self.json {
            return fut.await;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));

        let output = fut.await;
        pb.finish_and_clear();
        output
    }
}
