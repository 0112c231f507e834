//! Device panel controller.
//!
//! Turns operator actions into API calls, applies the results to
//! [`PanelState`] and reports one notice per action.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::state::{BusyAction, Modal, PanelState};
use super::Control;
use crate::api::DeviceApi;
use crate::error::{ApiError, CoreError, ValidationError};
use crate::notify::{NoticeKind, NotificationSink};
use crate::protocol::commands::{map_link, AlarmForm, CommandName, CommandRequest};
use crate::types::{Activity, Device, Id, InstalledApp};

type Hook = Box<dyn Fn() + Send + Sync>;

/// One open management view for a single device.
///
/// Instances are independent; dropping one orphans any request still in
/// flight without cancelling it.
pub struct DevicePanel {
    device: Device,
    api: Arc<dyn DeviceApi>,
    sink: Arc<dyn NotificationSink>,
    on_close: Hook,
    on_devices_changed: Option<Hook>,
    state: RwLock<PanelState>,
}

impl DevicePanel {
    pub fn new(
        device: Device,
        api: Arc<dyn DeviceApi>,
        sink: Arc<dyn NotificationSink>,
        on_close: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            device,
            api,
            sink,
            on_close: Box::new(on_close),
            on_devices_changed: None,
            state: RwLock::new(PanelState::new()),
        }
    }

    /// Hook fired whenever an action may have changed the host's device list.
    pub fn with_devices_changed(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_devices_changed = Some(Box::new(hook));
        self
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Snapshot of the current view state.
    pub async fn state(&self) -> PanelState {
        self.state.read().await.clone()
    }

    /// Initial load: the activity feed.
    pub async fn open(&self) -> Vec<Activity> {
        self.refresh_activities().await
    }

    // ==================== Synchronization ====================

    /// Re-fetch the activity feed. Failures leave it empty.
    pub async fn refresh_activities(&self) -> Vec<Activity> {
        let fetched = self.api.get_activities_by_device(&self.device.id).await;
        if let Err(e) = &fetched {
            warn!(device = %self.device.id, error = %e, "activity refresh failed");
        }
        let mut state = self.state.write().await;
        state.apply_activities(fetched);
        state.activities.clone()
    }

    /// Re-fetch the installed app list.
    ///
    /// A failure still empties the shown list; the error is returned so a
    /// caller can tell an unreachable server from a device with no apps.
    pub async fn refresh_apps(&self) -> Result<Vec<InstalledApp>, ApiError> {
        self.state.write().await.begin_apps_fetch();
        let fetched = self.api.get_installed_apps(&self.device.id).await;
        let outcome = match &fetched {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(device = %self.device.id, error = %e, "app refresh failed");
                Err(e.clone())
            }
        };
        let mut state = self.state.write().await;
        state.apply_apps(fetched);
        outcome.map(|()| state.apps.clone())
    }

    pub async fn open_apps(&self) -> Result<Vec<InstalledApp>, ApiError> {
        self.state.write().await.open_modal(Modal::Apps);
        self.refresh_apps().await
    }

    pub async fn close_modal(&self) {
        self.state.write().await.close_modal();
    }

    pub async fn set_app_filter(&self, filter: &str) {
        self.state.write().await.set_app_filter(filter);
    }

    // ==================== Command dispatch ====================

    /// Send `command` to the device.
    ///
    /// `delete` removes the device record instead and closes the panel on
    /// success. Every other command refreshes the activity feed and fires
    /// the device-list hook on success.
    pub async fn dispatch(
        &self,
        command: CommandName,
        parameters: Option<Value>,
    ) -> Result<(), CoreError> {
        if command.is_removal() {
            return self.remove_device().await;
        }

        let result = self.send(CommandRequest { command, parameters }).await;
        self.report(
            result,
            &format!("{} command sent successfully!", command),
            "Failed to send command",
            "An error occurred while sending the command!",
        )
        .await
    }

    async fn send(&self, request: CommandRequest) -> Result<(), CoreError> {
        self.ensure_device_id()?;
        self.state.write().await.try_begin(BusyAction::Command)?;

        info!(device = %self.device.id, command = %request.command, "dispatching command");
        let result = self.api.send_command(&self.device.id, &request).await;
        self.state.write().await.finish(BusyAction::Command);
        result?;

        self.refresh_activities().await;
        self.devices_changed();
        Ok(())
    }

    /// Dispatch `locate` and expose a map link for the device's location.
    pub async fn locate(&self) -> Result<Option<String>, CoreError> {
        self.dispatch(CommandName::Locate, None).await?;
        let link = map_link(&self.device.location);
        self.state.write().await.last_map_link = link.clone();
        Ok(link)
    }

    pub async fn open_alarm(&self) {
        self.state.write().await.open_modal(Modal::Alarm);
    }

    /// Validate the alarm form, then dispatch `alert`.
    ///
    /// An invalid form is rejected before any request is made.
    pub async fn send_alarm(&self, form: &AlarmForm) -> Result<(), CoreError> {
        let (message, schedule) = match form.resolve() {
            Ok(resolved) => resolved,
            Err(e) => return self.report(Err(e.into()), "", "", "").await,
        };

        let request = CommandRequest::alert(&message, schedule);
        self.dispatch(CommandName::Alert, request.parameters).await?;

        let mut state = self.state.write().await;
        if state.active_modal == Some(Modal::Alarm) {
            state.close_modal();
        }
        Ok(())
    }

    // ==================== App management ====================

    /// Set an app's installed flag. The local list changes only after the
    /// server confirms.
    pub async fn toggle_app(&self, app_id: &Id, installed: bool) -> Result<(), CoreError> {
        let result = self.toggle(app_id, installed).await;
        let success = if installed { "App enabled!" } else { "App disabled!" };
        self.report(
            result,
            success,
            "Failed to change app status",
            "An error occurred while changing the app status!",
        )
        .await
    }

    async fn toggle(&self, app_id: &Id, installed: bool) -> Result<(), CoreError> {
        self.ensure_device_id()?;
        self.state.write().await.try_begin(BusyAction::Toggle)?;

        let result = self
            .api
            .toggle_installed_app(&self.device.id, app_id, installed)
            .await;

        {
            let mut state = self.state.write().await;
            state.finish(BusyAction::Toggle);
            result?;
            if !state.apply_toggle(app_id, installed) {
                debug!(app = %app_id, "toggled app is not in the local list");
            }
        }

        self.refresh_activities().await;
        Ok(())
    }

    // ==================== Deletion ====================

    pub async fn request_delete(&self) {
        self.state.write().await.open_modal(Modal::DeleteConfirm);
    }

    /// Delete the device after the confirmation modal was shown.
    pub async fn confirm_delete(&self) -> Result<(), CoreError> {
        let confirmed = self.state.read().await.active_modal == Some(Modal::DeleteConfirm);
        if !confirmed {
            return self
                .report(Err(ValidationError::DeleteNotConfirmed.into()), "", "", "")
                .await;
        }
        let result = self.remove_device().await;
        let mut state = self.state.write().await;
        if state.active_modal == Some(Modal::DeleteConfirm) {
            state.close_modal();
        }
        result
    }

    async fn remove_device(&self) -> Result<(), CoreError> {
        let result = self.delete().await;
        let success = format!("Device \"{}\" deleted successfully!", self.device.name);
        self.report(
            result,
            &success,
            "Failed to delete device",
            "An error occurred while deleting the device!",
        )
        .await?;

        self.devices_changed();
        self.close().await;
        Ok(())
    }

    async fn delete(&self) -> Result<(), CoreError> {
        self.ensure_device_id()?;
        self.state.write().await.try_begin(BusyAction::Delete)?;

        info!(device = %self.device.id, "deleting device");
        let result = self.api.delete_device(&self.device.id).await;
        self.state.write().await.finish(BusyAction::Delete);
        result.map_err(CoreError::from)
    }

    // ==================== Controls ====================

    /// Handle a press on one of the panel's controls.
    ///
    /// Alarm and delete only open their modal; the follow-up is
    /// [`send_alarm`](Self::send_alarm) or [`confirm_delete`](Self::confirm_delete).
    pub async fn press(&self, control: Control) -> Result<(), CoreError> {
        match control {
            Control::Apps => {
                // A failed load shows an empty list without a notice.
                let _ = self.open_apps().await;
                Ok(())
            }
            Control::Locate => self.locate().await.map(|_| ()),
            Control::Alarm => {
                self.open_alarm().await;
                Ok(())
            }
            Control::Delete => {
                self.request_delete().await;
                Ok(())
            }
            inactive => {
                let err = ValidationError::ActionUnavailable(inactive.label().to_string());
                self.report(Err(err.into()), "", "", "").await
            }
        }
    }

    /// Close the panel and notify the host.
    pub async fn close(&self) {
        self.state.write().await.close();
        (self.on_close)();
    }

    // ==================== Helpers ====================

    fn ensure_device_id(&self) -> Result<(), ValidationError> {
        if self.device.id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(())
    }

    fn devices_changed(&self) {
        if let Some(hook) = &self.on_devices_changed {
            hook();
        }
    }

    /// Convert an action outcome into exactly one notice.
    async fn report(
        &self,
        result: Result<(), CoreError>,
        success: &str,
        context: &str,
        fallback: &str,
    ) -> Result<(), CoreError> {
        match result {
            Ok(()) => {
                self.sink.notify(NoticeKind::Success, success);
                Ok(())
            }
            Err(e) => {
                warn!(device = %self.device.id, error = %e, "panel action failed");
                let message = e.user_message(context, fallback);
                self.state.write().await.set_error(message.clone());
                self.sink.notify(NoticeKind::Error, &message);
                Err(e)
            }
        }
    }
}
