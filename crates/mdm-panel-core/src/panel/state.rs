//! Panel view state and its transitions.
//!
//! Everything here is synchronous and free of I/O; the controller fetches,
//! then hands results to these functions.

use serde::Serialize;

use crate::error::{ApiError, ValidationError};
use crate::types::{Activity, Id, InstalledApp, RECENT_ACTIVITY_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    Apps,
    Alarm,
    DeleteConfirm,
}

/// Mutating actions that guard against duplicate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyAction {
    Command,
    Toggle,
    Delete,
}

impl BusyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusyAction::Command => "command",
            BusyAction::Toggle => "app toggle",
            BusyAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyFlags {
    pub command: bool,
    pub toggle: bool,
    pub delete: bool,
}

impl BusyFlags {
    fn slot(&mut self, action: BusyAction) -> &mut bool {
        match action {
            BusyAction::Command => &mut self.command,
            BusyAction::Toggle => &mut self.toggle,
            BusyAction::Delete => &mut self.delete,
        }
    }
}

/// View state of one open device panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    pub status: PanelStatus,
    pub active_modal: Option<Modal>,
    pub error_message: Option<String>,
    /// Server order, most recent first
    pub activities: Vec<Activity>,
    pub apps: Vec<InstalledApp>,
    pub apps_loading: bool,
    pub app_filter: String,
    pub busy: BusyFlags,
    pub last_map_link: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            status: PanelStatus::Open,
            active_modal: None,
            error_message: None,
            activities: Vec::new(),
            apps: Vec::new(),
            apps_loading: false,
            app_filter: String::new(),
            busy: BusyFlags::default(),
            last_map_link: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PanelStatus::Open
    }

    /// The feed window: first entries in server order, never re-sorted.
    pub fn recent_activities(&self) -> &[Activity] {
        let end = self.activities.len().min(RECENT_ACTIVITY_LIMIT);
        &self.activities[..end]
    }

    pub fn filtered_apps(&self) -> Vec<&InstalledApp> {
        self.apps
            .iter()
            .filter(|app| app.matches(&self.app_filter))
            .collect()
    }

    /// Replace the feed. A failed fetch empties it rather than keeping stale entries.
    pub fn apply_activities(&mut self, fetched: Result<Vec<Activity>, ApiError>) {
        self.activities = fetched.unwrap_or_default();
    }

    pub fn begin_apps_fetch(&mut self) {
        self.apps_loading = true;
    }

    /// Replace the app list. Whatever resolves last wins; a failure empties it.
    pub fn apply_apps(&mut self, fetched: Result<Vec<InstalledApp>, ApiError>) {
        self.apps = fetched.unwrap_or_default();
        self.apps_loading = false;
    }

    /// Set one app's installed flag after the server confirmed the change.
    ///
    /// Returns false when no entry has `app_id`.
    pub fn apply_toggle(&mut self, app_id: &Id, installed: bool) -> bool {
        match self.apps.iter_mut().find(|app| &app.id == app_id) {
            Some(app) => {
                app.is_installed = installed;
                true
            }
            None => false,
        }
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.active_modal = Some(modal);
        if modal == Modal::Apps {
            self.apps_loading = true;
        }
    }

    /// Close whatever modal is showing. Closing app management drops its list.
    pub fn close_modal(&mut self) {
        if self.active_modal == Some(Modal::Apps) {
            self.apps.clear();
            self.app_filter.clear();
            self.apps_loading = false;
        }
        self.active_modal = None;
    }

    pub fn set_app_filter(&mut self, filter: &str) {
        self.app_filter = filter.to_string();
    }

    /// Mark `action` as in flight, refusing a second concurrent submission.
    pub fn try_begin(&mut self, action: BusyAction) -> Result<(), ValidationError> {
        if !self.is_open() {
            return Err(ValidationError::PanelClosed);
        }
        let slot = self.busy.slot(action);
        if *slot {
            return Err(ValidationError::ActionBusy(action.as_str().to_string()));
        }
        *slot = true;
        self.error_message = None;
        Ok(())
    }

    pub fn finish(&mut self, action: BusyAction) {
        *self.busy.slot(action) = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn close(&mut self) {
        self.status = PanelStatus::Closed;
        self.active_modal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{activity, app};

    fn with_apps() -> PanelState {
        let mut state = PanelState::new();
        state.open_modal(Modal::Apps);
        state.apply_apps(Ok(vec![
            app(1, "Maps", true),
            app(2, "Chrome", false),
            app(3, "Slack", true),
        ]));
        state
    }

    #[test]
    fn test_recent_activities_keeps_server_order() {
        let mut state = PanelState::new();
        let actions = ["alert", "locate", "lock", "wipe", "restart", "unlock", "locate"];
        state.apply_activities(Ok(actions
            .iter()
            .enumerate()
            .map(|(i, a)| activity(100 - i as i64, a))
            .collect()));

        let recent = state.recent_activities();
        assert_eq!(recent.len(), RECENT_ACTIVITY_LIMIT);
        let ids: Vec<&str> = recent.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["100", "99", "98", "97", "96"]);
    }

    #[test]
    fn test_failed_activity_fetch_empties_feed() {
        let mut state = PanelState::new();
        state.apply_activities(Ok(vec![activity(1, "locate")]));
        state.apply_activities(Err(ApiError::Transport("down".to_string())));
        assert!(state.activities.is_empty());
    }

    #[test]
    fn test_apply_toggle_changes_only_matching_entry() {
        let mut state = with_apps();
        let before = state.apps.clone();

        assert!(state.apply_toggle(&Id::new("2"), true));

        for (old, new) in before.iter().zip(&state.apps) {
            if old.id == Id::new("2") {
                assert!(new.is_installed);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_apply_toggle_unknown_id() {
        let mut state = with_apps();
        let before = state.apps.clone();
        assert!(!state.apply_toggle(&Id::new("99"), false));
        assert_eq!(state.apps, before);
    }

    #[test]
    fn test_closing_app_modal_drops_list() {
        let mut state = with_apps();
        state.set_app_filter("map");
        state.close_modal();

        assert_eq!(state.active_modal, None);
        assert!(state.apps.is_empty());
        assert!(state.app_filter.is_empty());
    }

    #[test]
    fn test_closing_other_modal_keeps_apps() {
        let mut state = with_apps();
        state.open_modal(Modal::DeleteConfirm);
        state.close_modal();
        assert_eq!(state.apps.len(), 3);
    }

    #[test]
    fn test_filtered_apps() {
        let mut state = with_apps();
        state.set_app_filter("SL");
        let names: Vec<&str> = state.filtered_apps().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Slack"]);
        assert_eq!(state.apps.len(), 3);
    }

    #[test]
    fn test_busy_flag_blocks_duplicate_submission() {
        let mut state = PanelState::new();
        state.try_begin(BusyAction::Command).unwrap();
        assert_eq!(
            state.try_begin(BusyAction::Command),
            Err(ValidationError::ActionBusy("command".to_string()))
        );
        // Other actions have their own flag.
        state.try_begin(BusyAction::Toggle).unwrap();

        state.finish(BusyAction::Command);
        assert!(state.try_begin(BusyAction::Command).is_ok());
    }

    #[test]
    fn test_closed_panel_rejects_actions() {
        let mut state = PanelState::new();
        state.close();
        assert_eq!(
            state.try_begin(BusyAction::Delete),
            Err(ValidationError::PanelClosed)
        );
    }
}
