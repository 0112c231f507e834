//! Device command names and request builders.
//!
//! Commands are posted to `/devices/{id}/commands` and executed by the
//! device at some later point; completion shows up in the activity feed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ValidationError;

/// Message sent with an alarm when the operator leaves it blank.
pub const DEFAULT_ALARM_MESSAGE: &str = "Please contact your administrator.";

/// Accepted formats for a local schedule time.
const SCHEDULE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Recognized command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    Lock,
    Unlock,
    Locate,
    Restart,
    Wipe,
    Alert,
    Delete,
}

impl CommandName {
    pub const ALL: [CommandName; 7] = [
        CommandName::Lock,
        CommandName::Unlock,
        CommandName::Locate,
        CommandName::Restart,
        CommandName::Wipe,
        CommandName::Alert,
        CommandName::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Lock => "lock",
            CommandName::Unlock => "unlock",
            CommandName::Locate => "locate",
            CommandName::Restart => "restart",
            CommandName::Wipe => "wipe",
            CommandName::Alert => "alert",
            CommandName::Delete => "delete",
        }
    }

    /// `delete` removes the device record instead of instructing the device.
    pub fn is_removal(&self) -> bool {
        matches!(self, CommandName::Delete)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandName::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown command '{}'", s))
    }
}

/// When an alarm should go off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmSchedule {
    Immediate,
    Scheduled(DateTime<Utc>),
}

/// Alarm parameters as entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmForm {
    pub message: String,
    /// Whether "scheduled" is selected instead of "immediate".
    pub scheduled: bool,
    /// Local wall-clock time, e.g. `2024-06-01T09:30`.
    pub scheduled_at: Option<String>,
}

impl AlarmForm {
    pub fn immediate(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            scheduled: false,
            scheduled_at: None,
        }
    }

    pub fn scheduled(message: impl Into<String>, at: Option<String>) -> Self {
        Self {
            message: message.into(),
            scheduled: true,
            scheduled_at: at,
        }
    }

    /// Validate the form and resolve the schedule against the local timezone.
    pub fn resolve(&self) -> Result<(String, AlarmSchedule), ValidationError> {
        let message = if self.message.trim().is_empty() {
            DEFAULT_ALARM_MESSAGE.to_string()
        } else {
            self.message.trim().to_string()
        };

        if !self.scheduled {
            return Ok((message, AlarmSchedule::Immediate));
        }

        let raw = match self.scheduled_at.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(ValidationError::MissingScheduleTime),
        };

        let at = parse_local_time(raw, &Local)?;
        Ok((message, AlarmSchedule::Scheduled(at)))
    }
}

/// Parse a wall-clock time in `tz` and convert it to an absolute instant.
pub fn parse_local_time<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
    let naive = SCHEDULE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidScheduleTime(raw.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidScheduleTime(raw.to_string()))
}

/// Body of a command submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRequest {
    pub command: CommandName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl CommandRequest {
    /// Alert command; `scheduledAt` is null for immediate dispatch.
    pub fn alert(message: &str, schedule: AlarmSchedule) -> Self {
        let scheduled_at = match schedule {
            AlarmSchedule::Immediate => Value::Null,
            AlarmSchedule::Scheduled(at) => Value::String(at.to_rfc3339()),
        };
        Self {
            command: CommandName::Alert,
            parameters: Some(json!({
                "message": message,
                "scheduledAt": scheduled_at,
            })),
        }
    }
}

/// Map search link for a free-text location, if there is one.
pub fn map_link(location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    reqwest::Url::parse_with_params(
        "https://www.google.com/maps/search/",
        &[("api", "1"), ("query", location)],
    )
    .ok()
    .map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_command_name_round_trip() {
        for cmd in CommandName::ALL {
            assert_eq!(cmd.as_str().parse::<CommandName>().unwrap(), cmd);
        }
        assert!("reboot".parse::<CommandName>().is_err());
        assert!(CommandName::Delete.is_removal());
        assert!(!CommandName::Locate.is_removal());
    }

    #[test]
    fn test_scheduled_without_time_is_rejected() {
        let form = AlarmForm::scheduled("wake up", None);
        assert_eq!(form.resolve(), Err(ValidationError::MissingScheduleTime));

        let blank = AlarmForm::scheduled("wake up", Some("  ".to_string()));
        assert_eq!(blank.resolve(), Err(ValidationError::MissingScheduleTime));
    }

    #[test]
    fn test_empty_message_uses_placeholder() {
        let (message, schedule) = AlarmForm::immediate("   ").resolve().unwrap();
        assert_eq!(message, DEFAULT_ALARM_MESSAGE);
        assert_eq!(schedule, AlarmSchedule::Immediate);
    }

    #[test]
    fn test_parse_local_time_converts_to_utc() {
        let istanbul = FixedOffset::east_opt(3 * 3600).unwrap();
        let at = parse_local_time("2024-06-01T09:30", &istanbul).unwrap();
        assert_eq!(at.to_rfc3339(), "2024-06-01T06:30:00+00:00");

        let spaced = parse_local_time("2024-06-01 09:30", &istanbul).unwrap();
        assert_eq!(spaced, at);
    }

    #[test]
    fn test_parse_local_time_rejects_garbage() {
        let err = parse_local_time("tomorrow", &Utc).unwrap_err();
        assert_eq!(err, ValidationError::InvalidScheduleTime("tomorrow".to_string()));
    }

    #[test]
    fn test_alert_request_body() {
        let at = parse_local_time("2024-06-01T09:30", &Utc).unwrap();
        let body = serde_json::to_value(CommandRequest::alert("hi", AlarmSchedule::Scheduled(at))).unwrap();
        assert_eq!(body["command"], "alert");
        assert_eq!(body["parameters"]["message"], "hi");
        assert_eq!(body["parameters"]["scheduledAt"], "2024-06-01T09:30:00+00:00");

        let now = serde_json::to_value(CommandRequest::alert("hi", AlarmSchedule::Immediate)).unwrap();
        assert!(now["parameters"]["scheduledAt"].is_null());
    }

    #[test]
    fn test_locate_request_has_no_parameters() {
        let request = CommandRequest {
            command: CommandName::Locate,
            parameters: None,
        };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body, json!({ "command": "locate" }));
    }

    #[test]
    fn test_map_link() {
        assert_eq!(map_link("  "), None);
        let link = map_link("Kadikoy, Istanbul").unwrap();
        assert!(link.starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert!(link.contains("Kadikoy"));
        assert!(!link.contains(' '));
    }
}
