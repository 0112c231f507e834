//! Error types for the MDM panel core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Message suitable for the notification sink.
    ///
    /// Rejections carry the server's own message; transport failures are
    /// reported with `fallback` since their detail is meaningless to a user.
    pub fn user_message(&self, context: &str, fallback: &str) -> String {
        match self {
            CoreError::Api(ApiError::Rejected { message, .. }) => {
                format!("{}: {}", context, message)
            }
            CoreError::Api(ApiError::InvalidResponse { message }) => {
                format!("{}: {}", context, message)
            }
            CoreError::Api(ApiError::Transport(_)) => fallback.to_string(),
            CoreError::Validation(e) => e.to_string(),
            other => format!("{}: {}", context, other),
        }
    }
}

/// Remote API failures.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network or connectivity failure; the request may not have arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered and refused the request.
    #[error("Request rejected{}: {message}", status_suffix(.status))]
    Rejected { status: Option<u16>, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

/// Client-side checks that block an action before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Device identifier cannot be empty")]
    EmptyDeviceId,

    #[error("Choose a time for the scheduled alarm")]
    MissingScheduleTime,

    #[error("Invalid schedule time: {0}")]
    InvalidScheduleTime(String),

    #[error("'{0}' is already in progress")]
    ActionBusy(String),

    #[error("'{0}' is not active yet")]
    ActionUnavailable(String),

    #[error("Device deletion must be confirmed first")]
    DeleteNotConfirmed,

    #[error("The device panel is closed")]
    PanelClosed,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_with_status() {
        let err = ApiError::Rejected {
            status: Some(404),
            message: "Device not found".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Request rejected (HTTP 404): Device not found"
        );
    }

    #[test]
    fn test_rejected_display_without_status() {
        let err = ApiError::Rejected {
            status: None,
            message: "busy".to_string(),
        };
        assert_eq!(format!("{}", err), "Request rejected: busy");
    }

    #[test]
    fn test_user_message_uses_server_text_for_rejections() {
        let err = CoreError::Api(ApiError::Rejected {
            status: None,
            message: "offline".to_string(),
        });
        assert_eq!(
            err.user_message("Failed to send command", "generic"),
            "Failed to send command: offline"
        );
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = CoreError::Api(ApiError::Transport("connection refused".to_string()));
        assert_eq!(
            err.user_message("Failed to send command", "Something went wrong"),
            "Something went wrong"
        );
    }
}
