//! Error types for the MDM panel CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use mdm_panel_core::error::{ApiError, ConfigError, CoreError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    /// A panel action failed and the panel already reported it.
    #[error("{0}")]
    Panel(CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) | CliError::Panel(e) => match e {
                CoreError::Api(ApiError::Transport(_)) => exit_codes::NETWORK_ERROR,
                CoreError::Api(_) => exit_codes::DEVICE_ERROR,
                CoreError::Validation(_) => exit_codes::INVALID_ARGS,
                CoreError::Config(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::DeviceNotFound(_) => exit_codes::DEVICE_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
        }
    }

    /// Whether the message still needs to be printed.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Panel(_))
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Core(CoreError::Api(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}
