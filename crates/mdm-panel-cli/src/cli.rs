//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// MDM Panel - manage a single device from the terminal
#[derive(Parser, Debug)]
#[command(name = "mdm-panel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "MDM_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Base URL of the device API
    #[arg(long, global = true, env = "MDM_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token for the device API
    #[arg(long, global = true, env = "MDM_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List managed devices
    Devices,

    /// Show device overview and recent activity
    Show(DeviceArgs),

    /// List applications on a device
    Apps(AppsArgs),

    /// Enable or disable an application
    App(AppArgs),

    /// Send a locate command and print a map link
    Locate(DeviceArgs),

    /// Send an alarm, now or at a scheduled time
    Alarm(AlarmArgs),

    /// Permanently delete a device
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Device id or name
    pub device: String,
}

// ==================== Apps ====================

#[derive(Args, Debug)]
pub struct AppsArgs {
    /// Device id or name
    pub device: String,

    /// Filter by app or package name (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// Mark an app as installed
    Enable(AppToggleArgs),

    /// Mark an app as not installed
    Disable(AppToggleArgs),
}

#[derive(Args, Debug)]
pub struct AppToggleArgs {
    /// Device id or name
    pub device: String,

    /// Application id
    pub app_id: String,
}

// ==================== Alarm ====================

#[derive(Args, Debug)]
pub struct AlarmArgs {
    /// Device id or name
    pub device: String,

    /// Message shown on the device
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Schedule instead of sending immediately (requires --at)
    #[arg(long)]
    pub schedule: bool,

    /// Local time for a scheduled alarm, e.g. "2024-06-01 09:30"
    #[arg(long)]
    pub at: Option<String>,
}

// ==================== Delete ====================

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Device id or name
    pub device: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alarm_args() {
        let cli = Cli::try_parse_from([
            "mdm-panel", "alarm", "D1", "--message", "hello", "--schedule", "--at", "2024-06-01 09:30",
        ])
        .unwrap();
        match cli.command {
            Commands::Alarm(args) => {
                assert_eq!(args.device, "D1");
                assert_eq!(args.message, "hello");
                assert!(args.schedule);
                assert_eq!(args.at.as_deref(), Some("2024-06-01 09:30"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_app_toggle() {
        let cli = Cli::try_parse_from(["mdm-panel", "--json", "app", "disable", "D1", "12"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::App(AppArgs {
                command: AppCommands::Disable(args),
            }) => {
                assert_eq!(args.device, "D1");
                assert_eq!(args.app_id, "12");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
