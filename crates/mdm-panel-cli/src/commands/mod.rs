//! Command implementations.

pub mod alarm;
pub mod apps;
pub mod delete;
pub mod devices;
pub mod locate;
pub mod show;

pub use alarm::run_alarm;
pub use apps::{run_app, run_apps};
pub use delete::run_delete;
pub use devices::run_devices;
pub use locate::run_locate;
pub use show::run_show;
