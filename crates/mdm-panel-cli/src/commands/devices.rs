//! Device listing.

use crate::error::CliError;
use crate::session::Session;

/// Run the devices command
pub async fn run_devices(session: &Session) -> Result<(), CliError> {
    let devices = session.devices().await?;
    println!("{}", session.formatter.format_devices(&devices));
    Ok(())
}
