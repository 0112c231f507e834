//! Locate command.

use crate::cli::DeviceArgs;
use crate::error::CliError;
use crate::session::Session;

/// Run the locate command
pub async fn run_locate(args: DeviceArgs, session: &Session) -> Result<(), CliError> {
    let device = session.find_device(&args.device).await?;
    let (panel, _) = session.open_panel(device);

    let link = session
        .spin("Sending locate command", panel.locate())
        .await
        .map_err(CliError::Panel)?;

    println!(
        "{}",
        session.formatter.format_map_link(panel.device(), link.as_deref())
    );
    Ok(())
}
