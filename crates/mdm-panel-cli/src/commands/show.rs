//! Device overview.

use crate::cli::DeviceArgs;
use crate::error::CliError;
use crate::session::Session;

/// Run the show command
pub async fn run_show(args: DeviceArgs, session: &Session) -> Result<(), CliError> {
    let device = session.find_device(&args.device).await?;
    let (panel, _) = session.open_panel(device);

    session.spin("Loading activity", panel.open()).await;
    let state = panel.state().await;

    println!("{}", session.formatter.format_panel(panel.device(), &state));
    Ok(())
}
