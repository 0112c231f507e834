//! Alarm command.

use mdm_panel_core::protocol::commands::AlarmForm;

use crate::cli::AlarmArgs;
use crate::error::CliError;
use crate::session::Session;

/// Run the alarm command
pub async fn run_alarm(args: AlarmArgs, session: &Session) -> Result<(), CliError> {
    let device = session.find_device(&args.device).await?;
    let (panel, _) = session.open_panel(device);

    // --at alone implies a scheduled alarm.
    let form = if args.schedule || args.at.is_some() {
        AlarmForm::scheduled(args.message, args.at)
    } else {
        AlarmForm::immediate(args.message)
    };

    panel.open_alarm().await;
    session
        .spin("Sending alarm", panel.send_alarm(&form))
        .await
        .map_err(CliError::Panel)
}
