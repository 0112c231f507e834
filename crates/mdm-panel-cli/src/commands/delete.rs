//! Device deletion.

use std::sync::atomic::Ordering;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::DeleteArgs;
use crate::error::CliError;
use crate::session::Session;

/// Run the delete command
pub async fn run_delete(args: DeleteArgs, session: &Session) -> Result<(), CliError> {
    let device = session.find_device(&args.device).await?;
    let (panel, changed) = session.open_panel(device);

    panel.request_delete().await;

    if !args.yes && !confirm(&panel.device().name).await? {
        panel.close_modal().await;
        println!("{}", session.formatter.format_message("Deletion cancelled."));
        return Ok(());
    }

    session
        .spin("Deleting device", panel.confirm_delete())
        .await
        .map_err(CliError::Panel)?;

    if changed.load(Ordering::SeqCst) && !session.json {
        let remaining = session.devices().await?;
        println!("{}", session.formatter.format_devices(&remaining));
    }

    Ok(())
}

async fn confirm(name: &str) -> Result<bool, CliError> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            format!(
                "Device \"{}\" will be permanently deleted along with its commands, apps and activity. Continue? [y/N] ",
                name
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
