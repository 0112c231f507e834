//! Application management.

use mdm_panel_core::types::{Id, InstalledApp};

use crate::cli::{AppArgs, AppCommands, AppsArgs};
use crate::error::CliError;
use crate::session::Session;

/// Run the apps command
pub async fn run_apps(args: AppsArgs, session: &Session) -> Result<(), CliError> {
    let device = session.find_device(&args.device).await?;
    let (panel, _) = session.open_panel(device);

    session.spin("Loading applications", panel.open_apps()).await?;
    let filter = args.search.unwrap_or_default();
    panel.set_app_filter(&filter).await;

    let state = panel.state().await;
    let apps = state.filtered_apps();
    println!("{}", session.formatter.format_apps(panel.device(), &apps, &filter));

    panel.close_modal().await;
    Ok(())
}

/// Run the app enable/disable command
pub async fn run_app(args: AppArgs, session: &Session) -> Result<(), CliError> {
    let (toggle, installed) = match args.command {
        AppCommands::Enable(toggle) => (toggle, true),
        AppCommands::Disable(toggle) => (toggle, false),
    };

    let device = session.find_device(&toggle.device).await?;
    let (panel, _) = session.open_panel(device);
    let app_id = Id::new(toggle.app_id.trim());

    // An unreachable server must not read as an unknown app id.
    let apps = session.spin("Loading applications", panel.open_apps()).await?;
    if !contains_app(&apps, &app_id) {
        return Err(CliError::InvalidArgument(format!(
            "no application with id '{}' on {}",
            app_id,
            panel.device().name
        )));
    }

    let action = if installed { "Enabling app" } else { "Disabling app" };
    session
        .spin(action, panel.toggle_app(&app_id, installed))
        .await
        .map_err(CliError::Panel)?;

    let state = panel.state().await;
    let updated: Vec<&InstalledApp> = state.apps.iter().filter(|a| a.id == app_id).collect();
    println!("{}", session.formatter.format_apps(panel.device(), &updated, ""));

    panel.close_modal().await;
    Ok(())
}

fn contains_app(apps: &[InstalledApp], app_id: &Id) -> bool {
    apps.iter().any(|a| &a.id == app_id)
}
