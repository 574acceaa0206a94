use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::{ClientSettings, LauncherConfig};
use crate::launcher::{Action, LaunchRequest, SelfLocation};
use crate::runtime::Runtime;

/// Handle a `<scheme>://<command>/<param>` command line.
#[tracing::instrument(skip(runtime, config))]
pub fn open<R: Runtime>(runtime: &R, config: &LauncherConfig, uri: &str) -> Result<Action> {
    let request = LaunchRequest::parse(uri, &config.scheme)?;
    let action = request
        .action()
        .with_context(|| format!("Cannot handle {}", uri))?;
    debug!("Dispatching {:?}", action);

    match &action {
        Action::RunGame { token } => {
            let settings = client_settings(runtime, config)?;
            info!("Run requested for token {}", token);
            println!("rungame token={} client={}", token, settings.client);
        }
    }

    Ok(action)
}

/// Settings of an installed launcher are created on first use and kept.
/// A launcher running from anywhere else gets throwaway defaults.
fn client_settings<R: Runtime>(runtime: &R, config: &LauncherConfig) -> Result<ClientSettings> {
    let location = SelfLocation::detect(runtime)?;
    if !location.is_installed_as(&config.package_name) {
        debug!("Not installed, using temporary client settings");
        return Ok(ClientSettings::default());
    }

    let Some(path) = ClientSettings::path(&location, config) else {
        return Ok(ClientSettings::default());
    };
    let settings = ClientSettings::load(runtime, &path);
    if !runtime.exists(&path) {
        settings.store(runtime, &path)?;
    }
    Ok(settings)
}
