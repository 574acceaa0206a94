use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::config::LauncherConfig;
use crate::launcher::SelfLocation;
use crate::runtime::Runtime;

mod install;
mod list;
mod open;
mod paths;
mod plan;
mod status;

pub use install::install;
pub use list::{list, package_lines};
pub use open::open;
pub use paths::{default_install_root, repository_root};
pub use plan::plan;
pub use status::{StatusReport, status};

/// Bare invocation, or the URI handed over by the scheme handler.
///
/// A launcher that is not installed yet installs itself first (with a prompt)
/// and ignores the URI.
#[tracing::instrument(skip(runtime, config))]
pub fn launch<R: Runtime>(
    runtime: &R,
    config: &LauncherConfig,
    install_root: Option<PathBuf>,
    uri: Option<&str>,
) -> Result<()> {
    let location = SelfLocation::detect(runtime)?;
    if !location.is_installed_as(&config.package_name) {
        info!("Not installed as {}, starting installation", config.package_name);
        install(runtime, config, install_root, false)?;
        return Ok(());
    }

    match uri {
        Some(uri) => open(runtime, config, uri).map(|_| ()),
        None => status(runtime, config),
    }
}
