use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::launcher::SelfLocation;
use crate::runtime::Runtime;

/// Root a fresh install goes to when `--root` is not given.
#[tracing::instrument(skip(runtime))]
pub fn default_install_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    if runtime.is_privileged() {
        Ok(system_install_root())
    } else {
        let home_dir = runtime
            .home_dir()
            .context("Could not find home directory")?;
        Ok(home_dir.join(".pkglaunch"))
    }
}

#[cfg(target_os = "macos")]
fn system_install_root() -> PathBuf {
    PathBuf::from("/opt/pkglaunch")
}

#[cfg(target_os = "windows")]
fn system_install_root() -> PathBuf {
    PathBuf::from(r"C:\ProgramData\pkglaunch")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_install_root() -> PathBuf {
    PathBuf::from("/usr/local/pkglaunch")
}

/// The package repository to work on: `--root` if given, otherwise the
/// directory the running launcher is installed in.
#[tracing::instrument(skip(runtime))]
pub fn repository_root<R: Runtime>(runtime: &R, root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }

    let location = SelfLocation::detect(runtime)?;
    if location.package_id().is_err() {
        anyhow::bail!(
            "{:?} is not inside a package directory; pass --root to choose a repository",
            location.executable()
        );
    }
    let root = location
        .repository_root()
        .with_context(|| format!("No repository above {:?}", location.executable()))?
        .to_path_buf();

    info!("Using repository root: {}", root.display());
    Ok(root)
}
