use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

use super::SelfLocation;

/// Copies the running launcher into a versioned package directory.
///
/// Layout produced: `<dest_root>/<package_name>~<version>/<package_name><EXE_SUFFIX>`,
/// the same layout [`SelfLocation::is_installed_as`] recognizes.
pub struct SelfInstaller<'a, R: Runtime> {
    runtime: &'a R,
    config: &'a LauncherConfig,
}

impl<'a, R: Runtime> SelfInstaller<'a, R> {
    pub fn new(runtime: &'a R, config: &'a LauncherConfig) -> Self {
        Self { runtime, config }
    }

    /// Directory the launcher is installed into below `dest_root`.
    pub fn target_dir(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(self.config.install_dir_name())
    }

    /// Full path of the installed executable below `dest_root`.
    pub fn target_executable(&self, dest_root: &Path) -> PathBuf {
        self.target_dir(dest_root)
            .join(self.config.executable_name())
    }

    /// Install and return the path of the installed executable.
    ///
    /// Reinstalling the same version overwrites the executable in place.
    #[tracing::instrument(skip(self))]
    pub fn install(&self, location: &SelfLocation, dest_root: &Path) -> Result<PathBuf> {
        let target_dir = self.target_dir(dest_root);
        if self.runtime.is_dir(&target_dir) {
            debug!("Reusing existing directory {:?}", target_dir);
        } else {
            self.runtime
                .create_dir_all(&target_dir)
                .map_err(|e| Error::io("Creating", &target_dir, e))?;
        }

        let target = self.target_executable(dest_root);
        if target == location.executable() {
            info!("Already running from {:?}", target);
            return Ok(target);
        }

        let bytes = self
            .runtime
            .copy(location.executable(), &target)
            .map_err(|e| Error::io("Copying launcher to", &target, e))?;
        info!(
            "Installed {} ({} bytes) to {:?}",
            self.config.install_dir_name(),
            bytes,
            target
        );

        Ok(target)
    }
}

/// Command line a URI scheme registration should run for `executable`.
pub fn handler_command(executable: &Path) -> String {
    format!("\"{}\" \"%1\"", executable.display())
}
