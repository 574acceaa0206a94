use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

use crate::config::LauncherConfig;
use crate::launcher::SelfLocation;
use crate::package::PackageId;
use crate::runtime::Runtime;

/// What the running launcher knows about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub package_name: String,
    pub version: String,
    pub scheme: String,
    pub executable: PathBuf,
    pub package: Option<PackageId>,
    pub installed: bool,
    pub repository_root: Option<PathBuf>,
}

impl StatusReport {
    pub fn collect<R: Runtime>(runtime: &R, config: &LauncherConfig) -> Result<Self> {
        let location = SelfLocation::detect(runtime)?;
        let package = location.package_id().ok();
        let installed = location.is_installed_as(&config.package_name);

        Ok(Self {
            package_name: config.package_name.clone(),
            version: config.version.clone(),
            scheme: config.scheme.clone(),
            executable: location.executable().to_path_buf(),
            package,
            installed,
            repository_root: installed
                .then(|| location.repository_root().map(|p| p.to_path_buf()))
                .flatten(),
        })
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launcher:   {} {}", self.package_name, self.version)?;
        writeln!(f, "Scheme:     {}://", self.scheme)?;
        writeln!(f, "Executable: {}", self.executable.display())?;
        match &self.package {
            Some(id) if self.installed => writeln!(f, "Installed:  yes ({})", id)?,
            Some(id) => writeln!(f, "Installed:  no (inside {}, expected {})", id, self.package_name)?,
            None => writeln!(f, "Installed:  no")?,
        }
        if let Some(root) = &self.repository_root {
            writeln!(f, "Repository: {}", root.display())?;
        }
        Ok(())
    }
}

/// Print where the launcher runs from and whether it is installed.
#[tracing::instrument(skip(runtime, config))]
pub fn status<R: Runtime>(runtime: &R, config: &LauncherConfig) -> Result<()> {
    let report = StatusReport::collect(runtime, config)?;
    print!("{}", report);
    Ok(())
}
