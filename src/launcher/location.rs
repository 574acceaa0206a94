use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::package::PackageId;
use crate::runtime::Runtime;

/// Where the running executable lives, and what that says about it.
///
/// An installed launcher sits at `<repository root>/<name>~<version>/<exe>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfLocation {
    executable: PathBuf,
}

impl SelfLocation {
    #[tracing::instrument(skip(runtime))]
    pub fn detect<R: Runtime>(runtime: &R) -> Result<Self> {
        let executable = runtime
            .current_exe()
            .map_err(|e| Error::io("Resolving", "the running executable", e))?;
        Ok(Self { executable })
    }

    pub fn from_path(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Name of the directory holding the executable.
    pub fn package_dir_name(&self) -> Option<&str> {
        self.executable.parent()?.file_name()?.to_str()
    }

    /// The package this executable is installed as, read from its directory name.
    pub fn package_id(&self) -> Result<PackageId> {
        let dir_name = self.package_dir_name().ok_or_else(|| Error::Format {
            kind: "package name",
            input: self.executable.display().to_string(),
            reason: "executable is not inside a package directory".into(),
        })?;
        dir_name.parse()
    }

    /// The directory two levels above the executable, holding every versioned
    /// package directory. `None` when the path is too short to have one.
    pub fn repository_root(&self) -> Option<&Path> {
        self.executable.parent()?.parent()
    }

    /// True only when the containing directory parses as a package named `expected_name`.
    pub fn is_installed_as(&self, expected_name: &str) -> bool {
        self.package_id()
            .is_ok_and(|id| id.name() == expected_name)
    }
}
