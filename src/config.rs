//! Launcher configuration.
//!
//! [`LauncherConfig`] names the launcher's own package, version and URI scheme.
//! It is resolved once in `main` and handed to everything that needs it.
//! [`ClientSettings`] is the small JSON file kept next to the installed
//! executable.

use log::{debug, warn};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::launcher::SelfLocation;
use crate::package::VERSION_SEPARATOR;
use crate::runtime::Runtime;

/// Version this binary was built as (set by `build.rs`).
pub const BUILD_VERSION: &str = env!("PKGLAUNCH_VERSION");

const STABLE_NAME: &str = "pkglaunch";
const DEBUG_SUFFIX: &str = "-debug";
const CLIENT_ID_LEN: usize = 16;

/// Release channel. A debug launcher installs and registers under its own
/// name so it can live next to the stable one.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Stable,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub package_name: String,
    pub version: String,
    pub scheme: String,
}

impl LauncherConfig {
    pub fn for_channel(channel: Channel) -> Self {
        let name = match channel {
            Channel::Stable => STABLE_NAME.to_string(),
            Channel::Debug => format!("{}{}", STABLE_NAME, DEBUG_SUFFIX),
        };
        Self {
            package_name: name.clone(),
            version: BUILD_VERSION.to_string(),
            scheme: name,
        }
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// `<package_name>~<version>`
    pub fn install_dir_name(&self) -> String {
        format!("{}{}{}", self.package_name, VERSION_SEPARATOR, self.version)
    }

    /// File name of the installed executable (`pkglaunch`, `pkglaunch.exe`).
    pub fn executable_name(&self) -> String {
        format!("{}{}", self.package_name, std::env::consts::EXE_SUFFIX)
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::for_channel(Channel::default())
    }
}

/// Per-installation client identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default = "random_client_id")]
    pub client: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user: None,
            client: random_client_id(),
        }
    }
}

impl ClientSettings {
    /// `<exe dir>/<package_name>.json`
    pub fn path(location: &SelfLocation, config: &LauncherConfig) -> Option<PathBuf> {
        let dir = location.executable().parent()?;
        Some(dir.join(format!("{}.json", config.package_name)))
    }

    /// Load settings, falling back to fresh defaults when the file is missing or broken.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Self {
        if !runtime.exists(path) {
            debug!("No client settings at {:?}, using defaults", path);
            return Self::default();
        }

        match runtime
            .read_to_string(path)
            .map(|content| serde_json::from_str::<Self>(&content))
        {
            Ok(Ok(settings)) => settings,
            Ok(Err(e)) => {
                warn!("Ignoring malformed client settings {:?}: {}", path, e);
                Self::default()
            }
            Err(e) => {
                warn!("Failed to read client settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    #[tracing::instrument(skip(self, runtime))]
    pub fn store<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(Error::Settings)?;
        runtime
            .write(path, content.as_bytes())
            .map_err(|e| Error::io("Writing client settings to", path, e))
    }
}

fn random_client_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .filter(u8::is_ascii_alphabetic)
        .take(CLIENT_ID_LEN)
        .map(char::from)
        .collect()
}
