//! The running executable and child processes.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    /// `std::env::current_exe` already retries with a larger buffer on Windows
    /// until the full module path fits.
    #[tracing::instrument(skip(self))]
    pub(crate) fn current_exe_impl(&self) -> Result<PathBuf> {
        std::env::current_exe().context("Failed to resolve the running executable")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn spawn_impl(
        &self,
        program: &Path,
        args: &[String],
        cwd: Option<PathBuf>,
    ) -> Result<u32> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        let child = command
            .spawn()
            .with_context(|| format!("Failed to start {:?}", program))?;
        Ok(child.id())
    }
}
