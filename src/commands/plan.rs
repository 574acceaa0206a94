use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::launch::{LaunchPlan, PlanResolution};
use crate::package::PackageDirectory;
use crate::runtime::Runtime;

use super::paths::repository_root;

/// Resolve a launch plan file against the package repository, and start the
/// result when `run` is set.
///
/// Returns the process id of the started program, if any.
#[tracing::instrument(skip(runtime))]
pub fn plan<R: Runtime>(
    runtime: &R,
    root: Option<PathBuf>,
    file: &Path,
    run: bool,
) -> Result<Option<u32>> {
    let root = repository_root(runtime, root)?;
    let directory = PackageDirectory::scan(runtime, &root)?;
    let plan = LaunchPlan::load(runtime, file)?;

    let PlanResolution { launch, missing } = plan
        .resolve(&directory)
        .with_context(|| format!("Failed to resolve launch plan {:?}", file))?;
    debug!("Resolved {:?}", launch);

    for package in &missing {
        warn!("{} is not installed", package.id);
        println!(
            "Missing: {} (expected at {})",
            package.id,
            package.path.display()
        );
    }
    println!("Command: {}", launch);

    if !run {
        return Ok(None);
    }
    if !missing.is_empty() {
        anyhow::bail!("Cannot run: {} package(s) missing", missing.len());
    }

    let pid = launch.run(runtime)?;
    println!("Started process {}", pid);
    Ok(Some(pid))
}
