use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::package::PackageDirectory;
use crate::runtime::Runtime;

use super::paths::repository_root;

/// List all installed packages
#[tracing::instrument(skip(runtime))]
pub fn list<R: Runtime>(runtime: &R, root: Option<PathBuf>) -> Result<()> {
    let root = repository_root(runtime, root)?;
    debug!("Listing packages from {:?}", root);

    let directory = PackageDirectory::scan(runtime, &root)?;
    for line in package_lines(&directory) {
        println!("{}", line);
    }
    Ok(())
}

/// `name version path`, one line per installed version, oldest first.
pub fn package_lines(directory: &PackageDirectory) -> Vec<String> {
    if directory.is_empty() {
        return vec!["No packages installed.".to_string()];
    }
    directory
        .iter()
        .map(|(id, path)| format!("{} {} {}", id.name(), id.version(), path.display()))
        .collect()
}
