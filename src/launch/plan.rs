use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::package::{PackageDirectory, PackageId};
use crate::runtime::Runtime;

use super::substitute_vars;

/// A package (and exact version) a launch depends on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    pub package: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub md5: String,
}

impl PackageRequirement {
    pub fn id(&self) -> Result<PackageId> {
        PackageId::from_parts(&self.package, &self.version)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteSpec {
    #[serde(default)]
    pub executable: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSpec {
    #[serde(default)]
    pub chdir: String,
    #[serde(default)]
    pub execute: ExecuteSpec,
}

/// What to run and which packages it needs.
///
/// Strings in `runtime` may reference `{{name}}` placeholders. Each required
/// package is available under its own name, bound to its package directory;
/// `variables` supplies the rest.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchPlan {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(default)]
    pub packages: Vec<PackageRequirement>,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub runtime: RuntimeSpec,
}

/// A required package that is not installed, and the directory its
/// variable was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPackage {
    pub id: PackageId,
    pub path: PathBuf,
}

/// Package directories bound to variable names, plus what is not installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub variables: BTreeMap<String, String>,
    pub missing: Vec<MissingPackage>,
}

/// Bind every requirement to its package directory.
///
/// Installed packages resolve to the directory the scan found them in.
/// Missing ones resolve to the directory they would be placed in and are
/// listed in `missing`.
pub fn resolve_requirements(
    directory: &PackageDirectory,
    requirements: &[PackageRequirement],
) -> Result<Resolution> {
    let mut resolution = Resolution::default();

    for requirement in requirements {
        let id = requirement.id()?;
        let path = match directory.path(&id) {
            Some(path) => {
                debug!("{} is installed at {:?}", id, path);
                path.to_path_buf()
            }
            None => {
                debug!("{} is not installed", id);
                let path = directory.package_path(&requirement.package, &requirement.version);
                resolution.missing.push(MissingPackage {
                    id,
                    path: path.clone(),
                });
                path
            }
        };
        resolution
            .variables
            .insert(requirement.package.clone(), path.display().to_string());
    }

    Ok(resolution)
}

/// A launch with every placeholder filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLaunch {
    pub chdir: Option<PathBuf>,
    pub executable: PathBuf,
    pub arguments: Vec<String>,
}

impl ResolvedLaunch {
    /// Start the program without waiting for it; returns its process id.
    #[tracing::instrument(skip(self, runtime))]
    pub fn run<R: Runtime>(&self, runtime: &R) -> Result<u32> {
        info!("Starting {}", self);
        runtime
            .spawn(&self.executable, &self.arguments, self.chdir.clone())
            .map_err(|e| Error::io("Starting", &self.executable, e))
    }
}

impl fmt::Display for ResolvedLaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable.display())?;
        for arg in &self.arguments {
            write!(f, " {}", arg)?;
        }
        if let Some(dir) = &self.chdir {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResolution {
    pub launch: ResolvedLaunch,
    pub missing: Vec<MissingPackage>,
}

impl LaunchPlan {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .map_err(|e| Error::io("Reading launch plan", path, e))?;
        let plan: LaunchPlan = serde_json::from_str(&content)
            .map_err(|e| Error::Plan(format!("{:?}: {}", path, e)))?;
        plan.check_error()?;
        Ok(plan)
    }

    fn check_error(&self) -> Result<()> {
        if self.error.is_empty() {
            Ok(())
        } else {
            Err(Error::Plan(format!("server reported an error: {}", self.error)))
        }
    }

    /// Fill in placeholders against the installed packages.
    pub fn resolve(&self, directory: &PackageDirectory) -> Result<PlanResolution> {
        self.check_error()?;

        let Resolution {
            variables: package_paths,
            missing,
        } = resolve_requirements(directory, &self.packages)?;

        // Package directories take precedence over plan variables of the same name
        let mut variables = self.variables.clone();
        variables.extend(package_paths);

        let executable = substitute_vars(&self.runtime.execute.executable, &variables)?;
        if executable.is_empty() {
            return Err(Error::Plan("no executable to run".into()));
        }

        let chdir = substitute_vars(&self.runtime.chdir, &variables)?;
        let arguments = self
            .runtime
            .execute
            .arguments
            .iter()
            .map(|arg| substitute_vars(arg, &variables))
            .collect::<Result<Vec<_>>>()?;

        Ok(PlanResolution {
            launch: ResolvedLaunch {
                chdir: (!chdir.is_empty()).then(|| PathBuf::from(chdir)),
                executable: PathBuf::from(executable),
                arguments,
            },
            missing,
        })
    }
}
