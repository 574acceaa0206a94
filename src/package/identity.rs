use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::Version;

/// Separator between package name and version in directory names.
pub const VERSION_SEPARATOR: char = '~';

/// A package name together with one of its versions, as encoded in a
/// directory name: `NAME~VERSION`.
///
/// Ids order by name and then by version, so several versions of one package
/// are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    name: String,
    version: Version,
}

impl PackageId {
    pub(crate) fn new(name: impl Into<String>, version: Version) -> Self {
        PackageId {
            name: name.into(),
            version,
        }
    }

    /// Build an id from a name and a version string that were already split apart.
    pub fn from_parts(name: &str, version: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::package(
                &format!("{}{}{}", name, VERSION_SEPARATOR, version),
                "empty package name",
            ));
        }
        Ok(PackageId {
            name: name.to_string(),
            version: Version::parse(version)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The directory name this package is stored under.
    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, VERSION_SEPARATOR, self.version)
    }
}

impl FromStr for PackageId {
    type Err = Error;

    /// The version starts after the last `~`, so names may contain `~` themselves.
    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once(VERSION_SEPARATOR) {
            Some((name, version)) if !version.is_empty() => PackageId::from_parts(name, version),
            _ => Err(Error::package(s, "expected NAME~VERSION")),
        }
    }
}
