//! Version strings of the form `[v]MAJOR[.MINOR[.PATCH]][-SUFFIX]`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed package version.
///
/// `Version::default()` is the "none" version: it equals only another none
/// version and orders below every real version. Real versions order by
/// major, minor, patch and then suffix (plain string comparison).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    // `None` sorts before `Some`, which gives the none version its place.
    parts: Option<Parts>,
}

// Field order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Parts {
    major: u32,
    minor: u32,
    patch: u32,
    suffix: String,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32, suffix: impl Into<String>) -> Self {
        Version {
            parts: Some(Parts {
                major,
                minor,
                patch,
                suffix: suffix.into(),
            }),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a version string.
    ///
    /// Missing minor and patch components are 0. A single leading `v` is
    /// ignored. Everything after the first `-` is the suffix.
    pub fn parse(input: &str) -> Result<Self> {
        let (core, suffix) = input.split_once('-').unwrap_or((input, ""));
        if core.is_empty() {
            return Err(Error::version(input, "missing version number"));
        }
        let core = core.strip_prefix('v').unwrap_or(core);

        let components: Vec<&str> = core.split('.').collect();
        if components.len() > 3 {
            return Err(Error::version(
                input,
                format!("expected at most 3 components, found {}", components.len()),
            ));
        }

        let mut numbers = [0u32; 3];
        for (slot, component) in numbers.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::version(
                    input,
                    format!("'{}' is not a number", component),
                ));
            }
            *slot = component.parse().map_err(|_| {
                Error::version(input, format!("'{}' is out of range", component))
            })?;
        }

        let [major, minor, patch] = numbers;
        Ok(Version::new(major, minor, patch, suffix))
    }

    pub fn is_none(&self) -> bool {
        self.parts.is_none()
    }

    pub fn major(&self) -> u32 {
        self.parts.as_ref().map_or(0, |p| p.major)
    }

    pub fn minor(&self) -> u32 {
        self.parts.as_ref().map_or(0, |p| p.minor)
    }

    pub fn patch(&self) -> u32 {
        self.parts.as_ref().map_or(0, |p| p.patch)
    }

    pub fn suffix(&self) -> &str {
        self.parts.as_ref().map_or("", |p| p.suffix.as_str())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(p) = &self.parts else {
            return Ok(());
        };
        write!(f, "{}.{}.{}", p.major, p.minor, p.patch)?;
        if !p.suffix.is_empty() {
            write!(f, "-{}", p.suffix)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}
