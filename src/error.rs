//! Error types for package identification and launching.
//!
//! Format errors are expected and recoverable (a directory that is not a
//! package, a malformed version). I/O errors come from the operating system
//! and are always propagated.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// A string did not match the package or version grammar.
    #[error("Malformed {kind} '{input}': {reason}")]
    Format {
        kind: &'static str,
        input: String,
        reason: String,
    },

    /// The operating system refused a filesystem or process operation.
    #[error("{action} {path:?} failed")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unrecognized command line '{input}': {reason}")]
    Command { input: String, reason: String },

    #[error("Unknown variable '{name}' in '{template}'")]
    Variable { name: String, template: String },

    #[error("Invalid launch plan: {0}")]
    Plan(String),

    #[error("Cannot encode client settings")]
    Settings(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn version(input: &str, reason: impl Into<String>) -> Self {
        Error::Format {
            kind: "version",
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn package(input: &str, reason: impl Into<String>) -> Self {
        Error::Format {
            kind: "package name",
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn command(input: &str, reason: impl Into<String>) -> Self {
        Error::Command {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}
