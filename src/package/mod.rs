//! Package identification and discovery.
//!
//! Packages live in directories named `<name>~<version>` directly below a
//! repository root. This module parses those names and scans a root into a
//! [`PackageDirectory`] snapshot.

mod directory;
mod identity;
mod version;

pub use directory::PackageDirectory;
pub use identity::{PackageId, VERSION_SEPARATOR};
pub use version::Version;
