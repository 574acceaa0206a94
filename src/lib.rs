pub mod commands;
pub mod config;
pub mod error;
pub mod launch;
pub mod launcher;
pub mod package;
pub mod runtime;

pub use error::{Error, Result};
