//! Runtime abstraction for system operations.
//!
//! Everything the launcher asks of the operating system goes through the
//! [`Runtime`] trait, so the package and launcher logic can be exercised
//! against `MockRuntime` in tests.
//!
//! # Structure
//!
//! - `env` - Home directory and privilege detection
//! - `fs` - File system operations (read, write, copy, directory listing)
//! - `process` - The running executable and spawning child processes
//! - `user` - User interaction (confirmation prompts)

mod env;
mod fs;
mod process;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// List the immediate entries of a directory as full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    // Process
    /// Absolute path of the running executable.
    fn current_exe(&self) -> Result<PathBuf>;

    /// Start a program without waiting for it. Returns the child's process id.
    fn spawn(&self, program: &Path, args: &[String], cwd: Option<PathBuf>) -> Result<u32>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;

    // Privilege
    fn is_privileged(&self) -> bool;

    // User interaction
    /// Prompt user for confirmation. Returns true if user confirms (y/yes), false otherwise.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        self.copy_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn spawn(&self, program: &Path, args: &[String], cwd: Option<PathBuf>) -> Result<u32> {
        self.spawn_impl(program, args, cwd)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirm_impl(prompt)
    }
}
