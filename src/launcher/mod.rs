//! The launcher's view of itself: where it runs from, how it installs itself,
//! and the command lines it accepts.

mod install;
mod location;
mod request;

pub use install::{SelfInstaller, handler_command};
pub use location::SelfLocation;
pub use request::{Action, LaunchRequest};
