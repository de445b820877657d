//! Configure a project's test runner: point `scripts.test` in the nearest
//! `package.json` at the framework and install it as a dev dependency.

pub mod args;
pub mod error;
pub mod framework;
pub mod init;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod options;
pub mod script;
pub mod test_utils;

#[cfg(test)]
mod script_proptest;

pub use error::{InitError, Result};
pub use framework::Framework;
pub use init::{run, run_with_runner, InitReport, InstallReport};
pub use options::InitOptions;
