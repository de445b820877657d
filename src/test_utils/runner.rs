//! A [`CommandRunner`] that mimics a package manager without touching the network.

use crate::install::{CommandRunner, InstallCommand, YARN_LOCKFILE};
use crate::manifest::{Manifest, MANIFEST_FILE};
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;

/// Records every command and writes the `devDependencies` entry and lockfile
/// line a real install would leave behind.
pub struct RecordingRunner {
    version: String,
    fail: bool,
    commands: RefCell<Vec<InstallCommand>>,
}

impl RecordingRunner {
    /// Resolve every package to `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fail: false,
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Every command exits non-zero.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("0.0.0")
        }
    }

    pub fn commands(&self) -> Vec<InstallCommand> {
        self.commands.borrow().clone()
    }

    fn package_name(spec: &str) -> &str {
        // Scoped names start with `@`; the tag separator is the last `@` after that.
        match spec[1..].rfind('@') {
            Some(idx) => &spec[..idx + 1],
            None => spec,
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &InstallCommand) -> anyhow::Result<()> {
        self.commands.borrow_mut().push(command.clone());

        if self.fail {
            anyhow::bail!("`{command}` exited with exit status: 1");
        }

        let spec = command
            .args
            .last()
            .ok_or_else(|| anyhow::anyhow!("no package given"))?;
        let package = Self::package_name(spec);
        let exact = command
            .args
            .iter()
            .any(|arg| arg == "--save-exact" || arg == "--exact");
        let specifier = if exact {
            self.version.clone()
        } else {
            format!("^{}", self.version)
        };

        let mut manifest = Manifest::read(&command.cwd.join(MANIFEST_FILE))?;
        manifest.set_dev_dependency(package, specifier.as_str())?;
        manifest.write()?;

        if command.program == "yarn" {
            let mut lockfile = OpenOptions::new()
                .create(true)
                .append(true)
                .open(command.cwd.join(YARN_LOCKFILE))?;
            writeln!(lockfile, "\n{package}@{specifier}:")?;
            writeln!(lockfile, "  version \"{}\"", self.version)?;
        }

        Ok(())
    }
}
