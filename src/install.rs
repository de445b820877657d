//! Installing the framework as a development dependency.

use crate::error::{InitError, Result};
use crate::framework::Framework;
use crate::manifest::Manifest;
use anyhow::Context;
use semver::{Version, VersionReq};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use which::which;

/// Lockfile whose presence selects yarn over npm.
pub const YARN_LOCKFILE: &str = "yarn.lock";

/// Specifier written by `--unicorn`.
pub const WILDCARD_SPECIFIER: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl PackageManager {
    /// Pick the package manager governing `project_dir`.
    pub fn detect(project_dir: &Path) -> Self {
        if project_dir.join(YARN_LOCKFILE).is_file() {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Arguments adding `framework` as a dev dependency from `channel`.
    pub fn install_args(&self, framework: &Framework, channel: ReleaseChannel) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Self::Npm => vec!["install".into(), "--save-dev".into()],
            Self::Yarn => vec!["add".into(), "--dev".into()],
        };
        if channel.is_exact() {
            args.push(match self {
                Self::Npm => "--save-exact".into(),
                Self::Yarn => "--exact".into(),
            });
        }
        args.push(framework.package_spec(channel.tag()));
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distribution tag to install from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseChannel {
    #[default]
    Latest,
    Next,
}

impl ReleaseChannel {
    pub fn from_next(next: bool) -> Self {
        if next {
            Self::Next
        } else {
            Self::Latest
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Latest => None,
            Self::Next => Some("next"),
        }
    }

    /// Prereleases are recorded without a range operator.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl InstallCommand {
    pub fn new(
        package_manager: PackageManager,
        framework: &Framework,
        channel: ReleaseChannel,
        cwd: &Path,
    ) -> Self {
        Self {
            program: package_manager.name().to_string(),
            args: package_manager.install_args(framework, channel),
            cwd: cwd.to_path_buf(),
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes install commands. Swapped out in tests.
pub trait CommandRunner {
    fn run(&self, command: &InstallCommand) -> anyhow::Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &InstallCommand) -> anyhow::Result<()> {
        (**self).run(command)
    }
}

/// Spawns the real package manager and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn resolve_program(program: &str) -> anyhow::Result<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(path) = which(format!("{program}.cmd")) {
                return Ok(path);
            }
        }

        which(program).with_context(|| format!("`{program}` was not found on PATH"))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &InstallCommand) -> anyhow::Result<()> {
        let program = Self::resolve_program(&command.program)?;

        let output = Command::new(&program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute `{command}`"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "`{command}` exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}

/// Shape of a `devDependencies` specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    Caret(VersionReq),
    Exact(Version),
    Wildcard,
    Range(VersionReq),
    Unrecognized,
}

impl Specifier {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == WILDCARD_SPECIFIER {
            return Self::Wildcard;
        }
        if let Ok(version) = Version::parse(raw) {
            return Self::Exact(version);
        }
        match VersionReq::parse(raw) {
            Ok(req) if raw.starts_with('^') => Self::Caret(req),
            Ok(req) => Self::Range(req),
            Err(_) => Self::Unrecognized,
        }
    }

    /// Why this specifier is not what installing from `channel` records, if it is not.
    pub fn mismatch(&self, channel: ReleaseChannel) -> Option<&'static str> {
        match (self, channel) {
            (Self::Unrecognized, _) => Some("not a semver version or range"),
            (Self::Caret(_), ReleaseChannel::Next) => {
                Some("expected an exact version for the next tag")
            }
            (Self::Exact(_), ReleaseChannel::Latest) => {
                Some("expected a caret range for the latest tag")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub package_manager: PackageManager,
    pub command: InstallCommand,
}

#[derive(Debug)]
pub struct DependencyInstaller<R: CommandRunner = SystemRunner> {
    runner: R,
    channel: ReleaseChannel,
}

impl<R: CommandRunner> DependencyInstaller<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            channel: ReleaseChannel::Latest,
        }
    }

    pub fn with_channel(mut self, channel: ReleaseChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Run the package manager. The manifest must already be on disk.
    pub fn install(&self, manifest: &Manifest, framework: &Framework) -> Result<InstallOutcome> {
        let package_manager = PackageManager::detect(manifest.dir());
        let command = InstallCommand::new(package_manager, framework, self.channel, manifest.dir());

        tracing::info!(
            package_manager = package_manager.name(),
            command = %command,
            cwd = %command.cwd.display(),
            "Installing test framework"
        );

        self.runner.run(&command).map_err(|e| {
            tracing::error!(package_manager = package_manager.name(), error = %e, "Install failed");
            InitError::install_failure(package_manager.name(), format!("{e:#}"))
        })?;

        Ok(InstallOutcome {
            package_manager,
            command,
        })
    }
}

/// Re-read the manifest at `path` and pin the framework to `*`.
pub fn pin_wildcard(path: &Path, framework: &Framework) -> Result<Manifest> {
    let mut manifest = Manifest::read(path)?;
    manifest.set_dev_dependency(&framework.package, WILDCARD_SPECIFIER)?;
    manifest.write()?;
    tracing::info!(package = %framework.package, "Pinned dev dependency to wildcard");
    Ok(manifest)
}
