//! The end-to-end setup: locate, rewrite, persist, install, pin.

use crate::args::{build_command, forwarded_args, wants_wildcard_pin};
use crate::error::{InitError, Result};
use crate::install::{
    pin_wildcard, CommandRunner, DependencyInstaller, PackageManager, ReleaseChannel, Specifier,
    SystemRunner,
};
use crate::manifest::Manifest;
use crate::options::InitOptions;
use crate::script::apply_test_script;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub package_manager: PackageManager,
    pub command: String,
    /// `devDependencies` entry for the framework after installation.
    pub specifier: Option<String>,
    /// Set when `specifier` does not look like what the release channel records.
    pub specifier_warning: Option<String>,
    pub pinned_wildcard: bool,
}

#[derive(Debug, Clone)]
pub struct InitReport {
    pub manifest_path: PathBuf,
    pub test_script: String,
    /// `None` when installation was skipped.
    pub install: Option<InstallReport>,
}

/// Configure the nearest manifest using the system package manager.
pub fn run(options: &InitOptions) -> Result<InitReport> {
    run_with_runner(options, SystemRunner)
}

pub fn run_with_runner<R: CommandRunner>(options: &InitOptions, runner: R) -> Result<InitReport> {
    let cwd = match &options.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().map_err(|e| InitError::read_failure(Path::new("."), e))?,
    };
    let framework = &options.framework;

    let mut manifest = Manifest::locate(&cwd)?;
    tracing::info!(path = %manifest.path().display(), "Located manifest");

    let tokens = options.tokens();
    let command = build_command(framework, &forwarded_args(&tokens));
    let test_script = apply_test_script(&mut manifest, framework, &command)?;

    // Persisted before installing so the edit survives an install failure.
    manifest.write()?;
    tracing::info!(script = %test_script, "Updated test script");

    let mut report = InitReport {
        manifest_path: manifest.path().to_path_buf(),
        test_script,
        install: None,
    };

    if options.skip_install {
        tracing::debug!("Skipping dependency installation");
        return Ok(report);
    }

    let outcome = DependencyInstaller::with_runner(runner)
        .with_channel(options.channel())
        .install(&manifest, framework)?;

    let mut installed = Manifest::read(manifest.path())?;
    let specifier_warning = installed
        .dev_dependency(&framework.package)
        .and_then(|spec| check_specifier(&framework.package, spec, options.channel()));

    let pinned_wildcard = wants_wildcard_pin(&tokens);
    if pinned_wildcard {
        installed = pin_wildcard(manifest.path(), framework)?;
    }

    let specifier = installed
        .dev_dependency(&framework.package)
        .map(str::to_string);
    match specifier.as_deref() {
        Some(spec) => {
            tracing::info!(package = %framework.package, specifier = spec, "Installed test framework")
        }
        None => tracing::warn!(
            package = %framework.package,
            "Package manager finished but no devDependencies entry was recorded"
        ),
    }

    report.install = Some(InstallReport {
        package_manager: outcome.package_manager,
        command: outcome.command.to_string(),
        specifier,
        specifier_warning,
        pinned_wildcard,
    });
    Ok(report)
}

/// Describe a recorded specifier that does not match the channel it was installed from.
fn check_specifier(package: &str, raw: &str, channel: ReleaseChannel) -> Option<String> {
    let reason = Specifier::parse(raw).mismatch(channel)?;
    tracing::warn!(package, specifier = raw, reason, "Unexpected devDependencies specifier");
    Some(format!("{package}@{raw}: {reason}"))
}
