//! Options accepted by [`crate::init::run`].

use crate::framework::Framework;
use crate::install::ReleaseChannel;
use std::env;
use std::path::PathBuf;

pub const SKIP_INSTALL_ENV: &str = "AVA_INIT_SKIP_INSTALL";
pub const NEXT_ENV: &str = "AVA_INIT_NEXT";
pub const VERBOSE_ENV: &str = "AVA_INIT_VERBOSE";

/// Interpret an environment switch such as `AVA_INIT_NEXT=1`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| is_truthy(&v)).unwrap_or(false)
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Directory the manifest lookup starts from. Process cwd when `None`.
    pub cwd: Option<PathBuf>,
    /// Raw tokens, control flags included. The process argv when `None`.
    pub args: Option<Vec<String>>,
    pub next: bool,
    pub skip_install: bool,
    pub framework: Framework,
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_next(mut self, next: bool) -> Self {
        self.next = next;
        self
    }

    pub fn with_skip_install(mut self, skip_install: bool) -> Self {
        self.skip_install = skip_install;
        self
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = framework;
        self
    }

    /// Turn on `next` / `skip_install` when their environment switches are set.
    /// Switches never turn an explicitly enabled option off.
    pub fn with_env_overrides(mut self) -> Self {
        self.next |= env_flag(NEXT_ENV);
        self.skip_install |= env_flag(SKIP_INSTALL_ENV);
        self
    }

    /// Tokens to forward, falling back to the process arguments after the program name.
    pub fn tokens(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => env::args().skip(1).collect(),
        }
    }

    pub fn channel(&self) -> ReleaseChannel {
        ReleaseChannel::from_next(self.next)
    }
}
