//! Description of the test framework being set up.

/// Placeholder test script written by `npm init`.
pub const DEFAULT_TEST_SCRIPT: &str = r#"echo "Error: no test specified" && exit 1"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    /// Word used to invoke the framework in a script, e.g. `ava`.
    pub command: String,
    /// Package name under `devDependencies`.
    pub package: String,
    /// Script value that counts as "no test configured yet".
    pub default_placeholder: String,
}

impl Framework {
    pub fn new(command: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            package: package.into(),
            default_placeholder: DEFAULT_TEST_SCRIPT.to_string(),
        }
    }

    pub fn ava() -> Self {
        Self::new("ava", "ava")
    }

    pub fn with_default_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.default_placeholder = placeholder.into();
        self
    }

    /// Package spec passed to the package manager, e.g. `ava@next`.
    pub fn package_spec(&self, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => format!("{}@{}", self.package, tag),
            None => self.package.clone(),
        }
    }
}

impl Default for Framework {
    fn default() -> Self {
        Self::ava()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ava() {
        let framework = Framework::default();
        assert_eq!(framework.command, "ava");
        assert_eq!(framework.package, "ava");
        assert_eq!(framework.default_placeholder, DEFAULT_TEST_SCRIPT);
    }

    #[test]
    fn test_package_spec() {
        let framework = Framework::ava();
        assert_eq!(framework.package_spec(None), "ava");
        assert_eq!(framework.package_spec(Some("next")), "ava@next");
    }

    #[test]
    fn test_custom_placeholder() {
        let framework = Framework::new("jest", "jest").with_default_placeholder("exit 1");
        assert_eq!(framework.default_placeholder, "exit 1");
        assert_eq!(framework.package_spec(Some("next")), "jest@next");
    }
}
