use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum InitError {
    ManifestNotFound {
        cwd: PathBuf,
    },
    ManifestParse {
        path: PathBuf,
        message: String,
    },
    ReadFailure {
        path: PathBuf,
        source: std::io::Error,
    },
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },
    InstallFailure {
        package_manager: String,
        message: String,
    },
    Other(anyhow::Error),
}

impl InitError {
    pub fn manifest_not_found(cwd: impl Into<PathBuf>) -> Self {
        Self::ManifestNotFound { cwd: cwd.into() }
    }

    pub fn manifest_parse(path: &Path, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn read_failure(path: &Path, source: std::io::Error) -> Self {
        Self::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write_failure(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_field(
        path: &Path,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            path: path.to_path_buf(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn install_failure(package_manager: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstallFailure {
            package_manager: package_manager.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestNotFound { cwd } => {
                writeln!(f, "{} No package.json found", "✗".red().bold())?;
                writeln!(
                    f,
                    "  {} Searched upward from: {}",
                    "→".blue(),
                    cwd.display().to_string().yellow()
                )?;
                Ok(())
            }
            Self::ManifestParse { path, message } => {
                writeln!(f, "{} Could not parse package.json", "✗".red().bold())?;
                writeln!(
                    f,
                    "  {} Path: {}",
                    "→".blue(),
                    path.display().to_string().yellow()
                )?;
                writeln!(f, "  {} Error: {}", "→".blue(), message)?;
                Ok(())
            }
            Self::ReadFailure { path, source } => {
                writeln!(f, "{} Could not read package.json", "✗".red().bold())?;
                writeln!(
                    f,
                    "  {} Path: {}",
                    "→".blue(),
                    path.display().to_string().yellow()
                )?;
                writeln!(f, "  {} Error: {}", "→".blue(), source)?;
                Ok(())
            }
            Self::WriteFailure { path, source } => {
                writeln!(f, "{} Could not write package.json", "✗".red().bold())?;
                writeln!(
                    f,
                    "  {} Path: {}",
                    "→".blue(),
                    path.display().to_string().yellow()
                )?;
                writeln!(f, "  {} Error: {}", "→".blue(), source)?;
                Ok(())
            }
            Self::InvalidField {
                path,
                field,
                message,
            } => {
                writeln!(
                    f,
                    "{} Unexpected value for {}",
                    "✗".red().bold(),
                    field.yellow()
                )?;
                writeln!(f, "  {} Path: {}", "→".blue(), path.display())?;
                writeln!(f, "  {} {}", "→".blue(), message)?;
                Ok(())
            }
            Self::InstallFailure {
                package_manager,
                message,
            } => {
                writeln!(
                    f,
                    "{} Installation via {} failed",
                    "✗".red().bold(),
                    package_manager.yellow()
                )?;
                writeln!(f, "  {} {}", "→".blue(), message)?;
                writeln!(
                    f,
                    "  {} The test script in package.json was already updated",
                    "ℹ".blue()
                )?;
                Ok(())
            }
            Self::Other(err) => writeln!(f, "{} {:#}", "✗".red().bold(), err),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailure { source, .. } | Self::WriteFailure { source, .. } => Some(source),
            Self::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for InitError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
