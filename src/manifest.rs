//! Locating, reading and writing `package.json`.
//!
//! The manifest is kept as an ordered JSON object so that a read-modify-write
//! cycle leaves every field we do not touch exactly where it was.

use crate::error::{InitError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const MANIFEST_FILE: &str = "package.json";

/// Indentation used when the manifest is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Tab,
    Spaces(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

impl Indent {
    fn as_bytes(&self) -> Vec<u8> {
        match self {
            Self::Tab => b"\t".to_vec(),
            Self::Spaces(width) => vec![b' '; *width],
        }
    }
}

/// Guess the indentation of a JSON document from its first indented line.
pub fn detect_indent(contents: &str) -> Indent {
    for line in contents.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('\t') {
            return Indent::Tab;
        }
        let width = line.len() - line.trim_start_matches(' ').len();
        if width > 0 {
            return Indent::Spaces(width);
        }
    }
    Indent::default()
}

/// Walk from `cwd` towards the filesystem root looking for `package.json`.
///
/// Relative paths are resolved against the process working directory, so the
/// returned path is always absolute.
pub fn find_manifest(cwd: &Path) -> Result<PathBuf> {
    let start = if cwd.is_absolute() {
        cwd.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| InitError::read_failure(cwd, e))?
            .join(cwd)
    };

    for dir in start.ancestors() {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Found manifest");
            return Ok(candidate);
        }
    }

    Err(InitError::manifest_not_found(start))
}

#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    data: Map<String, Value>,
    indent: Indent,
}

impl Manifest {
    /// Find and load the nearest manifest at or above `cwd`.
    pub fn locate(cwd: &Path) -> Result<Self> {
        let path = find_manifest(cwd)?;
        Self::read(&path)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InitError::manifest_not_found(path),
            _ => InitError::read_failure(path, e),
        })?;
        Self::parse(path, &contents)
    }

    /// Parse manifest text. No normalisation is applied to the result.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| InitError::manifest_parse(path, e.to_string()))?;

        match value {
            Value::Object(data) => Ok(Self {
                path: path.to_path_buf(),
                data,
                indent: detect_indent(contents),
            }),
            other => Err(InitError::manifest_parse(
                path,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest; package managers run here.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Current `scripts.test`. Empty strings and `null` read as absent.
    pub fn test_script(&self) -> Result<Option<&str>> {
        let scripts = match self.data.get("scripts") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(scripts)) => scripts,
            Some(_) => {
                return Err(InitError::invalid_field(
                    &self.path,
                    "scripts",
                    "expected an object of script names to commands",
                ))
            }
        };

        match scripts.get("test") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(script)) if script.is_empty() => Ok(None),
            Some(Value::String(script)) => Ok(Some(script.as_str())),
            Some(_) => Err(InitError::invalid_field(
                &self.path,
                "scripts.test",
                "expected a command string",
            )),
        }
    }

    pub fn set_test_script(&mut self, script: impl Into<String>) -> Result<()> {
        self.object_mut("scripts")?
            .insert("test".to_string(), Value::String(script.into()));
        Ok(())
    }

    pub fn dev_dependency(&self, name: &str) -> Option<&str> {
        self.data
            .get("devDependencies")
            .and_then(Value::as_object)
            .and_then(|deps| deps.get(name))
            .and_then(Value::as_str)
    }

    pub fn set_dev_dependency(&mut self, name: &str, specifier: impl Into<String>) -> Result<()> {
        self.object_mut("devDependencies")?
            .insert(name.to_string(), Value::String(specifier.into()));
        Ok(())
    }

    /// Get a top-level object field, creating it when absent or `null`.
    fn object_mut(&mut self, key: &str) -> Result<&mut Map<String, Value>> {
        let entry = self
            .data
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }

        match entry {
            Value::Object(map) => Ok(map),
            _ => Err(InitError::invalid_field(
                &self.path,
                key,
                "expected an object",
            )),
        }
    }

    /// Render the manifest with its original indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let indent = self.indent.as_bytes();
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        self.data
            .serialize(&mut serializer)
            .map_err(|e| InitError::Other(anyhow::anyhow!("Failed to serialize manifest: {e}")))?;
        buf.push(b'\n');

        String::from_utf8(buf)
            .map_err(|e| InitError::Other(anyhow::anyhow!("Manifest is not valid UTF-8: {e}")))
    }

    /// Replace the file on disk with the in-memory contents.
    pub fn write(&self) -> Result<()> {
        let contents = self.to_json_string()?;
        write_atomic(&self.path, contents.as_bytes())
            .map_err(|e| InitError::write_failure(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "Wrote manifest");
        Ok(())
    }
}

/// Write through a temporary sibling file and rename it over `path`, keeping
/// the permissions of the file being replaced.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions())?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
