//! Temporary project directories with a `package.json`.

use crate::manifest::MANIFEST_FILE;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary project whose manifest holds `contents`.
pub fn temp_project(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join(MANIFEST_FILE);
    fs::write(&manifest_path, contents).unwrap();
    (temp_dir, manifest_path)
}

/// Creates a temporary project from a JSON value.
pub fn temp_project_json(value: &Value) -> (TempDir, PathBuf) {
    temp_project(&serde_json::to_string(value).unwrap())
}

pub fn read_manifest_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// `scripts.test` of the manifest at `path`, if it is a string.
pub fn read_test_script(path: &Path) -> Option<String> {
    read_manifest_json(path)["scripts"]["test"]
        .as_str()
        .map(str::to_string)
}
