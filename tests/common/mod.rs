/*!
 * Common test utilities for the beatsplit test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Master document used across tests
pub const SAMPLE_MASTER: &str = "Title: The Test
Author: Somebody

# Act One

## Opening Image

.Forest
A dark forest.

Wind in the trees.

.Cabin
A small cabin.

## Catalyst

.Letter
A letter arrives.

# Act Two

## Fun and Games

.Chase
They run.
/* draft 3 */
";

/// Route library logs to the test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the sample master into `dir`
pub fn create_sample_master(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "master.fountain", SAMPLE_MASTER)
}

/// All paths under `root`, relative and with `/` separators
pub fn list_tree(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| relative(root, e.path()))
        .collect()
}

/// Relative form of `path` under `root`, with `/` separators
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
