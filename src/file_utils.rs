use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

use crate::document::model::render_lines;

// @module: Filesystem helpers for split trees and master files

/// Dot-prefixed entry below the walk root
pub(crate) fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|n| n.starts_with('.'))
}

// @struct: Filesystem helpers
pub struct FileManager;

impl FileManager {
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and its parents
    pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))
    }

    /// All beat files under `root` with the given extension, sorted by path.
    ///
    /// Hidden files and anything below a hidden directory are skipped.
    pub fn find_beat_files<P: AsRef<Path>>(root: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut beats = Vec::new();

        for entry in WalkDir::new(root.as_ref()).into_iter().filter_entry(|e| !is_hidden(e)) {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", root.as_ref()))?;
            let matches = entry.path().extension().is_some_and(|ext| ext == wanted);
            if entry.file_type().is_file() && matches {
                beats.push(entry.into_path());
            }
        }

        beats.sort();
        Ok(beats)
    }

    /// Lines of a text file, terminators dropped
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Overwrite `path` with `lines`, each terminated by `\n`
    pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, render_lines(lines)).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Replace a file's content through a temporary file in the same directory.
    ///
    /// Readers see either the old or the new content, never a partial write.
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
        temp.persist(path)
            .map_err(|e| anyhow!("Failed to replace {:?}: {}", path, e.error))?;

        Ok(())
    }

    /// Rename a file or directory, refusing to overwrite an existing target
    pub fn rename_entry<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());

        if to.exists() {
            return Err(anyhow!("Rename target already exists: {:?}", to));
        }
        fs::rename(from, to).with_context(|| format!("Failed to rename {:?} to {:?}", from, to))
    }
}
