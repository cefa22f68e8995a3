/*!
 * Rebuilds a flat master document from a split directory tree.
 *
 * Act and scene directories and beat files are visited in ascending sibling
 * number order. Each one contributes a marker line derived from its name with
 * the numeric prefix removed, and beat files contribute their content.
 */

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::app_config::{LayoutConfig, MarkerConfig};
use crate::errors::SplitError;
use crate::materializer::walk_error;
use crate::numbering::split_prefix;
use crate::sanitizer::Sanitizer;

/// Which directory entries a listing keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryFilter<'a> {
    Directories,
    FilesWithExtension(&'a str),
}

/// A visible child of a split directory
#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeEntry {
    path: PathBuf,
    number: Option<u64>,
    /// Name without numeric prefix (and without extension for beats)
    token: String,
}

impl TreeEntry {
    fn from_stem(path: PathBuf, stem: &str) -> Self {
        match split_prefix(stem) {
            Some((number, rest)) => Self {
                path,
                number: Some(number),
                token: rest.to_string(),
            },
            None => Self {
                path,
                number: None,
                token: stem.to_string(),
            },
        }
    }

    // Numbered entries first, by number, then by file name
    fn sibling_order(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.path.file_name().cmp(&other.path.file_name()))
    }
}

/// Directory tree to flat document reader
#[derive(Debug, Clone)]
pub struct Merger {
    markers: MarkerConfig,
    sanitizer: Sanitizer,
    extension: String,
}

impl Merger {
    pub fn new(markers: &MarkerConfig, layout: &LayoutConfig) -> Self {
        Self {
            markers: markers.clone(),
            sanitizer: Sanitizer::new(layout.delimiter),
            extension: layout.extension.clone(),
        }
    }

    /// Build the flat document: `header`, then the marker stream, then `footer` if non-empty
    pub fn merge(
        &self,
        input_root: &Path,
        header: &[String],
        footer: &str,
    ) -> Result<Vec<String>, SplitError> {
        if !input_root.is_dir() {
            return Err(SplitError::MissingInput {
                path: input_root.to_path_buf(),
            });
        }

        let mut output: Vec<String> = header.to_vec();
        let mut beats = 0usize;
        let acts = list_entries(input_root, EntryFilter::Directories)?;

        for act in &acts {
            output.push(format!("{}{}", self.markers.act, self.label(act)));
            output.push(String::new());

            for scene in list_entries(&act.path, EntryFilter::Directories)? {
                output.push(format!("{} {}", self.markers.scene_marker(), self.label(&scene)));
                output.push(String::new());

                let filter = EntryFilter::FilesWithExtension(&self.extension);
                for beat in list_entries(&scene.path, filter)? {
                    output.push(format!("{}{}", self.markers.beat, self.label(&beat)));
                    output.extend(read_beat_content(&beat.path)?);
                    output.push(String::new());
                    beats += 1;
                }
            }
        }

        if !footer.is_empty() {
            output.push(footer.to_string());
        }

        info!(
            "Merged {} act(s) and {} beat(s) from {:?}",
            acts.len(),
            beats,
            input_root
        );
        Ok(output)
    }

    fn label(&self, entry: &TreeEntry) -> String {
        self.sanitizer.to_display_name(&entry.token)
    }
}

/// Visible children of `dir` matching `filter`, in sibling order
fn list_entries(dir: &Path, filter: EntryFilter<'_>) -> Result<Vec<TreeEntry>, SplitError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 name {:?}", entry.path());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        match filter {
            EntryFilter::Directories if entry.file_type().is_dir() => {
                entries.push(TreeEntry::from_stem(entry.path().to_path_buf(), name));
            }
            EntryFilter::FilesWithExtension(extension) if entry.file_type().is_file() => {
                let stem = name
                    .strip_suffix(extension)
                    .and_then(|rest| rest.strip_suffix('.'));
                match stem {
                    Some(stem) => entries.push(TreeEntry::from_stem(entry.path().to_path_buf(), stem)),
                    None => debug!("Skipping {:?}: not a .{} file", entry.path(), extension),
                }
            }
            _ => debug!("Skipping {:?}", entry.path()),
        }
    }

    entries.sort_by(TreeEntry::sibling_order);
    Ok(entries)
}

/// Beat file lines with leading and trailing blank lines removed
fn read_beat_content(path: &Path) -> Result<Vec<String>, SplitError> {
    let text = fs::read_to_string(path).map_err(|e| SplitError::io(path, e))?;
    let lines: Vec<&str> = text.lines().collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());

    Ok(match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].iter().map(|l| l.to_string()).collect(),
        _ => Vec::new(),
    })
}
