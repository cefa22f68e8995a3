/*!
 * Writes a parsed tree to a numbered directory hierarchy.
 *
 * Acts and scenes become directories, beats become files:
 * `root/01_Act/01_Scene/01_Beat.fountain`. A run has two phases. The first
 * writes every node and records the paths it produced; the second walks the
 * root bottom-up and removes everything that was not produced.
 */

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::app_config::LayoutConfig;
use crate::document::{Act, Beat};
use crate::errors::SplitError;
use crate::numbering::NumberingScheme;
use crate::sanitizer::Sanitizer;

/// Result of a materialize run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Every directory and file produced under the root
    pub written: BTreeSet<PathBuf>,

    /// Stale paths removed during reconciliation, children before parents
    pub removed: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn beat_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.written.iter().filter(|p| p.is_file())
    }
}

/// Tree to directory writer
#[derive(Debug, Clone)]
pub struct Materializer {
    sanitizer: Sanitizer,
    numbering: NumberingScheme,
    extension: String,
}

impl Materializer {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            sanitizer: Sanitizer::new(layout.delimiter),
            numbering: layout.numbering,
            extension: layout.extension.clone(),
        }
    }

    /// Write `acts` under `root` and remove anything stale
    pub fn materialize(&self, acts: &[Act], root: &Path) -> Result<MaterializeReport, SplitError> {
        self.materialize_with(acts, root, |_| {})
    }

    /// Like [`Materializer::materialize`], calling `on_beat` after each beat file is written
    pub fn materialize_with<F>(
        &self,
        acts: &[Act],
        root: &Path,
        mut on_beat: F,
    ) -> Result<MaterializeReport, SplitError>
    where
        F: FnMut(&Path),
    {
        prepare_root(root)?;

        let mut written = BTreeSet::new();
        let act_names: Vec<String> = acts
            .iter()
            .enumerate()
            .map(|(i, act)| self.entry_name(i + 1, &act.name))
            .collect();
        adopt_spellings(root, &act_names)?;

        for (act, act_name) in acts.iter().zip(&act_names) {
            let act_path = root.join(act_name);
            ensure_dir(&act_path)?;
            written.insert(act_path.clone());

            let scene_names: Vec<String> = act
                .scenes
                .iter()
                .enumerate()
                .map(|(i, scene)| self.entry_name(i + 1, &scene.name))
                .collect();
            adopt_spellings(&act_path, &scene_names)?;

            for (scene, scene_name) in act.scenes.iter().zip(&scene_names) {
                let scene_path = act_path.join(scene_name);
                ensure_dir(&scene_path)?;
                written.insert(scene_path.clone());

                let beat_names: Vec<String> = scene
                    .beats
                    .iter()
                    .enumerate()
                    .map(|(i, beat)| format!("{}.{}", self.entry_name(i + 1, &beat.name), self.extension))
                    .collect();
                adopt_spellings(&scene_path, &beat_names)?;

                for (beat, beat_name) in scene.beats.iter().zip(&beat_names) {
                    let beat_path = scene_path.join(beat_name);
                    write_beat(&beat_path, beat)?;
                    debug!("Wrote {:?}", beat_path);
                    on_beat(&beat_path);
                    written.insert(beat_path);
                }
            }
        }

        let removed = reconcile(root, &written)?;
        info!(
            "Materialized {} path(s) under {:?}, removed {} stale path(s)",
            written.len(),
            root,
            removed.len()
        );

        Ok(MaterializeReport { written, removed })
    }

    // @returns: Stored name such as `03_Climax`
    fn entry_name(&self, position: usize, label: &str) -> String {
        let token = self.sanitizer.to_storage_name(label);
        self.numbering
            .name_for(position, self.sanitizer.delimiter().as_char(), &token)
    }
}

/// Delete every path under `root` that is not in `keep`.
///
/// Entries are visited children first, so a stale directory is already empty
/// when its own removal is attempted.
pub fn reconcile(root: &Path, keep: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>, SplitError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        entries.push(entry);
    }

    let mut removed = Vec::new();
    for entry in entries {
        let path = entry.path();
        if keep.contains(path) {
            continue;
        }

        let result = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };

        match result {
            Ok(()) => {
                debug!("Removed stale {:?}", path);
                removed.push(path.to_path_buf());
            }
            Err(source) if source.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(SplitError::io(path, source)),
        }
    }

    Ok(removed)
}

// The root is created if missing but never replaced
fn prepare_root(root: &Path) -> Result<(), SplitError> {
    if root.exists() && !root.is_dir() {
        return Err(SplitError::io(
            root,
            io::Error::new(
                io::ErrorKind::NotADirectory,
                "output root exists and is not a directory",
            ),
        ));
    }
    fs::create_dir_all(root).map_err(|e| SplitError::io(root, e))
}

/// Rename children of `dir` whose names differ from one of `names` only by case.
///
/// On a case-insensitive filesystem the old spelling would otherwise survive the
/// write, and reconciliation would not find it among the written paths.
fn adopt_spellings(dir: &Path, names: &[String]) -> Result<(), SplitError> {
    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(SplitError::io(dir, e)),
    };

    let mut existing = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| SplitError::io(dir, e))?;
        if let Ok(name) = entry.file_name().into_string() {
            existing.push(name);
        }
    }

    for name in names {
        if existing.iter().any(|e| e == name) {
            continue;
        }
        let folded = name.to_lowercase();
        let Some(variant) = existing.iter_mut().find(|e| e.to_lowercase() == folded) else {
            continue;
        };

        let from = dir.join(&*variant);
        let to = dir.join(name);
        fs::rename(&from, &to).map_err(|e| SplitError::io(&from, e))?;
        debug!("Renamed {:?} -> {:?}", from, to);
        *variant = name.clone();
    }

    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), SplitError> {
    if path.exists() && !path.is_dir() {
        // A stale file occupies the directory's name
        fs::remove_file(path).map_err(|e| SplitError::io(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| SplitError::io(path, e))
}

fn write_beat(path: &Path, beat: &Beat) -> Result<(), SplitError> {
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(|e| SplitError::io(path, e))?;
    }

    let mut text = String::new();
    for line in &beat.content {
        text.push_str(line);
        if !line.ends_with('\n') {
            text.push('\n');
        }
    }

    fs::write(path, text).map_err(|e| SplitError::io(path, e))
}

pub(crate) fn walk_error(root: &Path, error: walkdir::Error) -> SplitError {
    let path = error.path().unwrap_or(root).to_path_buf();
    let source = error
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("directory walk failed"));
    SplitError::io(path, source)
}
