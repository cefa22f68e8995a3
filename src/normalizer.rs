/*!
 * Cosmetic passes over a split tree.
 *
 * These run outside the split/merge core:
 * - `prep_for_merge` removes blank lines from beat files and puts
 *   underscores back into names, so the merge sees the stored form.
 * - `reformat_for_editing` uses spaces in names, separates paragraphs with
 *   blank lines and shortens four-digit directory prefixes to two digits.
 */

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::file_utils::{is_hidden, FileManager};
use crate::numbering::shorten_prefix;
use crate::sanitizer::{collapse_blank_lines, expand_paragraphs};

/// Counts of what a pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Beat files whose content was rewritten
    pub files_rewritten: usize,
    /// (old, new) paths of renamed entries
    pub renamed: Vec<(PathBuf, PathBuf)>,
}

/// Cosmetic passes for beat files with a given extension
#[derive(Debug, Clone)]
pub struct Normalizer {
    extension: String,
}

impl Normalizer {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Strip blank lines from beat files and replace spaces with underscores in names
    pub fn prep_for_merge(&self, root: &Path) -> Result<NormalizeReport> {
        self.run(root, collapse_blank_lines, |name, _| {
            name.contains(' ').then(|| name.replace(' ', "_"))
        })
        .inspect(|report| {
            info!(
                "Prepared {:?} for merge: {} file(s) cleaned, {} entr(ies) renamed",
                root,
                report.files_rewritten,
                report.renamed.len()
            )
        })
    }

    /// Replace underscores with spaces, add paragraph spacing and shorten 4-digit prefixes
    pub fn reformat_for_editing(&self, root: &Path) -> Result<NormalizeReport> {
        self.run(root, expand_paragraphs, |name, is_dir| {
            let spaced = name.replace('_', " ");
            let renamed = if is_dir {
                shorten_prefix(&spaced).unwrap_or(spaced)
            } else {
                spaced
            };
            (renamed != name).then_some(renamed)
        })
        .inspect(|report| {
            info!(
                "Reformatted {:?}: {} file(s) spaced, {} entr(ies) renamed",
                root,
                report.files_rewritten,
                report.renamed.len()
            )
        })
    }

    /// Rewrite beat contents, then rename entries bottom-up
    fn run<T, R>(&self, root: &Path, transform: T, rename: R) -> Result<NormalizeReport>
    where
        T: Fn(&[String]) -> Vec<String>,
        R: Fn(&str, bool) -> Option<String>,
    {
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Directory '{}' does not exist", root.display()));
        }

        let mut report = NormalizeReport::default();

        for path in FileManager::find_beat_files(root, &self.extension)? {
            let lines = FileManager::read_lines(&path)?;
            let rewritten = transform(&lines);
            if rewritten != lines {
                FileManager::write_lines(&path, &rewritten)?;
                report.files_rewritten += 1;
                debug!("Rewrote {:?}", path);
            }
        }

        // Children come before their parent, so earlier renames stay valid
        let entries: Vec<_> = WalkDir::new(root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .collect::<Result<_, _>>()?;

        for entry in entries {
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(new_name) = rename(name, entry.file_type().is_dir()) else {
                continue;
            };

            let from = entry.path().to_path_buf();
            let to = from.with_file_name(&new_name);
            match FileManager::rename_entry(&from, &to) {
                Ok(()) => {
                    debug!("Renamed {:?} -> {:?}", from, to);
                    report.renamed.push((from, to));
                }
                Err(e) => warn!("Skipping rename: {}", e),
            }
        }

        Ok(report)
    }
}
