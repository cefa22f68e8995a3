use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::document::{MasterDocument, Parser};
use crate::document::model::render_lines;
use crate::errors::SplitError;
use crate::file_utils::FileManager;
use crate::materializer::{MaterializeReport, Materializer};
use crate::merger::Merger;
use crate::normalizer::{NormalizeReport, Normalizer};

// @module: Application controller for split and merge runs

/// Outcome of a split run
#[derive(Debug, Clone)]
pub struct SplitSummary {
    pub acts: usize,
    pub scenes: usize,
    pub beats: usize,
    /// Orphan markers dropped while parsing
    pub dropped_markers: usize,
    pub report: MaterializeReport,
}

/// Outcome of a merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub lines_written: usize,
    pub header_lines: usize,
    pub footer_kept: bool,
}

/// Main application controller wiring parser, materializer and merger
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Files a split must never place inside its output directory
    protected: Vec<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            protected: Vec::new(),
        })
    }

    /// Refuse to split into any directory containing `path`.
    ///
    /// The master document being split is always protected.
    pub fn protect(mut self, path: impl Into<PathBuf>) -> Self {
        self.protected.push(path.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Split `master_file` into a directory tree under `output_dir`
    pub fn split(&self, master_file: &Path, output_dir: &Path) -> Result<SplitSummary> {
        info!("Splitting {:?} into {:?}", master_file, output_dir);

        let document = MasterDocument::read(master_file)?;
        let outcome = Parser::new(self.config.markers.clone())
            .strict(self.config.strict)
            .parse(document.lines())
            .with_context(|| format!("Failed to parse {:?}", master_file))?;

        self.check_output_location(master_file, output_dir)?;

        let acts = &outcome.acts;
        info!("Parsed {} act(s) total.", acts.len());
        for (i, act) in acts.iter().enumerate() {
            debug!("  Act {} [{}] has {} scene(s).", i + 1, act.name, act.scenes.len());
        }
        if !outcome.warnings.is_empty() {
            warn!(
                "{} marker(s) had no parent and were dropped",
                outcome.warnings.len()
            );
        }

        let beats: usize = acts.iter().map(|a| a.beat_count()).sum();
        let progress_bar = ProgressBar::new(beats as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} beats ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let materializer = Materializer::new(&self.config.layout);
        let report = materializer
            .materialize_with(acts, output_dir, |_| progress_bar.inc(1))
            .with_context(|| format!("Failed to write split tree to {:?}", output_dir));
        progress_bar.finish_and_clear();
        let report = report?;

        Ok(SplitSummary {
            acts: acts.len(),
            scenes: acts.iter().map(|a| a.scenes.len()).sum(),
            beats,
            dropped_markers: outcome.warnings.len(),
            report,
        })
    }

    // Reconciliation empties the output directory, so it must not hold the master or a protected file
    fn check_output_location(&self, master_file: &Path, output_dir: &Path) -> Result<(), SplitError> {
        if output_dir.exists() && !output_dir.is_dir() {
            // The materializer reports a non-directory root
            return Ok(());
        }
        fs::create_dir_all(output_dir).map_err(|e| SplitError::io(output_dir, e))?;
        let output = fs::canonicalize(output_dir).map_err(|e| SplitError::io(output_dir, e))?;

        for protected in std::iter::once(master_file).chain(self.protected.iter().map(PathBuf::as_path)) {
            let Ok(resolved) = fs::canonicalize(protected) else {
                continue;
            };
            if resolved.starts_with(&output) {
                return Err(SplitError::OutputContainsProtected {
                    output: output_dir.to_path_buf(),
                    protected: protected.to_path_buf(),
                });
            }
        }

        Ok(())
    }

    /// Rebuild `master_file` from the tree under `split_dir`.
    ///
    /// Header and trailing comment of the existing master are carried over.
    pub fn merge(&self, split_dir: &Path, master_file: &Path) -> Result<MergeSummary> {
        info!("Merging {:?} into {:?}", split_dir, master_file);

        let (header, footer) = if FileManager::file_exists(master_file) {
            MasterDocument::read(master_file)?.header_and_footer(&self.config.markers)
        } else {
            warn!("No existing master at {:?}, writing without header", master_file);
            (Vec::new(), String::new())
        };

        let merger = Merger::new(&self.config.markers, &self.config.layout);
        let lines = merger.merge(split_dir, &header, &footer)?;

        FileManager::write_atomically(master_file, &render_lines(&lines))?;
        info!("Merged content written to {:?}", master_file);

        Ok(MergeSummary {
            lines_written: lines.len(),
            header_lines: header.len(),
            footer_kept: !footer.is_empty(),
        })
    }

    /// Prepare an edited split tree for merging
    pub fn prep(&self, split_dir: &Path) -> Result<NormalizeReport> {
        Normalizer::new(self.config.layout.extension.as_str()).prep_for_merge(split_dir)
    }

    /// Reformat a split tree for comfortable editing
    pub fn reformat(&self, split_dir: &Path) -> Result<NormalizeReport> {
        Normalizer::new(self.config.layout.extension.as_str()).reformat_for_editing(split_dir)
    }
}
