/*!
 * Core document model types for screenplay splitting.
 *
 * A master document is a flat list of lines. Parsing turns it into a strictly
 * three-level tree: acts hold scenes, scenes hold beats, beats hold raw lines.
 */

use std::fs;
use std::path::Path;

use crate::app_config::MarkerConfig;
use crate::errors::SplitError;

/// Leaf node holding raw content lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Beat {
    /// Human-readable label taken from the marker line
    pub name: String,

    /// Content lines, verbatim
    pub content: Vec<String>,
}

impl Beat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
        }
    }

    /// Builder used mostly by tests and benchmarks
    pub fn with_content<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.extend(lines.into_iter().map(Into::into));
        self
    }
}

/// Second-level node, child of exactly one act.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scene {
    pub name: String,
    pub beats: Vec<Beat>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            beats: Vec::new(),
        }
    }

    pub fn with_beat(mut self, beat: Beat) -> Self {
        self.beats.push(beat);
        self
    }
}

/// Top-level node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Act {
    pub name: String,
    pub scenes: Vec<Scene>,
}

impl Act {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenes: Vec::new(),
        }
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Number of beats across all scenes of this act
    pub fn beat_count(&self) -> usize {
        self.scenes.iter().map(|s| s.beats.len()).sum()
    }
}

/// Flat master document as read from disk.
///
/// Lines keep their original terminators so beat content can be written back
/// exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MasterDocument {
    lines: Vec<String>,
}

impl MasterDocument {
    /// Split text into lines, keeping each line's terminator
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Read a master document from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SplitError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SplitError::MissingInput {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| SplitError::io(path, e))?;
        Ok(Self::from_text(&text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Material the merge step must carry over from this document.
    ///
    /// The header is every line before the first act marker. The footer is the
    /// last non-blank line, but only when it is a trailing comment.
    pub fn header_and_footer(&self, markers: &MarkerConfig) -> (Vec<String>, String) {
        let header = self
            .lines
            .iter()
            .take_while(|line| !line.trim().starts_with(markers.act))
            .map(|line| strip_terminator(line).to_string())
            .collect();

        let footer = self
            .lines
            .iter()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim())
            .filter(|line| line.starts_with(markers.comment_prefix.as_str()))
            .unwrap_or_default()
            .to_string();

        (header, footer)
    }
}

/// Join lines into file text with a trailing newline
pub fn render_lines(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(strip_terminator(line));
        text.push('\n');
    }
    text
}

// @returns: Line without its trailing `\n` or `\r\n`
pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
