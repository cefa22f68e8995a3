/*!
 * Parser turning master document lines into an Act > Scene > Beat tree.
 *
 * Lines are classified by their leading characters after trimming:
 * - two or more act markers (`##`) open a scene
 * - a single act marker (`#`) opens an act
 * - the beat marker (`.`) opens a beat
 * Any other line belongs to the open beat, or is dropped when no beat is open.
 */

use log::{debug, warn};

use crate::app_config::MarkerConfig;
use crate::document::model::{strip_terminator, Act, Beat, Scene};
use crate::errors::{MalformedKind, SplitError};

/// Marker line dropped because its parent was not open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: MalformedKind,
    /// Label of the dropped node
    pub name: String,
}

/// Parsed tree plus the orphan markers that were dropped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOutcome {
    pub acts: Vec<Act>,
    pub warnings: Vec<ParseWarning>,
}

/// Classification of one trimmed line
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Act(&'a str),
    Scene(&'a str),
    Beat(&'a str),
    Text,
}

/// Open nodes of a single parse run
#[derive(Default)]
struct ParseState {
    acts: Vec<Act>,
    act: Option<Act>,
    scene: Option<Scene>,
    beat: Option<Beat>,
}

impl ParseState {
    fn close_beat(&mut self) {
        if let Some(beat) = self.beat.take() {
            // A beat is only ever opened inside a scene
            if let Some(scene) = self.scene.as_mut() {
                scene.beats.push(beat);
            }
        }
    }

    fn close_scene(&mut self) {
        self.close_beat();
        if let Some(scene) = self.scene.take() {
            if let Some(act) = self.act.as_mut() {
                act.scenes.push(scene);
            }
        }
    }

    fn close_act(&mut self) {
        self.close_scene();
        if let Some(act) = self.act.take() {
            self.acts.push(act);
        }
    }
}

/// Configurable master document parser
#[derive(Debug, Clone)]
pub struct Parser {
    markers: MarkerConfig,
    strict: bool,
}

impl Parser {
    pub fn new(markers: MarkerConfig) -> Self {
        Self {
            markers,
            strict: false,
        }
    }

    /// Fail on orphan markers instead of dropping them with a warning
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse lines into acts.
    ///
    /// A trailing comment line is removed before scanning. Content before the
    /// first beat marker is ignored.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParseOutcome, SplitError> {
        let lines = self.strip_trailing_comment(lines);
        let mut state = ParseState::default();
        let mut warnings = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            match self.classify(line) {
                LineKind::Act(name) => {
                    state.close_act();
                    state.act = Some(Act::new(name));
                }
                LineKind::Scene(name) => {
                    state.close_scene();
                    if state.act.is_some() {
                        state.scene = Some(Scene::new(name));
                    } else {
                        self.report(&mut warnings, index + 1, MalformedKind::OrphanScene, name)?;
                    }
                }
                LineKind::Beat(name) => {
                    state.close_beat();
                    if state.scene.is_some() {
                        state.beat = Some(Beat::new(name));
                    } else {
                        self.report(&mut warnings, index + 1, MalformedKind::OrphanBeat, name)?;
                    }
                }
                LineKind::Text => {
                    if let Some(beat) = state.beat.as_mut() {
                        beat.content.push(line.to_string());
                    }
                }
            }
        }

        state.close_act();
        debug!(
            "Parsed {} act(s) from {} line(s)",
            state.acts.len(),
            lines.len()
        );

        Ok(ParseOutcome {
            acts: state.acts,
            warnings,
        })
    }

    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();
        let act = self.markers.act;

        if trimmed.starts_with(self.markers.scene_marker().as_str()) {
            LineKind::Scene(trimmed.trim_start_matches(act).trim())
        } else if trimmed.starts_with(act) {
            LineKind::Act(trimmed.trim_start_matches(act).trim())
        } else if trimmed.starts_with(self.markers.beat) {
            LineKind::Beat(trimmed.trim_start_matches(self.markers.beat).trim())
        } else {
            LineKind::Text
        }
    }

    // @returns: Lines up to (excluding) a trailing comment, ignoring blank lines after it
    fn strip_trailing_comment<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> &'a [S] {
        let last = lines
            .iter()
            .rposition(|line| !line.as_ref().trim().is_empty());

        match last {
            Some(pos)
                if lines[pos]
                    .as_ref()
                    .trim_start()
                    .starts_with(self.markers.comment_prefix.as_str()) =>
            {
                debug!(
                    "Ignoring trailing comment: {}",
                    strip_terminator(lines[pos].as_ref())
                );
                &lines[..pos]
            }
            _ => lines,
        }
    }

    fn report(
        &self,
        warnings: &mut Vec<ParseWarning>,
        line: usize,
        kind: MalformedKind,
        name: &str,
    ) -> Result<(), SplitError> {
        if self.strict {
            return Err(SplitError::MalformedStructure { line, kind });
        }

        warn!("Dropping '{}' at line {}: {}", name, line, kind);
        warnings.push(ParseWarning {
            line,
            kind,
            name: name.to_string(),
        });
        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}

/// Parse with the default markers, dropping orphan markers
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Vec<Act> {
    // Lenient parsing never reports an error
    Parser::default()
        .parse(lines)
        .map(|outcome| outcome.acts)
        .unwrap_or_default()
}
