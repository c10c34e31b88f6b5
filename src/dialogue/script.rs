//! JSON dialogue scripts.
//!
//! A script names its cast once and refers to speakers by key from each
//! line:
//!
//! ```json
//! {
//!   "cast": { "knight": { "name": "Sir Aldric", "portrait": "portraits/knight.png" } },
//!   "lines": [ { "speaker": "knight", "text": "Halt!" } ]
//! }
//! ```
//!
//! [`DialogueScript::resolve`] expands the references into the two
//! index-aligned sequences that [`super::DialogueSequencer::open`] takes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sequencer::{Line, Speaker};

/// Failure while loading or resolving a dialogue script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read dialogue script {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The script text is not valid script JSON.
    #[error("failed to parse dialogue script: {0}")]
    Parse(#[from] serde_json::Error),
    /// A line names a speaker absent from the cast.
    #[error("line {index} refers to unknown speaker {speaker:?}")]
    UnknownSpeaker {
        /// Position of the offending line.
        index: usize,
        /// The unresolved cast key.
        speaker: String,
    },
}

/// A dialogue loaded from disk or embedded in the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueScript {
    /// Speakers keyed by the reference used in [`Line::speaker`].
    #[serde(default)]
    pub cast: BTreeMap<String, Speaker>,
    /// Lines in presentation order.
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl DialogueScript {
    /// Parses a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] when the text is not a valid script.
    pub fn from_json_str(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses the script at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] when the file cannot be read and
    /// [`ScriptError::Parse`] when its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Expands speaker references into a speaker list aligned with the lines.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownSpeaker`] for the first line whose
    /// speaker key is missing from the cast.
    pub fn resolve(&self) -> Result<(Vec<Line>, Vec<Speaker>), ScriptError> {
        let speakers = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                self.cast
                    .get(&line.speaker)
                    .cloned()
                    .ok_or_else(|| ScriptError::UnknownSpeaker {
                        index,
                        speaker: line.speaker.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((self.lines.clone(), speakers))
    }
}
