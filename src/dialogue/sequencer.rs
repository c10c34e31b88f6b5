//! Turn-based dialogue session state machine.
//!
//! A session holds two index-aligned sequences, lines and speakers, and
//! shows one entry at a time. The host advances it on a discrete input edge;
//! advancing past the last entry closes the session.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A character who can speak a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Name shown above the dialogue text.
    pub name: String,
    /// Asset key of the portrait image; resolved by the presentation host.
    pub portrait: String,
}

impl Speaker {
    /// Builds a speaker from a display name and portrait key.
    pub fn new(name: impl Into<String>, portrait: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            portrait: portrait.into(),
        }
    }
}

/// One line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Cast key of the speaker this line belongs to.
    pub speaker: String,
    /// Text revealed in the dialogue box.
    pub text: String,
}

impl Line {
    /// Builds a line spoken by the cast member `speaker`.
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Rejected arguments to [`DialogueSequencer::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// No lines were supplied.
    #[error("dialogue needs at least one line")]
    Empty,
    /// Line and speaker sequences are not index-aligned.
    #[error("dialogue has {lines} lines but {speakers} speakers")]
    LengthMismatch {
        /// Number of lines supplied.
        lines: usize,
        /// Number of speakers supplied.
        speakers: usize,
    },
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session is showing; `advance` does nothing.
    #[default]
    Closed,
    /// The entry at this index is on screen.
    Displaying(usize),
}

/// Result of a single [`DialogueSequencer::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The session was closed; nothing changed.
    Ignored,
    /// The entry at this index is now showing.
    Displayed(usize),
    /// The last entry was dismissed and the session closed.
    Closed,
}

/// Borrowed view of one dialogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueEntry<'a> {
    /// Position of the entry within the session.
    pub index: usize,
    /// Speaker paired with the line.
    pub speaker: &'a Speaker,
    /// The line itself.
    pub line: &'a Line,
}

/// Sequencer for one dialogue box.
///
/// Each instance carries its own session, so two boxes never share the
/// "is a dialogue active" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueSequencer {
    lines: Vec<Line>,
    speakers: Vec<Speaker>,
    state: SessionState,
}

impl DialogueSequencer {
    /// Creates a sequencer with no session open.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            speakers: Vec::new(),
            state: SessionState::Closed,
        }
    }

    /// Starts a session showing entry 0.
    ///
    /// An already active session is replaced. On error the previous session,
    /// active or not, is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`DialogueError::Empty`] when `lines` is empty and
    /// [`DialogueError::LengthMismatch`] when the sequences differ in length.
    pub fn open(&mut self, lines: Vec<Line>, speakers: Vec<Speaker>) -> Result<(), DialogueError> {
        if lines.len() != speakers.len() {
            return Err(DialogueError::LengthMismatch {
                lines: lines.len(),
                speakers: speakers.len(),
            });
        }
        if lines.is_empty() {
            return Err(DialogueError::Empty);
        }

        info!("Started conversation with {} lines", lines.len());
        self.lines = lines;
        self.speakers = speakers;
        self.state = SessionState::Displaying(0);
        Ok(())
    }

    /// Moves to the next entry, closing the session after the last one.
    pub fn advance(&mut self) -> Advance {
        let SessionState::Displaying(index) = self.state else {
            return Advance::Ignored;
        };

        let next = index + 1;
        if next < self.lines.len() {
            debug!("Dialogue advanced to line {next}");
            self.state = SessionState::Displaying(next);
            Advance::Displayed(next)
        } else {
            info!("Conversation ended after {} lines", self.lines.len());
            self.state = SessionState::Closed;
            Advance::Closed
        }
    }

    /// Returns the entry on screen, if a session is active.
    #[must_use]
    pub fn current(&self) -> Option<DialogueEntry<'_>> {
        self.current_index().and_then(|index| self.entry(index))
    }

    /// Returns the entry at `index` of the loaded sequences.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<DialogueEntry<'_>> {
        let line = self.lines.get(index)?;
        let speaker = self.speakers.get(index)?;
        Some(DialogueEntry {
            index,
            speaker,
            line,
        })
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a session is showing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Displaying(_))
    }

    /// Index of the entry on screen, or `None` when closed.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Displaying(index) => Some(index),
            SessionState::Closed => None,
        }
    }

    /// Number of entries in the most recently opened session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no session has ever been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn greeting() -> (Vec<Line>, Vec<Speaker>) {
        (
            vec![Line::new("a", "Hi"), Line::new("b", "Bye")],
            vec![Speaker::new("A", "a.png"), Speaker::new("B", "b.png")],
        )
    }

    #[rstest]
    fn open_starts_at_first_entry(greeting: (Vec<Line>, Vec<Speaker>)) {
        let (lines, speakers) = greeting;
        let mut sequencer = DialogueSequencer::new();
        sequencer.open(lines, speakers).expect("valid dialogue");

        assert!(sequencer.is_active());
        assert_eq!(sequencer.state(), SessionState::Displaying(0));
        let entry = sequencer.current().expect("entry on screen");
        assert_eq!(entry.speaker.name, "A");
        assert_eq!(entry.line.text, "Hi");
    }

    #[rstest]
    fn walks_through_greeting_and_closes(greeting: (Vec<Line>, Vec<Speaker>)) {
        let (lines, speakers) = greeting;
        let mut sequencer = DialogueSequencer::new();
        sequencer.open(lines, speakers).expect("valid dialogue");

        assert_eq!(sequencer.advance(), Advance::Displayed(1));
        let entry = sequencer.current().expect("second entry");
        assert_eq!((entry.speaker.name.as_str(), entry.line.text.as_str()), ("B", "Bye"));

        assert_eq!(sequencer.advance(), Advance::Closed);
        assert!(!sequencer.is_active());
        assert!(sequencer.current().is_none());
    }

    #[rstest]
    fn advance_on_closed_session_is_ignored() {
        let mut sequencer = DialogueSequencer::new();
        assert_eq!(sequencer.advance(), Advance::Ignored);
        assert_eq!(sequencer.state(), SessionState::Closed);
        assert_eq!(sequencer.current_index(), None);
    }

    #[rstest]
    #[case::empty(vec![], vec![], DialogueError::Empty)]
    #[case::more_lines(
        vec![Line::new("a", "x"), Line::new("a", "y")],
        vec![Speaker::new("A", "")],
        DialogueError::LengthMismatch { lines: 2, speakers: 1 }
    )]
    #[case::more_speakers(
        vec![],
        vec![Speaker::new("A", "")],
        DialogueError::LengthMismatch { lines: 0, speakers: 1 }
    )]
    fn open_rejects_invalid_sequences(
        #[case] lines: Vec<Line>,
        #[case] speakers: Vec<Speaker>,
        #[case] expected: DialogueError,
    ) {
        let mut sequencer = DialogueSequencer::new();
        assert_eq!(sequencer.open(lines, speakers), Err(expected));
        assert!(!sequencer.is_active());
    }

    #[rstest]
    fn failed_open_keeps_running_session(greeting: (Vec<Line>, Vec<Speaker>)) {
        let (lines, speakers) = greeting;
        let mut sequencer = DialogueSequencer::new();
        sequencer.open(lines, speakers).expect("valid dialogue");
        sequencer.advance();

        assert!(sequencer.open(Vec::new(), Vec::new()).is_err());
        assert_eq!(sequencer.state(), SessionState::Displaying(1));
        assert_eq!(sequencer.len(), 2);
    }

    #[rstest]
    fn reopening_restarts_from_zero(greeting: (Vec<Line>, Vec<Speaker>)) {
        let (lines, speakers) = greeting;
        let mut sequencer = DialogueSequencer::new();
        sequencer
            .open(lines.clone(), speakers.clone())
            .expect("valid dialogue");
        sequencer.advance();

        sequencer.open(lines, speakers).expect("valid dialogue");
        assert_eq!(sequencer.current_index(), Some(0));
    }
}
