//! Dialogue boxes: the session state machine, script loading, and the Bevy
//! plugin that drives them from input.

mod plugin;
mod script;
mod sequencer;

pub use plugin::{
    advance_dialogue_system, advance_on_key_system, open_dialogue_system, AdvanceDialogue,
    DialogueBox, DialogueCue, DialogueCueKind, DialogueFault, DialogueFaultContext,
    DialoguePlugin, DialogueSettings, DialogueSystems, DisplayLine, OpenDialogue,
};
pub use script::{DialogueScript, ScriptError};
pub use sequencer::{
    Advance, DialogueEntry, DialogueError, DialogueSequencer, Line, SessionState, Speaker,
};
