//! Bevy plugin wiring dialogue boxes into the frame schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use hashbrown::HashSet;
use log::{debug, error};
use thiserror::Error;

use crate::presentation::DialogueBoxView;

use super::sequencer::{Advance, DialogueSequencer, Line, Speaker};

/// A dialogue box entity and the session it is showing.
#[derive(Component, Debug, Clone, Default)]
#[require(DialogueBoxView)]
pub struct DialogueBox {
    sequencer: DialogueSequencer,
}

impl DialogueBox {
    /// Read access to the box's session.
    #[must_use]
    pub const fn sequencer(&self) -> &DialogueSequencer {
        &self.sequencer
    }
}

/// Input binding for dialogue progression.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct DialogueSettings {
    /// Key whose press advances every open dialogue box by one line.
    pub advance_key: KeyCode,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            advance_key: KeyCode::Space,
        }
    }
}

/// Request to start a session on `dialogue_box`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct OpenDialogue {
    /// Target dialogue box entity.
    pub dialogue_box: Entity,
    /// Lines to show, in order.
    pub lines: Vec<Line>,
    /// Speakers aligned index-for-index with `lines`.
    pub speakers: Vec<Speaker>,
}

/// Request to show the next line on `dialogue_box`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceDialogue {
    /// Target dialogue box entity.
    pub dialogue_box: Entity,
}

/// Content the presentation layer should put on screen.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Box showing the line.
    pub dialogue_box: Entity,
    /// Index of the line within the session.
    pub index: usize,
    /// Speaker name.
    pub speaker_name: String,
    /// Speaker portrait asset key.
    pub portrait: String,
    /// Line text.
    pub text: String,
}

/// Visual transitions accompanying session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueCueKind {
    /// The box should appear.
    Opened,
    /// The text should fade in.
    RevealText,
    /// The box should disappear.
    Closed,
}

/// A visual transition requested for `dialogue_box`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueCue {
    /// Box to animate.
    pub dialogue_box: Entity,
    /// Transition to play.
    pub kind: DialogueCueKind,
}

/// Which request produced a [`DialogueFault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueFaultContext {
    /// An [`OpenDialogue`] request.
    Open,
    /// An [`AdvanceDialogue`] request.
    Advance,
}

/// Event raised when a dialogue request cannot be honoured.
#[derive(Event, Debug, Clone, PartialEq, Eq, Error)]
#[error("{context:?} on {dialogue_box}: {detail}")]
pub struct DialogueFault {
    /// Where the failure occurred.
    pub context: DialogueFaultContext,
    /// Entity named by the request.
    pub dialogue_box: Entity,
    /// Description of the underlying error.
    pub detail: String,
}

impl DialogueFault {
    /// Convenience constructor used by systems to emit fault events.
    pub fn new(
        context: DialogueFaultContext,
        dialogue_box: Entity,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            context,
            dialogue_box,
            detail: detail.into(),
        }
    }

    fn missing_box(context: DialogueFaultContext, dialogue_box: Entity) -> Self {
        Self::new(context, dialogue_box, "entity has no DialogueBox component")
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_dialogue_fault(event: On<DialogueFault>) {
    error!("Dialogue request rejected: {}", event.event());
}

/// Turns a press of the advance key into one request per open box.
///
/// Only the press edge counts; holding the key does nothing further. Missing
/// keyboard input (headless hosts) is treated as no press.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn advance_on_key_system(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    settings: Res<DialogueSettings>,
    boxes: Query<(Entity, &DialogueBox)>,
    mut requests: MessageWriter<AdvanceDialogue>,
) {
    let pressed = keyboard.is_some_and(|keys| keys.just_pressed(settings.advance_key));
    if !pressed {
        return;
    }
    for (dialogue_box, state) in &boxes {
        if state.sequencer.is_active() {
            requests.write(AdvanceDialogue { dialogue_box });
        }
    }
}

/// Applies advance requests, at most one per box per frame.
pub fn advance_dialogue_system(
    mut commands: Commands,
    mut requests: MessageReader<AdvanceDialogue>,
    mut boxes: Query<&mut DialogueBox>,
    mut displays: MessageWriter<DisplayLine>,
    mut cues: MessageWriter<DialogueCue>,
) {
    let mut advanced = HashSet::new();
    for &AdvanceDialogue { dialogue_box } in requests.read() {
        if !advanced.insert(dialogue_box) {
            debug!("Ignoring repeated advance of {dialogue_box} within one frame");
            continue;
        }
        let Ok(mut state) = boxes.get_mut(dialogue_box) else {
            commands.trigger(DialogueFault::missing_box(
                DialogueFaultContext::Advance,
                dialogue_box,
            ));
            continue;
        };

        match state.sequencer.advance() {
            Advance::Ignored => {}
            Advance::Displayed(index) => {
                display(dialogue_box, &state.sequencer, index, &mut displays);
                cues.write(DialogueCue {
                    dialogue_box,
                    kind: DialogueCueKind::RevealText,
                });
            }
            Advance::Closed => {
                cues.write(DialogueCue {
                    dialogue_box,
                    kind: DialogueCueKind::Closed,
                });
            }
        }
    }
}

/// Starts sessions requested through [`OpenDialogue`].
pub fn open_dialogue_system(
    mut commands: Commands,
    mut requests: MessageReader<OpenDialogue>,
    mut boxes: Query<&mut DialogueBox>,
    mut displays: MessageWriter<DisplayLine>,
    mut cues: MessageWriter<DialogueCue>,
) {
    for request in requests.read() {
        let dialogue_box = request.dialogue_box;
        let Ok(mut state) = boxes.get_mut(dialogue_box) else {
            commands.trigger(DialogueFault::missing_box(
                DialogueFaultContext::Open,
                dialogue_box,
            ));
            continue;
        };

        if let Err(e) = state
            .sequencer
            .open(request.lines.clone(), request.speakers.clone())
        {
            commands.trigger(DialogueFault::new(
                DialogueFaultContext::Open,
                dialogue_box,
                e.to_string(),
            ));
            continue;
        }

        display(dialogue_box, &state.sequencer, 0, &mut displays);
        cues.write(DialogueCue {
            dialogue_box,
            kind: DialogueCueKind::RevealText,
        });
        cues.write(DialogueCue {
            dialogue_box,
            kind: DialogueCueKind::Opened,
        });
    }
}

fn display(
    dialogue_box: Entity,
    sequencer: &DialogueSequencer,
    index: usize,
    displays: &mut MessageWriter<DisplayLine>,
) {
    let Some(entry) = sequencer.entry(index) else {
        return;
    };
    displays.write(DisplayLine {
        dialogue_box,
        index,
        speaker_name: entry.speaker.name.clone(),
        portrait: entry.speaker.portrait.clone(),
        text: entry.line.text.clone(),
    });
}

/// Plugin installing dialogue boxes, their messages and systems.
///
/// Systems run in `Update` in the order key edge, advance, open, so a
/// session opened during a frame always shows its first line for at least
/// that frame.
#[derive(Debug, Default)]
pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueSettings>()
            .add_message::<OpenDialogue>()
            .add_message::<AdvanceDialogue>()
            .add_message::<DisplayLine>()
            .add_message::<DialogueCue>()
            .add_observer(log_dialogue_fault)
            .add_systems(
                Update,
                (
                    advance_on_key_system,
                    advance_dialogue_system,
                    open_dialogue_system,
                )
                    .chain()
                    .in_set(DialogueSystems),
            );
    }
}

/// System set containing the dialogue systems, for ordering presentation
/// after them.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogueSystems;
