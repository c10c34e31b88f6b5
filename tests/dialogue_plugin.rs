//! Integration tests for `DialoguePlugin` and `PresentationPlugin`.

mod common;

use approx::assert_relative_eq;
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use heroes::dialogue::{
    AdvanceDialogue, DialogueCue, DialogueCueKind, DialogueFault, DialogueFaultContext,
    DisplayLine, Line, OpenDialogue, SessionState, Speaker,
};
use heroes::{DialogueBox, DialogueBoxView};
use rstest::{fixture, rstest};

use common::{drain, frame, TestAppBuilder};

const FRAME: f32 = 0.1;

#[derive(Resource, Debug, Default)]
struct Faults(Vec<DialogueFault>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn record_fault(event: On<DialogueFault>, mut seen: ResMut<Faults>) {
    seen.0.push(event.event().clone());
}

#[fixture]
fn app() -> App {
    let mut app = TestAppBuilder::new().with_dialogue().build();
    app.init_resource::<Faults>().add_observer(record_fault);
    app
}

fn spawn_box(app: &mut App) -> Entity {
    app.world_mut().spawn(DialogueBox::default()).id()
}

fn open_greeting(app: &mut App, dialogue_box: Entity) {
    app.world_mut().write_message(OpenDialogue {
        dialogue_box,
        lines: vec![Line::new("A", "Hello"), Line::new("B", "Hi")],
        speakers: vec![Speaker::new("Ann", "ann.png"), Speaker::new("Bob", "bob.png")],
    });
}

fn state(app: &App, dialogue_box: Entity) -> SessionState {
    app.world()
        .get::<DialogueBox>(dialogue_box)
        .expect("entity is a dialogue box")
        .sequencer()
        .state()
}

fn view(app: &App, dialogue_box: Entity) -> DialogueBoxView {
    app.world()
        .get::<DialogueBoxView>(dialogue_box)
        .cloned()
        .expect("dialogue box has a view")
}

fn press_advance_key(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
}

#[rstest]
fn opening_shows_first_line_and_reveals_box(mut app: App) {
    let dialogue_box = spawn_box(&mut app);
    open_greeting(&mut app, dialogue_box);

    frame(&mut app, FRAME);

    assert_eq!(state(&app, dialogue_box), SessionState::Displaying(0));
    assert_eq!(
        drain::<DisplayLine>(&mut app),
        vec![DisplayLine {
            dialogue_box,
            index: 0,
            speaker_name: "Ann".to_owned(),
            portrait: "ann.png".to_owned(),
            text: "Hello".to_owned(),
        }]
    );
    let kinds: Vec<_> = drain::<DialogueCue>(&mut app)
        .into_iter()
        .map(|cue| cue.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![DialogueCueKind::RevealText, DialogueCueKind::Opened]
    );

    let shown = view(&app, dialogue_box);
    assert_eq!(shown.speaker_name, "Ann");
    assert_eq!(shown.portrait, "ann.png");
    assert_eq!(shown.text, "Hello");
    assert_relative_eq!(shown.box_scale, 0.2, epsilon = 1e-4);
    assert_relative_eq!(shown.text_alpha, 0.2, epsilon = 1e-4);

    for _ in 0..5 {
        frame(&mut app, FRAME);
    }
    let shown = view(&app, dialogue_box);
    assert_relative_eq!(shown.box_scale, 1.0);
    assert_relative_eq!(shown.text_alpha, 1.0);
}

#[rstest]
fn key_press_advances_once_while_held(mut app: App) {
    app.init_resource::<ButtonInput<KeyCode>>();
    let dialogue_box = spawn_box(&mut app);
    open_greeting(&mut app, dialogue_box);
    frame(&mut app, FRAME);
    drain::<DisplayLine>(&mut app);

    press_advance_key(&mut app);
    frame(&mut app, FRAME);
    assert_eq!(state(&app, dialogue_box), SessionState::Displaying(1));
    assert_eq!(view(&app, dialogue_box).text, "Hi");

    // Held: pressed stays set but the edge is gone.
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    frame(&mut app, FRAME);
    frame(&mut app, FRAME);
    assert_eq!(state(&app, dialogue_box), SessionState::Displaying(1));
    assert_eq!(drain::<DisplayLine>(&mut app).len(), 1);
}

#[rstest]
fn key_press_without_session_is_ignored(mut app: App) {
    app.init_resource::<ButtonInput<KeyCode>>();
    let dialogue_box = spawn_box(&mut app);

    press_advance_key(&mut app);
    frame(&mut app, FRAME);

    assert_eq!(state(&app, dialogue_box), SessionState::Closed);
    assert!(drain::<AdvanceDialogue>(&mut app).is_empty());
    assert!(drain::<DialogueCue>(&mut app).is_empty());
}

#[rstest]
fn repeated_requests_in_one_frame_advance_once(mut app: App) {
    let dialogue_box = spawn_box(&mut app);
    open_greeting(&mut app, dialogue_box);
    frame(&mut app, FRAME);

    for _ in 0..3 {
        app.world_mut()
            .write_message(AdvanceDialogue { dialogue_box });
    }
    frame(&mut app, FRAME);

    assert_eq!(state(&app, dialogue_box), SessionState::Displaying(1));
}

#[rstest]
fn final_advance_closes_and_hides_box(mut app: App) {
    let dialogue_box = spawn_box(&mut app);
    open_greeting(&mut app, dialogue_box);
    for _ in 0..6 {
        frame(&mut app, FRAME);
    }
    drain::<DialogueCue>(&mut app);

    app.world_mut()
        .write_message(AdvanceDialogue { dialogue_box });
    frame(&mut app, FRAME);
    app.world_mut()
        .write_message(AdvanceDialogue { dialogue_box });
    frame(&mut app, FRAME);

    assert_eq!(state(&app, dialogue_box), SessionState::Closed);
    let kinds: Vec<_> = drain::<DialogueCue>(&mut app)
        .into_iter()
        .map(|cue| cue.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![DialogueCueKind::RevealText, DialogueCueKind::Closed]
    );

    let closing = view(&app, dialogue_box).box_scale;
    assert!(closing > 0.0 && closing < 1.0, "box mid-close at {closing}");
    for _ in 0..5 {
        frame(&mut app, FRAME);
    }
    assert_relative_eq!(view(&app, dialogue_box).box_scale, 0.0);
    assert_eq!(view(&app, dialogue_box).text, "Hi");
}

#[rstest]
fn mismatched_open_is_rejected_without_side_effects(mut app: App) {
    let dialogue_box = spawn_box(&mut app);
    app.world_mut().write_message(OpenDialogue {
        dialogue_box,
        lines: vec![Line::new("A", "Hello"), Line::new("B", "Hi")],
        speakers: vec![Speaker::new("Ann", "ann.png")],
    });

    frame(&mut app, FRAME);

    assert_eq!(state(&app, dialogue_box), SessionState::Closed);
    assert!(drain::<DisplayLine>(&mut app).is_empty());
    assert!(drain::<DialogueCue>(&mut app).is_empty());
    let faults = &app.world().resource::<Faults>().0;
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].context, DialogueFaultContext::Open);
    assert_eq!(faults[0].dialogue_box, dialogue_box);
    assert_relative_eq!(view(&app, dialogue_box).box_scale, 0.0);
}

#[rstest]
fn requests_for_non_boxes_raise_faults(mut app: App) {
    let stranger = app.world_mut().spawn(Name::new("Signpost")).id();
    open_greeting(&mut app, stranger);
    app.world_mut()
        .write_message(AdvanceDialogue {
            dialogue_box: stranger,
        });

    frame(&mut app, FRAME);

    let contexts: Vec<_> = app
        .world()
        .resource::<Faults>()
        .0
        .iter()
        .map(|fault| fault.context)
        .collect();
    assert_eq!(
        contexts,
        vec![DialogueFaultContext::Advance, DialogueFaultContext::Open]
    );
}
