//! Presentation layer for dialogue boxes.
//!
//! The dialogue systems only emit [`DisplayLine`] and [`DialogueCue`]
//! messages. This module folds them into a [`DialogueBoxView`] per box: the
//! text to render and the current scale and opacity of the box, advanced by
//! simple tweens every frame. Hosts copy the view into their own UI widgets;
//! nothing here depends on a renderer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dialogue::{DialogueCue, DialogueCueKind, DialogueSystems, DisplayLine};
use crate::{BOX_REVEAL_SECONDS, TEXT_FADE_SECONDS};

/// Renderer-agnostic state of one dialogue box.
///
/// A freshly spawned box is hidden (`box_scale == 0`) until its first
/// session opens.
///
/// # Examples
///
/// Mirroring the view into a host widget:
///
/// ```ignore
/// fn sync_widgets(views: Query<(&DialogueBoxView, &mut MyWidget)>) {
///     for (view, mut widget) in &mut views {
///         widget.set_text(&view.text);
///         widget.set_scale(view.box_scale);
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Default, PartialEq)]
#[require(ViewTweens)]
pub struct DialogueBoxView {
    /// Name of the current speaker.
    pub speaker_name: String,
    /// Portrait asset key of the current speaker.
    pub portrait: String,
    /// Text of the current line.
    pub text: String,
    /// Uniform scale of the box background, 0 (hidden) to 1 (shown).
    pub box_scale: f32,
    /// Opacity of the line text, 0 to 1.
    pub text_alpha: f32,
}

/// Durations of the dialogue box transitions.
///
/// # Examples
///
/// Slowing the reveal down:
///
/// ```ignore
/// app.insert_resource(PresentationSettings {
///     box_reveal_seconds: 1.0,
///     ..Default::default()
/// });
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Seconds for the box to scale in or out.
    pub box_reveal_seconds: f32,
    /// Seconds for each line's text to fade in.
    pub text_fade_seconds: f32,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            box_reveal_seconds: BOX_REVEAL_SECONDS,
            text_fade_seconds: TEXT_FADE_SECONDS,
        }
    }
}

/// Interpolation curve of a [`Tween`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Exponential ease in and out; slow at both ends.
    InOutExpo,
}

/// Maps linear progress `t` through `easing`.
///
/// `t` is clamped to `0..=1`, and both curves return exactly 0 and 1 at the
/// ends.
///
/// # Examples
///
/// ```
/// use heroes::presentation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert_eq!(ease(Easing::InOutExpo, 1.0), 1.0);
/// assert!(ease(Easing::InOutExpo, 0.1) < 0.1);
/// ```
#[must_use]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
    match easing {
        Easing::Linear => t,
        Easing::InOutExpo => {
            if t <= 0.0 {
                0.0
            } else if t >= 1.0 {
                1.0
            } else if t < 0.5 {
                2.0_f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }
    }
}

/// Interpolation of a single value over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    /// Tween from `from` to `to` over `duration` seconds.
    ///
    /// A non-positive duration finishes on the first advance.
    #[must_use]
    pub const fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Moves the tween forward by `dt` seconds and returns the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        let progress = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from + (self.to - self.from) * ease(self.easing, progress)
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// Tweens in flight for one [`DialogueBoxView`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewTweens {
    /// Tween driving [`DialogueBoxView::box_scale`].
    pub scale: Option<Tween>,
    /// Tween driving [`DialogueBoxView::text_alpha`].
    pub alpha: Option<Tween>,
}

/// Copies displayed lines into their box's view.
pub fn apply_display_lines_system(
    mut lines: MessageReader<DisplayLine>,
    mut views: Query<&mut DialogueBoxView>,
) {
    for line in lines.read() {
        let Ok(mut view) = views.get_mut(line.dialogue_box) else {
            continue;
        };
        view.speaker_name.clone_from(&line.speaker_name);
        view.portrait.clone_from(&line.portrait);
        view.text.clone_from(&line.text);
    }
}

/// Starts the transition tween matching each [`DialogueCue`].
///
/// Opening scales the box up linearly, closing scales it down with
/// [`Easing::InOutExpo`], and every revealed line restarts its text fade
/// from fully transparent.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn start_view_tweens_system(
    settings: Res<PresentationSettings>,
    mut cues: MessageReader<DialogueCue>,
    mut views: Query<(&mut DialogueBoxView, &mut ViewTweens)>,
) {
    for cue in cues.read() {
        let Ok((mut view, mut tweens)) = views.get_mut(cue.dialogue_box) else {
            continue;
        };
        match cue.kind {
            DialogueCueKind::Opened => {
                tweens.scale = Some(Tween::new(
                    view.box_scale,
                    1.0,
                    settings.box_reveal_seconds,
                    Easing::Linear,
                ));
            }
            DialogueCueKind::RevealText => {
                view.text_alpha = 0.0;
                tweens.alpha = Some(Tween::new(
                    0.0,
                    1.0,
                    settings.text_fade_seconds,
                    Easing::Linear,
                ));
            }
            DialogueCueKind::Closed => {
                tweens.scale = Some(Tween::new(
                    view.box_scale,
                    0.0,
                    settings.box_reveal_seconds,
                    Easing::InOutExpo,
                ));
            }
        }
    }
}

/// Advances running tweens by the frame delta and writes them into views.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn advance_view_tweens_system(
    time: Res<Time>,
    mut views: Query<(&mut DialogueBoxView, &mut ViewTweens)>,
) {
    let dt = time.delta_secs();
    for (mut view, mut tweens) in &mut views {
        if let Some(scale) = tweens.scale.as_mut() {
            view.box_scale = scale.advance(dt);
            if scale.is_finished() {
                tweens.scale = None;
            }
        }
        if let Some(alpha) = tweens.alpha.as_mut() {
            view.text_alpha = alpha.advance(dt);
            if alpha.is_finished() {
                tweens.alpha = None;
            }
        }
    }
}

/// Plugin maintaining [`DialogueBoxView`]s from dialogue messages.
///
/// # Dependencies
///
/// Expects [`crate::dialogue::DialoguePlugin`] to register the messages it
/// reads; its systems run after [`DialogueSystems`].
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PresentationSettings>();
        app.add_systems(
            Update,
            (
                apply_display_lines_system,
                start_view_tweens_system,
                advance_view_tweens_system,
            )
                .chain()
                .after(DialogueSystems),
        );
    }
}
