#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the gameplay logic of a 2D duel game.
//!
//! Two independent pieces live here: dialogue boxes that step through a
//! conversation one line per key press, and melee pursuers that chase a
//! target and strike it on a cooldown. Both are engine-free state machines
//! ([`dialogue::DialogueSequencer`], [`pursuit::PursuitController`]) wrapped
//! by Bevy plugins that bind them to transforms, input, and messages.
pub mod animation;
pub mod components;
pub mod constants;
pub mod contact;
pub mod dialogue;
pub mod logging;
pub mod presentation;
pub mod pursuit;
pub mod settings;
pub mod vector_math;
pub use constants::*;

use bevy::prelude::*;

// Re-export commonly used items
pub use animation::{AnimationCue, AnimatorCommand};
pub use components::{Grounded, Health, Running, VelocityComp};
pub use contact::{ContactPlugin, SurfaceContact};
pub use dialogue::{DialogueBox, DialoguePlugin, DialogueScript, DialogueSequencer};
pub use logging::init as init_logging;
pub use presentation::{DialogueBoxView, PresentationPlugin, PresentationSettings};
pub use pursuit::{Pursuer, PursuitController, PursuitPlugin, PursuitSettings};
pub use settings::GameSettings;

/// Plugin installing every gameplay system with the given settings.
///
/// Inserts [`PresentationSettings`] and the fixed timestep from `settings`,
/// and stores the whole [`GameSettings`] as a resource so spawners can read
/// [`GameSettings::pursuit`] when creating pursuers.
///
/// # Examples
///
/// ```no_run
/// use bevy::prelude::*;
/// use heroes::{GameSettings, HeroesPlugin};
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(HeroesPlugin::new(GameSettings::default()))
///     .run();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeroesPlugin {
    settings: GameSettings,
}

impl HeroesPlugin {
    /// Plugin configured with `settings`.
    #[must_use]
    pub const fn new(settings: GameSettings) -> Self {
        Self { settings }
    }
}

/// [`GameSettings`] as installed by [`HeroesPlugin`].
#[derive(Resource, Debug, Clone, PartialEq, Deref)]
pub struct ActiveSettings(pub GameSettings);

impl Plugin for HeroesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.settings.simulation_hz))
            .insert_resource(self.settings.presentation.clone())
            .insert_resource(ActiveSettings(self.settings.clone()))
            .add_plugins((
                DialoguePlugin,
                PresentationPlugin,
                PursuitPlugin,
                ContactPlugin,
            ));
    }
}

pub mod prelude {
    //! Prelude exports used by hosts wiring the game together.
    //!
    //! ```rust,no_run
    //! use heroes::prelude::*;
    //! ```

    pub use crate::dialogue::{
        AdvanceDialogue, DialogueCue, DialogueCueKind, DisplayLine, Line, OpenDialogue, Speaker,
    };
    pub use crate::pursuit::{Facing, Flipped, StrikeLanded};
    pub use crate::{
        AnimationCue, AnimatorCommand, DialogueBox, DialogueBoxView, GameSettings, Health,
        HeroesPlugin, Pursuer, PursuitSettings, SurfaceContact,
    };
}
