//! Animation cues emitted by gameplay systems.
//!
//! Gameplay code never names animator parameters directly. It writes
//! [`AnimatorCommand`] messages tagged with an [`AnimationCue`], and the host
//! resolves each cue to its own parameter handle through
//! [`AnimationCue::parameter_name`].

use bevy::prelude::*;

/// Animator parameters the gameplay systems know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    /// Looping run cycle, driven as a flag.
    Run,
    /// Standing on ground, driven as a flag.
    Grounded,
    /// Melee swing, fired as a trigger.
    Attack,
    /// Reserved for a jump trigger.
    Jump,
    /// Reserved for a flinch trigger.
    Hurt,
    /// Reserved for a death trigger.
    Death,
}

impl AnimationCue {
    /// Animator parameter name used by the character controllers.
    #[must_use]
    pub const fn parameter_name(self) -> &'static str {
        match self {
            Self::Run => "isRunning",
            Self::Grounded => "Grounded",
            Self::Attack => "Attack",
            Self::Jump => "Jump",
            Self::Hurt => "Hurt",
            Self::Death => "Death",
        }
    }
}

/// Instruction for the host animator of `entity`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorCommand {
    /// Set a boolean parameter.
    SetFlag {
        /// Animated entity.
        entity: Entity,
        /// Parameter to set.
        cue: AnimationCue,
        /// New value.
        value: bool,
    },
    /// Fire a one-shot trigger parameter.
    Trigger {
        /// Animated entity.
        entity: Entity,
        /// Parameter to fire.
        cue: AnimationCue,
    },
}

impl AnimatorCommand {
    /// Entity whose animator receives the command.
    #[must_use]
    pub const fn entity(&self) -> Entity {
        match *self {
            Self::SetFlag { entity, .. } | Self::Trigger { entity, .. } => entity,
        }
    }
}
