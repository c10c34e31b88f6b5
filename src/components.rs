//! ECS component types shared by the pursuit, contact and presentation
//! systems.
use bevy::prelude::*;
use serde::Serialize;

/// Hit points of an entity that can be struck.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[reflect(Component)]
pub struct Health {
    /// Remaining hit points; zero means the entity is down.
    pub current: u16,
    /// Hit points when fully healed.
    pub max: u16,
}

impl Health {
    /// Creates a fully healed pool of `max` hit points.
    #[must_use]
    pub const fn new(max: u16) -> Self {
        Self { current: max, max }
    }

    /// Whether any hit points remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Removes `amount` hit points, stopping at zero, and returns what is left.
    pub const fn take_damage(&mut self, amount: u16) -> u16 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }
}

/// Planar velocity handed to the host's physics body.
///
/// Pursuit only ever zeroes components of this; stepping towards a target is
/// a position move applied to `Transform`.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[reflect(Component, Default)]
pub struct VelocityComp {
    /// Horizontal velocity.
    pub vx: f32,
    /// Vertical velocity.
    pub vy: f32,
}

/// Mirror of the animator's running flag.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Running(pub bool);

/// Whether the entity currently rests on a ground surface.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Grounded(pub bool);
