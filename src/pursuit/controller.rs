//! Proximity-gated melee pursuit.
//!
//! Each fixed tick the controller looks at its own position and a snapshot
//! of the target and decides whether to step closer, stand still, or swing.
//! It never touches engine state; the caller applies the returned
//! [`TickOutcome`].

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::vector_math::{planar_direction, step_towards};
use crate::{
    DEFAULT_ATTACK_COOLDOWN, DEFAULT_ATTACK_DAMAGE, DEFAULT_ATTACK_RANGE, DEFAULT_MOVE_SPEED,
};

/// Per-pursuer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitSettings {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Distance at or below which the pursuer stops and attacks.
    pub attack_range: f32,
    /// Seconds that must pass between two strikes.
    pub attack_cooldown: f32,
    /// Health removed from the target per strike.
    pub attack_damage: u16,
}

impl Default for PursuitSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            attack_range: DEFAULT_ATTACK_RANGE,
            attack_cooldown: DEFAULT_ATTACK_COOLDOWN,
            attack_damage: DEFAULT_ATTACK_DAMAGE,
        }
    }
}

/// Horizontal orientation of the pursuer's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Looking towards +x.
    #[default]
    Right,
    /// Looking towards -x.
    Left,
}

impl Facing {
    /// The opposite orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    /// Orientation matching a horizontal movement component, if it has a sign.
    #[must_use]
    pub fn for_heading(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Self::Right)
        } else if dx < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// What the controller can see of its target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    /// Target position in the plane.
    pub position: Vec2,
    /// Target's remaining hit points.
    pub health: u16,
}

/// Body movement requested for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Stop completely.
    Halt,
    /// Zero the horizontal velocity and keep the vertical one.
    Hold,
    /// Move the body to this position.
    Step {
        /// Destination for this tick.
        to: Vec2,
    },
}

/// A successful melee swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Health to remove from the target.
    pub damage: u16,
    /// Simulation time of the swing.
    pub at: f32,
}

/// Decisions produced by one [`PursuitController::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Requested body movement.
    pub motion: Motion,
    /// New value of the running flag.
    pub running: bool,
    /// Whether the pursuer turned around this tick.
    pub flipped: bool,
    /// Strike to deliver, if the attack gate opened.
    pub strike: Option<Strike>,
}

impl TickOutcome {
    /// Standing still with nothing to do.
    pub const IDLE: Self = Self {
        motion: Motion::Halt,
        running: false,
        flipped: false,
        strike: None,
    };
}

/// Chase-then-swing state machine for one pursuer.
#[derive(Debug, Clone, PartialEq)]
pub struct PursuitController {
    settings: PursuitSettings,
    facing: Facing,
    last_attack: Option<f32>,
}

impl PursuitController {
    /// Creates a controller facing right that has never attacked.
    #[must_use]
    pub const fn new(settings: PursuitSettings) -> Self {
        Self {
            settings,
            facing: Facing::Right,
            last_attack: None,
        }
    }

    /// Starts the controller with a different orientation.
    #[must_use]
    pub const fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Tuning in use.
    #[must_use]
    pub const fn settings(&self) -> &PursuitSettings {
        &self.settings
    }

    /// Current orientation.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Time of the most recent strike.
    #[must_use]
    pub const fn last_attack(&self) -> Option<f32> {
        self.last_attack
    }

    /// Whether the cooldown since the last strike has strictly elapsed at `now`.
    #[must_use]
    pub fn cooldown_elapsed(&self, now: f32) -> bool {
        self.last_attack
            .is_none_or(|last| now - last > self.settings.attack_cooldown)
    }

    /// Runs one fixed step.
    ///
    /// `position` is the pursuer's own position, `now` the simulation clock
    /// and `dt` the length of the step in seconds. Movement is decided
    /// first; the attack gate is then checked against the same distance, so
    /// a tick that moves never swings.
    pub fn tick(&mut self, position: Vec2, target: TargetSnapshot, now: f32, dt: f32) -> TickOutcome {
        if target.health == 0 {
            debug!("Target is down; pursuer stays idle");
            return TickOutcome::IDLE;
        }

        let distance = position.distance(target.position);
        let range = self.settings.attack_range;
        debug!("Distance to target: {distance:.3} (attack range {range:.3})");

        let mut outcome = if distance > range {
            let direction = planar_direction(position, target.position);
            let to = step_towards(position, target.position, self.settings.move_speed * dt);
            let flipped = self.face(direction.x);
            TickOutcome {
                motion: Motion::Step { to },
                running: true,
                flipped,
                strike: None,
            }
        } else {
            TickOutcome {
                motion: Motion::Hold,
                running: false,
                flipped: false,
                strike: None,
            }
        };

        if distance <= range && self.cooldown_elapsed(now) {
            debug!("Striking target at t={now:.3}");
            self.last_attack = Some(now);
            outcome.strike = Some(Strike {
                damage: self.settings.attack_damage,
                at: now,
            });
        }

        outcome
    }

    /// Turns towards the sign of `dx`; returns whether the facing changed.
    fn face(&mut self, dx: f32) -> bool {
        match Facing::for_heading(dx) {
            Some(heading) if heading != self.facing => {
                debug!("Flipping to face {heading:?}");
                self.facing = heading;
                true
            }
            _ => false,
        }
    }
}
