//! Tuning constants used across the dialogue and pursuit systems.
//!
//! Runtime overrides live in [`crate::settings::GameSettings`]; these values
//! are the defaults it falls back to for any field a settings file omits.

/// Pursuer movement speed in world units per second.
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Distance at or below which a pursuer stops and swings.
pub const DEFAULT_ATTACK_RANGE: f32 = 2.2;
/// Seconds that must elapse between two strikes from the same pursuer.
pub const DEFAULT_ATTACK_COOLDOWN: f32 = 1.0;
/// Health removed from the target by one strike.
pub const DEFAULT_ATTACK_DAMAGE: u16 = 10;
/// Seconds taken by the dialogue box scale tween when it opens or closes.
pub const BOX_REVEAL_SECONDS: f32 = 0.5;
/// Seconds taken by the text fade-in played for every displayed line.
pub const TEXT_FADE_SECONDS: f32 = 0.5;
/// Fixed simulation rate driving `FixedUpdate`.
pub const SIMULATION_HZ: f64 = 60.0;
