//! Melee pursuit: an engine-free controller and its Bevy bindings.

mod controller;
mod plugin;

pub use controller::{
    Facing, Motion, PursuitController, PursuitSettings, Strike, TargetSnapshot, TickOutcome,
};
pub use plugin::{
    apply_strikes_system, pursuit_tick_system, validate_pursuers_system, Flipped, Inert, Pursuer,
    PursuitPlugin, PursuitSetupError, StrikeLanded,
};
