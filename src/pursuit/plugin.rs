//! Bevy bindings for [`PursuitController`].
//!
//! The tick system reads `Transform` and [`Health`], feeds the controller, and
//! turns its outcome into engine side effects: position moves, velocity
//! resets, sprite mirroring, animator commands and strikes. Strikes are
//! applied to the target's health by a second system chained after the tick.
//! Two pursuers may target each other.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use hashbrown::HashMap;
use log::{debug, error, info};
use thiserror::Error;

use crate::animation::{AnimationCue, AnimatorCommand};
use crate::components::{Grounded, Health, Running, VelocityComp};

use super::controller::{Facing, Motion, PursuitController, PursuitSettings, TargetSnapshot};

/// An entity that chases and strikes `target`.
#[derive(Component, Debug, Clone)]
#[require(Transform, VelocityComp, Running, Grounded)]
pub struct Pursuer {
    /// Decision state carried across ticks.
    pub controller: PursuitController,
    /// Entity being chased; must carry [`Health`].
    pub target: Option<Entity>,
}

impl Pursuer {
    /// Pursuer chasing `target` with the given tuning.
    #[must_use]
    pub const fn new(settings: PursuitSettings, target: Entity) -> Self {
        Self {
            controller: PursuitController::new(settings),
            target: Some(target),
        }
    }
}

/// Marks a pursuer whose setup failed; it idles for the rest of its life.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inert;

/// A pursuer turned around. Hosts mirror any state beyond `Transform` here.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flipped {
    /// The pursuer that turned.
    pub entity: Entity,
    /// Its new orientation.
    pub facing: Facing,
}

/// A strike that will be applied to `target` by [`apply_strikes_system`].
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeLanded {
    /// The pursuer that swung.
    pub attacker: Entity,
    /// The entity that was hit.
    pub target: Entity,
    /// Health to remove.
    pub damage: u16,
}

/// A pursuer is missing a dependency it needs to run.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PursuitSetupError {
    /// No target entity was assigned.
    #[error("pursuer {pursuer} has no target")]
    MissingTarget {
        /// Offending pursuer.
        pursuer: Entity,
    },
    /// The target has no [`Health`] component, or no longer exists.
    #[error("target {target} of pursuer {pursuer} has no Health component")]
    MissingTargetHealth {
        /// Offending pursuer.
        pursuer: Entity,
        /// Target lacking health.
        target: Entity,
    },
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_setup_error(event: On<PursuitSetupError>) {
    error!("Pursuit disabled: {}", event.event());
}

/// Checks newly added pursuers for a target with health.
///
/// Failures are reported once through [`PursuitSetupError`] and the pursuer
/// is marked [`Inert`] so later ticks stay quiet.
pub fn validate_pursuers_system(
    mut commands: Commands,
    pursuers: Query<(Entity, &Pursuer), Added<Pursuer>>,
    targets: Query<(), With<Health>>,
) {
    for (entity, pursuer) in &pursuers {
        let failure = match pursuer.target {
            None => Some(PursuitSetupError::MissingTarget { pursuer: entity }),
            Some(target) if targets.get(target).is_err() => {
                Some(PursuitSetupError::MissingTargetHealth {
                    pursuer: entity,
                    target,
                })
            }
            Some(target) => {
                info!("Pursuer {entity} locked onto {target}");
                None
            }
        };

        if let Some(failure) = failure {
            commands.entity(entity).insert(Inert);
            commands.trigger(failure);
        }
    }
}

type PursuerRow<'w> = (
    Entity,
    &'w mut Pursuer,
    &'w mut Transform,
    &'w mut VelocityComp,
    &'w mut Running,
    Has<Inert>,
);

/// Advances every pursuer by one fixed step.
///
/// Uses `Time::elapsed_secs` as the attack clock and `Time::delta_secs` as
/// the step length; under `FixedUpdate` both come from the fixed clock.
/// Targets are snapshotted before any pursuer moves, so a target may itself
/// be a pursuer and every pursuer sees positions from the start of the step.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn pursuit_tick_system(
    time: Res<Time>,
    mut rows: ParamSet<(Query<PursuerRow<'_>>, Query<(&Transform, &Health)>)>,
    mut animator: MessageWriter<AnimatorCommand>,
    mut flips: MessageWriter<Flipped>,
    mut strikes: MessageWriter<StrikeLanded>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    let wanted: Vec<Entity> = rows
        .p0()
        .iter()
        .filter_map(|(_, pursuer, .., inert)| pursuer.target.filter(|_| !inert))
        .collect();
    let snapshots: HashMap<Entity, TargetSnapshot> = {
        let targets = rows.p1();
        wanted
            .into_iter()
            .filter_map(|target| {
                let (transform, health) = targets.get(target).ok()?;
                Some((
                    target,
                    TargetSnapshot {
                        position: transform.translation.truncate(),
                        health: health.current,
                    },
                ))
            })
            .collect()
    };

    for (entity, mut pursuer, mut transform, mut velocity, mut running, inert) in &mut rows.p0() {
        let snapshot = pursuer
            .target
            .filter(|_| !inert)
            .and_then(|target| snapshots.get(&target).map(|snapshot| (target, *snapshot)));

        let Some((target, snapshot)) = snapshot else {
            if !inert && running.0 {
                debug!("Pursuer {entity} lost its target; idling");
            }
            set_running(entity, &mut running, false, &mut animator);
            *velocity = VelocityComp::default();
            continue;
        };

        let position = transform.translation.truncate();
        let outcome = pursuer.controller.tick(position, snapshot, now, dt);

        match outcome.motion {
            Motion::Halt => *velocity = VelocityComp::default(),
            Motion::Hold => velocity.vx = 0.0,
            Motion::Step { to } => {
                transform.translation.x = to.x;
                transform.translation.y = to.y;
            }
        }
        set_running(entity, &mut running, outcome.running, &mut animator);

        if outcome.flipped {
            transform.scale.x = -transform.scale.x;
            flips.write(Flipped {
                entity,
                facing: pursuer.controller.facing(),
            });
        }

        if let Some(strike) = outcome.strike {
            animator.write(AnimatorCommand::Trigger {
                entity,
                cue: AnimationCue::Attack,
            });
            strikes.write(StrikeLanded {
                attacker: entity,
                target,
                damage: strike.damage,
            });
        }
    }
}

fn set_running(
    entity: Entity,
    running: &mut Running,
    value: bool,
    animator: &mut MessageWriter<AnimatorCommand>,
) {
    if running.0 != value {
        running.0 = value;
        animator.write(AnimatorCommand::SetFlag {
            entity,
            cue: AnimationCue::Run,
            value,
        });
    }
}

/// Subtracts landed strikes from their targets' health.
pub fn apply_strikes_system(
    mut strikes: MessageReader<StrikeLanded>,
    mut targets: Query<&mut Health>,
) {
    for strike in strikes.read() {
        let Ok(mut health) = targets.get_mut(strike.target) else {
            debug!("Strike on {} missed: target is gone", strike.target);
            continue;
        };
        let left = health.take_damage(strike.damage);
        info!(
            "{} hit {} for {} ({left} left)",
            strike.attacker, strike.target, strike.damage
        );
    }
}

/// Plugin running pursuers on the fixed simulation step.
#[derive(Debug, Default)]
pub struct PursuitPlugin;

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimatorCommand>()
            .add_message::<Flipped>()
            .add_message::<StrikeLanded>()
            .add_observer(log_setup_error)
            .add_systems(
                FixedUpdate,
                (
                    validate_pursuers_system,
                    pursuit_tick_system,
                    apply_strikes_system,
                )
                    .chain(),
            );
    }
}
