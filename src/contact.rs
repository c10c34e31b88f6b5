//! Ground contact tracking.
//!
//! The host's physics reports collision starts and ends as
//! [`SurfaceContact`] messages. Only ground surfaces matter: they keep the
//! [`Grounded`] flag of the touching entity up to date.

use bevy::prelude::*;
use log::debug;

use crate::components::Grounded;

/// Kind of surface involved in a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Walkable ground.
    Ground,
    /// Anything else: walls, props, other characters.
    Other,
}

/// Whether a contact began or ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// The bodies started touching.
    Enter,
    /// The bodies stopped touching.
    Exit,
}

/// Collision notification forwarded by the host.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceContact {
    /// The entity whose body touched the surface.
    pub entity: Entity,
    /// What it touched.
    pub surface: SurfaceKind,
    /// Start or end of the contact.
    pub phase: ContactPhase,
}

/// Applies ground contacts to [`Grounded`]; other surfaces are ignored.
pub fn track_grounded_system(
    mut contacts: MessageReader<SurfaceContact>,
    mut grounded: Query<&mut Grounded>,
) {
    for contact in contacts.read() {
        if contact.surface != SurfaceKind::Ground {
            continue;
        }
        let Ok(mut flag) = grounded.get_mut(contact.entity) else {
            continue;
        };
        let value = contact.phase == ContactPhase::Enter;
        debug!("{} grounded: {value}", contact.entity);
        flag.0 = value;
    }
}

/// Plugin registering contact messages and the grounded tracker.
#[derive(Debug, Default)]
pub struct ContactPlugin;

impl Plugin for ContactPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SurfaceContact>()
            .add_systems(FixedUpdate, track_grounded_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use rstest::rstest;

    fn contact(entity: Entity, surface: SurfaceKind, phase: ContactPhase) -> SurfaceContact {
        SurfaceContact {
            entity,
            surface,
            phase,
        }
    }

    #[rstest]
    #[case::ground_enter(SurfaceKind::Ground, ContactPhase::Enter, false, true)]
    #[case::ground_exit(SurfaceKind::Ground, ContactPhase::Exit, true, false)]
    #[case::wall_enter(SurfaceKind::Other, ContactPhase::Enter, false, false)]
    #[case::wall_exit(SurfaceKind::Other, ContactPhase::Exit, true, true)]
    fn contacts_update_grounded(
        #[case] surface: SurfaceKind,
        #[case] phase: ContactPhase,
        #[case] initial: bool,
        #[case] expected: bool,
    ) {
        let mut app = App::new();
        app.add_message::<SurfaceContact>();
        let entity = app.world_mut().spawn(Grounded(initial)).id();

        app.world_mut().write_message(contact(entity, surface, phase));
        app.world_mut()
            .run_system_once(track_grounded_system)
            .expect("system runs");

        let grounded = app.world().get::<Grounded>(entity).map(|g| g.0);
        assert_eq!(grounded, Some(expected));
    }
}
