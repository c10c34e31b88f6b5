//! Shared app builder and clock helpers for plugin integration tests.
//!
//! Apps are built without `TimePlugin` so each test owns the clock: it
//! advances `Time` by hand and runs exactly the schedule it wants to observe.
#![allow(unfulfilled_lint_expectations)]

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::prelude::*;
use heroes::{ContactPlugin, DialoguePlugin, PresentationPlugin, PursuitPlugin};

/// Builder for test `App` instances with a hand-driven clock.
pub struct TestAppBuilder {
    app: App,
}

impl TestAppBuilder {
    /// Creates an app with only a `Time` resource installed.
    #[must_use]
    pub fn new() -> Self {
        let mut app = App::new();
        app.init_resource::<Time>();
        Self { app }
    }

    /// Installs the pursuit and contact plugins.
    #[must_use]
    #[expect(dead_code, reason = "Not every test binary installs every plugin")]
    pub fn with_pursuit(mut self) -> Self {
        self.app.add_plugins((PursuitPlugin, ContactPlugin));
        self
    }

    /// Installs the dialogue and presentation plugins.
    #[must_use]
    #[expect(dead_code, reason = "Not every test binary installs every plugin")]
    pub fn with_dialogue(mut self) -> Self {
        self.app.add_plugins((DialoguePlugin, PresentationPlugin));
        self
    }

    /// Build and return the configured `App`.
    #[must_use]
    pub fn build(self) -> App {
        self.app
    }
}

fn advance_clock(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
}

/// Advances the clock by `seconds` and runs `FixedUpdate` once.
#[expect(dead_code, reason = "Test helper shared across multiple test files")]
pub fn fixed_step(app: &mut App, seconds: f32) {
    advance_clock(app, seconds);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Advances the clock by `seconds` and runs `Update` once.
#[expect(dead_code, reason = "Test helper shared across multiple test files")]
pub fn frame(app: &mut App, seconds: f32) {
    advance_clock(app, seconds);
    app.world_mut().run_schedule(Update);
}

/// Removes and returns every pending message of type `M`.
#[expect(dead_code, reason = "Test helper shared across multiple test files")]
pub fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut()
        .resource_mut::<Messages<M>>()
        .drain()
        .collect()
}
