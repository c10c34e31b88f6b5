//! Headless demo: a bandit chases the player while a dialogue box plays a
//! script, one line every second of simulated time.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use heroes::dialogue::{AdvanceDialogue, DialogueScript, Line, OpenDialogue, Speaker};
use heroes::{init_logging, DialogueBox, GameSettings, Health, HeroesPlugin, Pursuer};
use log::{debug, info};

/// Headless duel simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON settings file overriding the built-in tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON dialogue script to play
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Starting distance between the bandit and the player
    #[arg(long, default_value_t = 10.0)]
    distance: f32,
}

fn builtin_script() -> (Vec<Line>, Vec<Speaker>) {
    let knight = Speaker::new("Sir Aldric", "portraits/knight.png");
    let bandit = Speaker::new("Vex", "portraits/bandit.png");
    (
        vec![
            Line::new("knight", "Halt! This road is closed."),
            Line::new("bandit", "Then I will open it."),
            Line::new("knight", "Draw your blade."),
        ],
        vec![knight.clone(), bandit, knight],
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !init_logging(args.verbose) {
        debug!("Logger already installed; keeping its configuration");
    }

    let settings = match &args.config {
        Some(path) => GameSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    let (lines, speakers) = match &args.script {
        Some(path) => DialogueScript::load(path)
            .and_then(|script| script.resolve())
            .with_context(|| format!("loading dialogue script {}", path.display()))?,
        None => builtin_script(),
    };

    let frame = Duration::from_secs_f64(1.0 / settings.simulation_hz);
    let frames_per_line = settings.simulation_hz.round().max(1.0);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins(HeroesPlugin::new(settings.clone()));

    let player = app
        .world_mut()
        .spawn((
            Name::new("Player"),
            Transform::from_xyz(args.distance, 0.0, 0.0),
            Health::new(100),
        ))
        .id();
    let bandit = app
        .world_mut()
        .spawn((
            Name::new("Bandit"),
            Transform::default(),
            Pursuer::new(settings.pursuit, player),
        ))
        .id();
    let dialogue_box = app
        .world_mut()
        .spawn((Name::new("DialogueBox"), DialogueBox::default()))
        .id();

    app.world_mut().write_message(OpenDialogue {
        dialogue_box,
        lines,
        speakers,
    });

    app.finish();
    app.cleanup();

    for tick in 1..=args.ticks {
        if f64::from(tick) % frames_per_line == 0.0 {
            app.world_mut()
                .write_message(AdvanceDialogue { dialogue_box });
        }
        app.update();
    }

    let world = app.world();
    let health = world
        .get::<Health>(player)
        .context("player lost its Health component")?;
    let position = world
        .get::<Transform>(bandit)
        .context("bandit lost its Transform")?
        .translation;
    info!(
        "Simulation complete after {} frames: player health {}/{}, bandit at ({:.2}, {:.2})",
        args.ticks, health.current, health.max, position.x, position.y
    );

    Ok(())
}
