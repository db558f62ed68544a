//! Gunline headless firing range.
//!
//! Runs the combat simulation without a renderer:
//! - **bevy_ecs** for the entity-component-system world and schedules
//! - **nalgebra** for 3D positions and orientations
//! - **configparser** for the INI combat configuration
//!
//! A single weapon at the origin faces a row of targets and a back wall.
//! The trigger is pulled for one tick every `--fire-every` ticks; projectiles
//! come from the configured pool and return to it when they expire or hit.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 600 --seed 42 --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use nalgebra::{UnitQuaternion, Vector3};

use gunline::game;
use gunline::resources::combatconfig::CombatConfig;
use gunline::resources::worldtime::WorldTime;

#[derive(Parser)]
#[command(version, about = "Headless firing range for the gunline combat simulation")]
struct Cli {
    /// INI file with weapon and pool settings.
    #[arg(long, value_name = "PATH", default_value = "./combat.ini")]
    config: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Tick length in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Simulation speed multiplier applied to every tick.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Pull the trigger once every N ticks (minimum 2, so each pull is a fresh press).
    #[arg(long, default_value_t = 15)]
    fire_every: u32,

    /// Seed for spread sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON report to stdout when done.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = CombatConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using default combat settings");
    }
    let settings = config.weapon.clone();

    let mut world = game::build_world(config, cli.seed);
    world.insert_resource(WorldTime::default().with_time_scale(cli.time_scale));
    game::spawn_firing_range(&mut world);
    let weapon = game::spawn_weapon(
        &mut world,
        &settings,
        Vector3::zeros(),
        UnitQuaternion::identity(),
    );
    game::set_weapon_held(&mut world, weapon, true);

    let mut schedule = game::build_schedule();
    let fire_every = cli.fire_every.max(2);
    for i in 0..cli.ticks {
        game::tick(&mut world, &mut schedule, cli.dt, i % fire_every == 0);
    }

    let report = game::range_report(&mut world, weapon);
    info!(
        "{} ticks ({:.2}s): {} shots, {} hits, {} targets destroyed, spread {:.2}",
        report.ticks,
        report.elapsed,
        report.shots,
        report.hits,
        report.targets_destroyed,
        report.final_spread
    );
    for (tag, pool) in &report.pools {
        info!("Pool '{}': {} members, {} active", tag, pool.size, pool.active);
    }

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Failed to serialize report: {e}"),
        }
    }
}
