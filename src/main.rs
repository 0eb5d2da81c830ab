//! Shadow Cut demo driver
//!
//! Builds a seeded diorama, sweeps the light across it and logs what the
//! shadow colliders do each frame. Run with `RUST_LOG=debug` for per-frame
//! detail.
//!
//! Usage: `shadow-cut [settings.json] [frames] [seed]`

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use shadow_cut::gizmos;
use shadow_cut::sim::{ProxyAction, Scene, ShadowWorld, tick};
use shadow_cut::{Result, Settings};

const DEFAULT_FRAMES: u64 = 240;
const DEFAULT_SEED: u64 = 7;
const MOVABLE_COUNT: usize = 4;
const STATIONARY_COUNT: usize = 5;

fn main() {
    env_logger::init();
    log::info!("Shadow Cut (native) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let scene = build_diorama(&settings, seed);
    let start = Vec3::new(-3.0, 0.5, settings.wall_distance - settings.max_distance / 2.0);
    let mut world = ShadowWorld::new(scene, start, settings)?;

    let mut projected_frames = 0u64;
    for frame in 0..frames {
        world.set_light_position(light_path(&world.settings, frame, frames));
        world.sync_trigger_overlaps();
        let report = tick(&mut world);

        let projected = report
            .outcomes
            .iter()
            .filter(|o| o.action == ProxyAction::Projected)
            .count();
        let swallowed = report
            .outcomes
            .iter()
            .filter(|o| o.cut_enabled == Some(false))
            .count();
        if projected > 0 {
            projected_frames += 1;
        }
        log::debug!(
            "frame {:>4}: light {:?} r={:.3} tracked={} projected={} swallowed={}",
            report.frame,
            world.light().position.to_array(),
            report.footprint_radius,
            report.outcomes.len(),
            projected,
            swallowed
        );

        if frame + 1 == frames {
            match serde_json::to_string(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Could not serialize final report: {}", e),
            }
        }
    }

    let overlay = gizmos::footprint(world.light()).len() + gizmos::near_faces(&world).len();
    log::info!(
        "Simulated {} frames, {} with projected shadows, {} overlay vertices in the last frame",
        frames,
        projected_frames,
        overlay
    );
    Ok(())
}

/// Light sweeps left to right while bobbing towards and away from the wall
fn light_path(settings: &Settings, frame: u64, frames: u64) -> Vec3 {
    let t = frame as f32 / frames.max(1) as f32;
    let x = -3.0 + 6.0 * t;
    let depth = settings.max_distance / 2.0 * (1.0 + 0.5 * (t * std::f32::consts::TAU).sin());
    Vec3::new(x, 0.5, settings.wall_distance - depth)
}

/// Floor, wall, player and a seeded scatter of movable and stationary props
fn build_diorama(settings: &Settings, seed: u64) -> Scene {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut scene = Scene::new();
    let wall_z = settings.wall_distance;

    let level = scene.add_group("Level", None);
    let movables = scene.add_group(&settings.movable_parent_name, Some(level));
    let stationary = scene.add_group(&settings.stationary_parent_name, Some(level));
    let colliders = scene.add_group(&settings.stationary_shadow_parent_name, Some(level));

    for name in &settings.exempt_names {
        scene.add_box(
            name,
            None,
            Vec3::new(0.0, -0.5, wall_z - settings.max_distance / 2.0),
            Vec3::new(20.0, 1.0, settings.max_distance),
            Vec3::splat(0.5),
        );
    }

    let player_pos = Vec3::new(0.0, 0.5, 1.0);
    let player = scene.add_box(&settings.player_name, None, player_pos, Vec3::ONE, Vec3::new(0.25, 0.5, 0.25));
    scene.add_box("Shadow", Some(player), player_pos, Vec3::ONE, Vec3::new(0.25, 0.5, 0.25));
    scene.add_box("Shadow 2D", Some(player), player_pos, Vec3::ONE, Vec3::new(0.25, 0.5, 0.25));

    for i in 0..MOVABLE_COUNT {
        let size = rng.random_range(0.2..0.6);
        let pos = Vec3::new(
            rng.random_range(-3.0..3.0),
            size,
            rng.random_range(wall_z - 6.0..wall_z - 1.0),
        );
        let half = Vec3::splat(size);
        let obj = scene.add_box(&format!("Crate {}", i), Some(movables), pos, Vec3::ONE, half);
        scene.add_box("Shadow", Some(obj), pos, Vec3::ONE, half);
        scene.add_box("Shadow 2D", Some(obj), pos, Vec3::ONE, half);
    }

    for i in 0..STATIONARY_COUNT {
        let half = Vec3::new(rng.random_range(0.1..0.4), rng.random_range(0.3..1.0), 0.2);
        let pos = Vec3::new(
            rng.random_range(-4.0..4.0),
            half.y,
            rng.random_range(wall_z - 4.0..wall_z - 0.5),
        );
        let name = format!("Prop {}", i);
        scene.add_box(&name, Some(stationary), pos, Vec3::ONE, half);
        scene.add_box(&name, Some(colliders), Vec3::new(pos.x, pos.y, wall_z), Vec3::ONE, half);
    }

    scene
}
