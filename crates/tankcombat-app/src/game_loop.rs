//! Fixed-step headless loop.
//!
//! Steps the engine at `DT` for a fixed number of frames, feeding each
//! frame's input snapshot in first, and tallies what happened.

use tracing::{debug, info, warn};

use tankcombat_core::commands::InputSnapshot;
use tankcombat_core::constants::{DEFAULT_TILE_SIZE, DT, FPS};
use tankcombat_core::events::CombatEvent;
use tankcombat_core::types::Vec2;
use tankcombat_map::mapfile::load_or_none;
use tankcombat_map::presets::border_map;
use tankcombat_map::GameMap;
use tankcombat_sim::input::{InputProvider, ScriptedInput};
use tankcombat_sim::{SimConfig, SimulationEngine};

use crate::config::RunConfig;

/// Totals over one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub shots_fired: usize,
    pub unit_hits: usize,
    pub explosions: usize,
    pub units_destroyed: usize,
    pub player_alive: bool,
    pub enemies_alive: usize,
}

/// Map from the configured file, or the built-in arena if none is set or
/// it fails to load.
pub fn load_map(config: &RunConfig) -> GameMap {
    if let Some(path) = &config.map_path {
        if let Some(map) = load_or_none(path, DEFAULT_TILE_SIZE) {
            return map;
        }
        warn!(path = %path.display(), "falling back to built-in arena");
    }
    border_map(20, 15, DEFAULT_TILE_SIZE)
}

/// Player script: patrol the arena, sweep the turret, and fire in bursts.
pub fn demo_script(frames: u64) -> ScriptedInput {
    let snapshots = (0..frames)
        .map(|i| {
            let t = i as f64 * DT;
            InputSnapshot {
                forward: i % 240 < 180,
                turn_right: i % 240 >= 180,
                aim_point: Some(Vec2::new(640.0 + 300.0 * t.cos(), 480.0 + 300.0 * t.sin())),
                fire: i % 20 == 0,
                ..Default::default()
            }
        })
        .collect();
    ScriptedInput::new(snapshots)
}

/// Run the simulation to completion.
pub fn run(config: &RunConfig, input: &mut dyn InputProvider) -> RunSummary {
    let map = load_map(config);
    let sim_config = SimConfig {
        seed: config.seed,
        enemy_count: config.enemies,
        ..SimConfig::default()
    };
    let mut engine = SimulationEngine::new(sim_config, map);
    info!(
        seed = config.seed,
        frames = config.frames,
        enemies = engine.ais().len(),
        "simulation started"
    );

    let mut summary = RunSummary::default();
    for _ in 0..config.frames {
        engine.apply_input(&input.poll());
        let snapshot = engine.tick(DT);
        summary.frames += 1;

        for event in &snapshot.events {
            match event {
                CombatEvent::ProjectileFired { .. } => summary.shots_fired += 1,
                CombatEvent::UnitHit { .. } => summary.unit_hits += 1,
                CombatEvent::Exploded { .. } => summary.explosions += 1,
                CombatEvent::UnitDestroyed { .. } => summary.units_destroyed += 1,
                _ => {}
            }
        }

        if snapshot.time.frame % FPS as u64 == 0 {
            debug!(
                frame = snapshot.time.frame,
                projectiles = snapshot.projectiles.len(),
                alive = snapshot.units.iter().filter(|u| u.is_alive).count(),
                "frame"
            );
        }
    }

    let player_id = engine.player_id();
    summary.player_alive = engine.player().is_some_and(|p| p.info().is_alive);
    summary.enemies_alive = engine
        .units()
        .iter()
        .map(|u| u.info())
        .filter(|u| u.id != player_id && u.is_alive)
        .count();

    info!(
        frames = summary.frames,
        shots = summary.shots_fired,
        hits = summary.unit_hits,
        explosions = summary.explosions,
        destroyed = summary.units_destroyed,
        player_alive = summary.player_alive,
        enemies_alive = summary.enemies_alive,
        "simulation finished"
    );
    summary
}
