//! Simulation engine: the frame loop.
//!
//! `SimulationEngine` owns the map, units, AI controllers, and projectiles,
//! processes player commands, steps everything in a fixed order, and
//! produces a `FrameSnapshot` per tick. Headless and deterministic for a
//! given seed and input sequence.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tankcombat_ai::{AiContext, CombatAi, TargetInfo};
use tankcombat_core::commands::{InputSnapshot, PlayerCommand};
use tankcombat_core::components::UnitConfig;
use tankcombat_core::constants::*;
use tankcombat_core::enums::{ProjectileKind, UnitState};
use tankcombat_core::events::CombatEvent;
use tankcombat_core::state::{AiView, FrameSnapshot};
use tankcombat_core::types::{ProjectileId, Rect, SimTime, UnitId, Vec2};
use tankcombat_map::{GameMap, ObstacleQuery};

use crate::assets::{ImageProvider, NullImageProvider};
use crate::capability::{Collidable, Damageable};
use crate::manager::ProjectileManager;
use crate::registry::UnitRegistry;
use crate::unit::Unit;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs give the same simulation.
    pub seed: u64,
    pub player_spawn: Vec2,
    pub player: UnitConfig,
    pub enemy: UnitConfig,
    pub enemy_count: usize,
    /// Where enemies may spawn. `None` uses the whole map.
    pub enemy_spawn_area: Option<Rect>,
    /// Projectile launched by the player's fire command from input.
    pub player_fire_kind: ProjectileKind,
    /// Projectile launched by AI-controlled units.
    pub enemy_fire_kind: ProjectileKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_spawn: Vec2::new(96.0, 96.0),
            player: world_setup::player_config(),
            enemy: world_setup::enemy_config(),
            enemy_count: 3,
            enemy_spawn_area: None,
            player_fire_kind: ProjectileKind::NormalShell,
            enemy_fire_kind: ProjectileKind::NormalShell,
        }
    }
}

/// The simulation engine. Owns all sim state.
pub struct SimulationEngine {
    map: GameMap,
    units: UnitRegistry,
    ais: Vec<CombatAi>,
    projectiles: ProjectileManager,
    player_id: UnitId,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<CombatEvent>,
    player_fire_kind: ProjectileKind,
    enemy_fire_kind: ProjectileKind,
    player_fire_request: Option<ProjectileKind>,
    player_fire_cooldown: f64,
}

impl SimulationEngine {
    /// Create an engine on `map` with headless assets.
    pub fn new(config: SimConfig, map: GameMap) -> Self {
        Self::with_images(config, map, &NullImageProvider)
    }

    /// Create an engine, sizing units from `images`.
    pub fn with_images(config: SimConfig, map: GameMap, images: &dyn ImageProvider) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut units = UnitRegistry::new();
        let player_id =
            world_setup::spawn_player(&mut units, config.player, config.player_spawn, images);
        let ais = world_setup::spawn_enemies(
            &mut units,
            &map,
            &config.enemy,
            config.enemy_count,
            config.enemy_spawn_area,
            images,
            &mut rng,
        );

        Self {
            map,
            units,
            ais,
            projectiles: ProjectileManager::new(),
            player_id,
            time: SimTime::default(),
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            player_fire_kind: config.player_fire_kind,
            enemy_fire_kind: config.enemy_fire_kind,
            player_fire_request: None,
            player_fire_cooldown: 0.0,
        }
    }

    /// Queue a player command for the next tick.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Translate an input snapshot into queued commands.
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        let commands = input.to_commands(self.player_fire_kind);
        self.queue_commands(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> FrameSnapshot {
        let dt = dt.max(0.0);

        // 1. Player commands
        self.process_commands();
        // 2. AI intents
        self.run_ai(dt);
        // 3. Unit motion and obstacle rollback
        let obstacles = self.map.obstacles();
        for unit in self.units.iter_mut() {
            unit.update_with_collision(dt, obstacles);
        }
        // 4. Firing from post-move positions
        self.fire_player(dt);
        self.fire_ai();
        // 5. Projectiles: flight, hits, explosions, removal
        self.projectiles.update(
            dt,
            self.units.as_mut_slice(),
            self.map.obstacles(),
            &mut self.events,
        );
        // 6. Clock
        self.time.advance(dt);

        self.build_snapshot()
    }

    /// Replace the map wholesale. Takes effect on the next tick.
    pub fn swap_map(&mut self, map: GameMap) {
        debug!(width = map.width(), height = map.height(), "map swapped");
        self.map = map;
    }

    /// Fire `kind` from a unit, ignoring cooldowns. Returns the new id.
    pub fn fire_from(&mut self, unit_id: UnitId, kind: ProjectileKind) -> Option<ProjectileId> {
        let unit = self.units.get(unit_id)?;
        let id = self.projectiles.allocate_id();
        let projectile = unit.fire(kind, id)?;
        self.events.push(CombatEvent::ProjectileFired {
            projectile_id: id,
            shooter_id: unit_id,
            kind,
            position: projectile.position(),
        });
        self.projectiles.add(projectile);
        Some(id)
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// Mutable unit access for scenario setup.
    pub fn units_mut(&mut self) -> &mut UnitRegistry {
        &mut self.units
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn ais(&self) -> &[CombatAi] {
        &self.ais
    }

    /// Mutable AI access for scenario setup.
    pub fn ais_mut(&mut self) -> &mut [CombatAi] {
        &mut self.ais
    }

    pub fn player_id(&self) -> UnitId {
        self.player_id
    }

    pub fn player(&self) -> Option<&Unit> {
        self.units.get(self.player_id)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player_fire_cooldown(&self) -> f64 {
        self.player_fire_cooldown
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        if let PlayerCommand::ClearProjectiles = command {
            self.projectiles.clear();
            return;
        }
        if let PlayerCommand::Fire { kind } = command {
            self.player_fire_request = Some(kind);
            return;
        }

        let Some(player) = self.units.get_mut(self.player_id) else {
            return;
        };
        match command {
            PlayerCommand::SetMovement { forward, backward } => {
                player.set_movement(forward, backward);
            }
            PlayerCommand::SetTurning { left, right } => {
                player.set_turning(left, right);
            }
            PlayerCommand::AimAt { target } => {
                player.set_turret_target(target);
            }
            PlayerCommand::SwitchAmmo { ammo } => {
                let was_switching = player.is_switching_ammo();
                if player.switch_ammunition(ammo) && !was_switching && player.is_switching_ammo() {
                    self.events.push(CombatEvent::AmmoSwitchStarted {
                        unit_id: self.player_id,
                        ammo,
                    });
                }
            }
            PlayerCommand::Fire { .. } | PlayerCommand::ClearProjectiles => {}
        }
    }

    fn run_ai(&mut self, dt: f64) {
        let target = self.target_info();
        for ai in &mut self.ais {
            let Some(unit) = self.units.get_mut(ai.unit_id()) else {
                continue;
            };
            let ctx = context_for(unit, target);
            let Some(update) = ai.update(&ctx, dt, &mut self.rng) else {
                continue;
            };

            let intent = update.intent;
            unit.set_movement(intent.forward, intent.backward);
            unit.set_turning(intent.turn_left, intent.turn_right);
            if let Some(angle) = intent.turret_target {
                unit.set_turret_target_angle(angle);
            }
            if update.state_changed {
                self.events.push(CombatEvent::AiStateChanged {
                    unit_id: ai.unit_id(),
                    state: update.state,
                });
            }
        }
    }

    fn fire_player(&mut self, dt: f64) {
        if self.player_fire_cooldown > 0.0 {
            self.player_fire_cooldown -= dt;
        }
        let Some(kind) = self.player_fire_request.take() else {
            return;
        };
        if self.player_fire_cooldown > 0.0 {
            return;
        }
        if self.fire_from(self.player_id, kind).is_some() {
            self.player_fire_cooldown = PLAYER_FIRE_COOLDOWN;
        }
    }

    fn fire_ai(&mut self) {
        let target = self.target_info();
        for i in 0..self.ais.len() {
            let unit_id = self.ais[i].unit_id();
            let Some(unit) = self.units.get(unit_id) else {
                continue;
            };
            if !self.ais[i].wants_to_fire(&context_for(unit, target)) {
                continue;
            }
            if self.fire_from(unit_id, self.enemy_fire_kind).is_some() {
                self.ais[i].on_fired(&mut self.rng);
            }
        }
    }

    fn target_info(&self) -> Option<TargetInfo> {
        self.units.get(self.player_id).map(|p| TargetInfo {
            position: p.position(),
            alive: p.is_alive(),
        })
    }

    fn build_snapshot(&mut self) -> FrameSnapshot {
        FrameSnapshot {
            time: self.time,
            units: self.units.iter().map(Unit::info).collect(),
            projectiles: self.projectiles.iter().map(|p| p.view()).collect(),
            ai: self
                .ais
                .iter()
                .map(|ai| AiView {
                    unit_id: ai.unit_id(),
                    state: ai.state(),
                    can_see_target: ai.can_see_target(),
                })
                .collect(),
            events: std::mem::take(&mut self.events),
        }
    }
}

fn context_for(unit: &Unit, target: Option<TargetInfo>) -> AiContext {
    AiContext {
        position: unit.position(),
        heading: unit.heading(),
        turret: unit.turret(),
        alive: unit.state() != UnitState::Dead,
        target,
    }
}
