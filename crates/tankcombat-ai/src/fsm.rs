//! Combat AI finite state machine.
//!
//! Each enemy owns a `CombatAi`. Every frame the engine hands it an
//! `AiContext` describing its unit and the target, and applies the returned
//! intents to the unit. The controller owns no simulation truth.

use rand::Rng;
use tracing::debug;

use tankcombat_core::angles::{angle_difference, angle_towards};
use tankcombat_core::constants::*;
use tankcombat_core::enums::AiState;
use tankcombat_core::types::{UnitId, Vec2};

use crate::patrol::generate_patrol_points;
use crate::weighted::choose_state;

/// What the AI sees of the unit it is chasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub position: Vec2,
    pub alive: bool,
}

/// Input to the AI for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiContext {
    pub position: Vec2,
    pub heading: f64,
    pub turret: f64,
    pub alive: bool,
    pub target: Option<TargetInfo>,
}

/// Movement and aim intents for the controlled unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AiIntent {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Turret target angle in degrees. `None` leaves the current target.
    pub turret_target: Option<f64>,
}

/// Output of one AI frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    pub intent: AiIntent,
    pub state: AiState,
    pub state_changed: bool,
}

/// Per-enemy behavior controller.
#[derive(Debug, Clone)]
pub struct CombatAi {
    unit_id: UnitId,
    state: AiState,
    state_timer: f64,
    state_change_interval: f64,
    fire_cooldown: f64,
    can_see_target: bool,
    patrol_points: Vec<Vec2>,
    patrol_index: usize,
}

impl CombatAi {
    /// Controller for `unit_id` spawned at `spawn`. Starts in Patrol with a
    /// randomized state interval and patrol route.
    pub fn new<R: Rng + ?Sized>(
        unit_id: UnitId,
        spawn: Vec2,
        world_size: Option<Vec2>,
        rng: &mut R,
    ) -> Self {
        Self {
            unit_id,
            state: AiState::Patrol,
            state_timer: 0.0,
            state_change_interval: roll_state_interval(rng),
            fire_cooldown: 0.0,
            can_see_target: false,
            patrol_points: generate_patrol_points(spawn, world_size, rng),
            patrol_index: 0,
        }
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn can_see_target(&self) -> bool {
        self.can_see_target
    }

    pub fn fire_cooldown(&self) -> f64 {
        self.fire_cooldown
    }

    pub fn patrol_points(&self) -> &[Vec2] {
        &self.patrol_points
    }

    pub fn patrol_index(&self) -> usize {
        self.patrol_index
    }

    /// Force a state, restarting the state timer.
    pub fn set_state(&mut self, state: AiState) {
        self.state = state;
        self.state_timer = 0.0;
    }

    /// Advance timers, maybe re-roll the state, and compute intents.
    ///
    /// Returns `None` for a dead unit; its controller does nothing.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        ctx: &AiContext,
        dt: f64,
        rng: &mut R,
    ) -> Option<AiUpdate> {
        if !ctx.alive {
            return None;
        }

        // State re-roll uses last frame's visibility.
        let mut state_changed = false;
        self.state_timer += dt;
        if self.state_timer >= self.state_change_interval {
            let previous = self.state;
            self.state = choose_state(self.can_see_target, rng);
            self.state_change_interval = roll_state_interval(rng);
            self.state_timer = 0.0;
            state_changed = self.state != previous;
            if state_changed {
                debug!(unit_id = self.unit_id.0, state = ?self.state, "ai state changed");
            }
        }

        self.can_see_target = target_visible(ctx);

        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }

        let intent = match self.state {
            AiState::Patrol => self.patrol(ctx),
            AiState::Attack => attack(ctx),
            AiState::Retreat => retreat(ctx),
        };

        Some(AiUpdate {
            intent,
            state: self.state,
            state_changed,
        })
    }

    /// Whether the unit should fire now: target visible, cooldown elapsed,
    /// and turret within `AI_FIRE_ALIGNMENT_DEG` of the target bearing.
    ///
    /// Evaluated against post-move unit state.
    pub fn wants_to_fire(&self, ctx: &AiContext) -> bool {
        if !ctx.alive || !self.can_see_target || self.fire_cooldown > 0.0 {
            return false;
        }
        let Some(target) = ctx.target.filter(|t| t.alive) else {
            return false;
        };
        let bearing = angle_towards(ctx.position, target.position);
        angle_difference(ctx.turret, bearing).abs() < AI_FIRE_ALIGNMENT_DEG
    }

    /// Record a successful shot: the cooldown restarts from a fresh draw.
    pub fn on_fired<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.fire_cooldown = rng.gen_range(AI_FIRE_COOLDOWN_MIN..AI_FIRE_COOLDOWN_MAX);
        debug!(unit_id = self.unit_id.0, cooldown = self.fire_cooldown, "ai fired");
    }

    fn patrol(&mut self, ctx: &AiContext) -> AiIntent {
        if self.patrol_points.is_empty() {
            return AiIntent::default();
        }

        let mut goal = self.patrol_points[self.patrol_index];
        if ctx.position.distance(goal) < AI_PATROL_ARRIVE_DISTANCE {
            self.patrol_index = (self.patrol_index + 1) % self.patrol_points.len();
            goal = self.patrol_points[self.patrol_index];
        }

        let bearing = angle_towards(ctx.position, goal);
        let (turn_left, turn_right) = steer(ctx.heading, bearing);
        AiIntent {
            forward: true,
            backward: false,
            turn_left,
            turn_right,
            turret_target: Some(bearing),
        }
    }
}

fn attack(ctx: &AiContext) -> AiIntent {
    let Some(target) = ctx.target.filter(|t| t.alive) else {
        return AiIntent::default();
    };

    let distance = ctx.position.distance(target.position);
    let bearing = angle_towards(ctx.position, target.position);
    let (forward, backward) = if distance > AI_IDEAL_DISTANCE + AI_STANDOFF_TOLERANCE {
        (true, false)
    } else if distance < AI_IDEAL_DISTANCE - AI_STANDOFF_TOLERANCE {
        (false, true)
    } else {
        (false, false)
    };
    let (turn_left, turn_right) = steer(ctx.heading, bearing);

    AiIntent {
        forward,
        backward,
        turn_left,
        turn_right,
        turret_target: Some(bearing),
    }
}

fn retreat(ctx: &AiContext) -> AiIntent {
    let Some(target) = ctx.target.filter(|t| t.alive) else {
        return AiIntent::default();
    };

    // Face directly away from the target and drive.
    let away = angle_towards(target.position, ctx.position);
    let (turn_left, turn_right) = steer(ctx.heading, away);

    AiIntent {
        forward: true,
        backward: false,
        turn_left,
        turn_right,
        turret_target: Some(away),
    }
}

/// Turn toward `bearing` once the heading error leaves the deadband.
/// Positive error turns right (clockwise).
fn steer(heading: f64, bearing: f64) -> (bool, bool) {
    let diff = angle_difference(heading, bearing);
    if diff.abs() > AI_TURN_DEADBAND_DEG {
        (diff < 0.0, diff > 0.0)
    } else {
        (false, false)
    }
}

fn target_visible(ctx: &AiContext) -> bool {
    match ctx.target {
        Some(t) if t.alive => ctx.position.distance(t.position) <= AI_SIGHT_RANGE,
        _ => false,
    }
}

fn roll_state_interval<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(AI_STATE_INTERVAL_MIN..AI_STATE_INTERVAL_MAX)
}
