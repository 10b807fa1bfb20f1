//! Frame snapshot: the visible state handed to renderers after each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{ProjectileId, Rect, SimTime, UnitId, Vec2};

/// Complete visible state after one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub units: Vec<UnitInfo>,
    pub projectiles: Vec<ProjectileView>,
    pub ai: Vec<AiView>,
    pub events: Vec<CombatEvent>,
}

/// Status of one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub id: UnitId,
    pub team: Team,
    pub kind: UnitKind,
    pub position: Vec2,
    pub health: f64,
    pub max_health: f64,
    pub speed: f64,
    pub max_speed: f64,
    /// Hull heading (degrees, 0 = up).
    pub heading: f64,
    /// Turret facing (degrees, 0 = up).
    pub turret: f64,
    pub current_ammo: Option<AmmoKind>,
    pub is_alive: bool,
    pub is_switching_ammo: bool,
    pub ammo_switch_remaining: f64,
}

/// A live projectile as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub shooter_id: UnitId,
    pub position: Vec2,
    pub bounding_box: Rect,
    pub phase: ProjectilePhase,
    /// Blast radius while exploding, zero otherwise.
    pub explosion_radius: f64,
}

/// Behavior state of one AI-controlled unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiView {
    pub unit_id: UnitId,
    pub state: AiState,
    pub can_see_target: bool,
}
