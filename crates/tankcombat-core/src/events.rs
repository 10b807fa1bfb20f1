//! Events emitted by the simulation for UI, audio, and scoring consumers.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, UnitId, Vec2};

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A unit launched a projectile.
    ProjectileFired {
        projectile_id: ProjectileId,
        shooter_id: UnitId,
        kind: ProjectileKind,
        position: Vec2,
    },
    /// A projectile struck an obstacle.
    ObstacleHit {
        projectile_id: ProjectileId,
        position: Vec2,
    },
    /// A projectile struck an enemy unit directly.
    UnitHit {
        projectile_id: ProjectileId,
        shooter_id: UnitId,
        target_id: UnitId,
        damage: f64,
    },
    /// A projectile overlapped a unit of its own team and kept flying.
    FriendlyPassThrough {
        projectile_id: ProjectileId,
        unit_id: UnitId,
    },
    /// An explosive projectile detonated.
    Exploded {
        projectile_id: ProjectileId,
        position: Vec2,
        radius: f64,
    },
    /// Area damage dealt by an explosion.
    SplashDamage {
        projectile_id: ProjectileId,
        target_id: UnitId,
        damage: f64,
    },
    /// A projectile left the live set.
    ProjectileRemoved { projectile_id: ProjectileId },
    /// A unit's health reached zero.
    UnitDestroyed { unit_id: UnitId },
    /// A unit began switching ammunition.
    AmmoSwitchStarted { unit_id: UnitId, ammo: AmmoKind },
    /// A combat AI re-rolled its behavior state.
    AiStateChanged { unit_id: UnitId, state: AiState },
}
