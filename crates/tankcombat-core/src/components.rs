//! Capability and tuning records for units and projectiles.
//!
//! These are plain data structs. Behavior lives in the sim crate;
//! the records only describe what an entity is configured to do.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::Size;

/// Immutable capability rates of a unit. Each rate is multiplied by the
/// matching base constant to obtain the live capability value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    pub kind: UnitKind,
    pub max_speed_rate: f64,
    pub max_acceleration_rate: f64,
    /// Negative rate: reverse acceleration.
    pub min_acceleration_rate: f64,
    pub max_angular_speed_rate: f64,
    pub turret_angular_speed_rate: f64,
    pub max_health_rate: f64,
    pub armor_type: ArmorType,
    /// Owned ammunition. The first entry is selected at construction.
    pub ammunition: Vec<AmmoKind>,
    pub ammo_switch_time: f64,
    /// Collision footprint.
    pub size: Size,
    pub body_image_path: Option<String>,
    pub turret_image_path: Option<String>,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            kind: UnitKind::Tank,
            max_speed_rate: 1.0,
            max_acceleration_rate: 1.0,
            min_acceleration_rate: -1.0,
            max_angular_speed_rate: 1.0,
            turret_angular_speed_rate: 1.0,
            max_health_rate: 1.0,
            armor_type: ArmorType::None,
            ammunition: vec![AmmoKind::Bullet],
            ammo_switch_time: UNIT_AMMO_SWITCH_TIME,
            size: Size::new(TANK_WIDTH, TANK_HEIGHT),
            body_image_path: Some("assets/tank/body.png".to_string()),
            turret_image_path: Some("assets/tank/turret.png".to_string()),
        }
    }
}

/// Ballistic and damage profile of a projectile body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileProfile {
    pub size: Size,
    /// Seconds of flight before the projectile expires.
    pub lifetime: f64,
    pub speed_rate: f64,
    pub damage_rate: f64,
    /// Damage multipliers against Light, Medium, Heavy armor.
    pub penetration: [f64; 3],
    pub is_explosive: bool,
    pub explosion_radius: f64,
    /// Fraction of base damage dealt at the center of the blast.
    pub explosion_damage_rate: f64,
    pub image_path: Option<String>,
    pub explosion_image_path: Option<String>,
}

impl Default for ProjectileProfile {
    fn default() -> Self {
        Self {
            size: Size::new(8.0, 8.0),
            lifetime: BULLET_LIFETIME,
            speed_rate: 1.0,
            damage_rate: 1.0,
            penetration: [1.0, 1.0, 1.0],
            is_explosive: false,
            explosion_radius: 0.0,
            explosion_damage_rate: 0.0,
            image_path: None,
            explosion_image_path: None,
        }
    }
}

/// Per-ammo adjustments applied to a projectile profile at fire time.
/// `None` fields leave the profile value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmmoOverride {
    pub damage_rate: Option<f64>,
    pub penetration: Option<[f64; 3]>,
    pub speed_rate: Option<f64>,
    pub explosive: Option<ExplosiveOverride>,
}

/// Explosive charge settings carried by an ammo override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExplosiveOverride {
    /// Strip any explosive charge.
    Inert,
    /// Arm the projectile with the given blast.
    Charge {
        radius: f64,
        damage_rate: f64,
    },
}
