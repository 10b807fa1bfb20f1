//! JSON records for saving and restoring units and projectiles.
//!
//! Missing fields fall back to defaults on load. Every loader has an
//! `_or_none` variant that logs the failure and returns `None`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use tankcombat_core::components::UnitConfig;
use tankcombat_core::constants::*;
use tankcombat_core::enums::{AmmoKind, ProjectileKind, Team};
use tankcombat_core::error::PersistenceError;
use tankcombat_core::types::{Rect, Size, Vec2};
use tankcombat_map::mapfile::next_filename;

use crate::projectile::Projectile;
use crate::unit::Unit;

/// `{ "x": .., "y": .. }` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XyRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Vec2> for XyRecord {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<XyRecord> for Vec2 {
    fn from(r: XyRecord) -> Self {
        Vec2::new(r.x, r.y)
    }
}

/// Saved projectile. The derived `speed`, `damage`, and `velocity` fields
/// are informational and ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileRecord {
    pub id: u64,
    pub shooter_id: u32,
    pub shooter_team: Team,
    pub kind: ProjectileKind,
    pub image_path: Option<String>,
    pub position: XyRecord,
    pub velocity_direction: XyRecord,
    pub size: Size,
    pub bounding_box: Option<Rect>,
    pub lifetime: f64,
    pub speed_rate: f64,
    pub damage_rate: f64,
    pub penetration: Vec<f64>,
    pub is_explosive: bool,
    pub explosion_radius: f64,
    pub explosion_damage_rate: f64,
    pub explosion_image_path: Option<String>,
    pub is_active: bool,
    pub has_collided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<XyRecord>,
}

impl Default for ProjectileRecord {
    fn default() -> Self {
        Self {
            id: 0,
            shooter_id: 0,
            shooter_team: Team::Neutral,
            kind: ProjectileKind::NormalShell,
            image_path: None,
            position: XyRecord::default(),
            velocity_direction: XyRecord { x: 1.0, y: 0.0 },
            size: Size::new(8.0, 8.0),
            bounding_box: None,
            lifetime: BULLET_LIFETIME,
            speed_rate: 1.0,
            damage_rate: 1.0,
            penetration: vec![1.0, 1.0, 1.0],
            is_explosive: false,
            explosion_radius: 0.0,
            explosion_damage_rate: 0.0,
            explosion_image_path: None,
            is_active: true,
            has_collided: false,
            speed: None,
            damage: None,
            velocity: None,
        }
    }
}

/// Saved unit: identity, pose, health, and its capability config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRecord {
    pub id: u32,
    pub team: Team,
    pub position: XyRecord,
    pub size: Size,
    pub bounding_box: Option<Rect>,
    pub direction_angle: f64,
    pub turret_direction_angle: f64,
    pub health: f64,
    pub current_ammo: Option<AmmoKind>,
    pub config: UnitConfig,
}

impl Default for UnitRecord {
    fn default() -> Self {
        Self {
            id: 0,
            team: Team::Player,
            position: XyRecord::default(),
            size: Size::new(TANK_WIDTH, TANK_HEIGHT),
            bounding_box: None,
            direction_angle: 0.0,
            turret_direction_angle: 0.0,
            health: UNIT_HEALTH,
            current_ammo: None,
            config: UnitConfig::default(),
        }
    }
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(io_err)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let json = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Load a record, logging and returning `None` on any failure.
pub fn load_json_or_none<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match load_json(path) {
        Ok(value) => Some(value),
        Err(PersistenceError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "record file not found");
            None
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load record");
            None
        }
    }
}

/// Save under the next free `{prefix}N.json` name in `dir`.
pub fn save_json_to_dir<T: Serialize>(
    value: &T,
    dir: &Path,
    prefix: &str,
) -> Result<PathBuf, PersistenceError> {
    let name = next_filename(dir, prefix, ".json").map_err(|source| PersistenceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    save_json(value, &path)?;
    info!(path = %path.display(), "record saved");
    Ok(path)
}

pub fn save_projectile(projectile: &Projectile, path: &Path) -> Result<(), PersistenceError> {
    save_json(&projectile.to_record(), path)
}

pub fn load_projectile(path: &Path) -> Result<Projectile, PersistenceError> {
    let record: ProjectileRecord = load_json(path)?;
    Ok(Projectile::from_record(&record))
}

pub fn load_projectile_or_none(path: &Path) -> Option<Projectile> {
    load_json_or_none::<ProjectileRecord>(path).map(|r| Projectile::from_record(&r))
}

pub fn save_unit(unit: &Unit, path: &Path) -> Result<(), PersistenceError> {
    save_json(&unit.to_record(), path)
}

pub fn load_unit(path: &Path) -> Result<Unit, PersistenceError> {
    let record: UnitRecord = load_json(path)?;
    Ok(Unit::from_record(&record))
}

pub fn load_unit_or_none(path: &Path) -> Option<Unit> {
    load_json_or_none::<UnitRecord>(path).map(|r| Unit::from_record(&r))
}
