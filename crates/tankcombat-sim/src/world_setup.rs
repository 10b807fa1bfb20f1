//! Spawn factories for the initial battlefield.
//!
//! One player tank at a fixed point, then enemy tanks scattered at random
//! open positions, each paired with its own combat AI.

use rand::Rng;
use tracing::{info, warn};

use tankcombat_ai::CombatAi;
use tankcombat_core::components::UnitConfig;
use tankcombat_core::enums::{AmmoKind, ArmorType, Team};
use tankcombat_core::types::{Rect, Size, UnitId, Vec2};
use tankcombat_map::{GameMap, ObstacleQuery};

use crate::assets::{apply_body_image, ImageProvider};
use crate::capability::Collidable;
use crate::registry::UnitRegistry;
use crate::unit::Unit;

/// Attempts per enemy before giving up on finding a free spot.
const SPAWN_ATTEMPTS: usize = 100;

/// Default loadout for the player tank.
pub fn player_config() -> UnitConfig {
    UnitConfig {
        armor_type: ArmorType::Medium,
        ammunition: vec![AmmoKind::Bullet, AmmoKind::ArmorPiercing, AmmoKind::HighExplosive],
        ..UnitConfig::default()
    }
}

/// Default loadout for enemy tanks.
pub fn enemy_config() -> UnitConfig {
    UnitConfig {
        max_speed_rate: 0.8,
        armor_type: ArmorType::Light,
        ammunition: vec![AmmoKind::Bullet],
        ..UnitConfig::default()
    }
}

/// Spawn the player tank.
pub fn spawn_player(
    units: &mut UnitRegistry,
    config: UnitConfig,
    position: Vec2,
    images: &dyn ImageProvider,
) -> UnitId {
    let id = units.allocate_id();
    let mut unit = Unit::new(id, Team::Player, config, position);
    apply_body_image(&mut unit, images);
    units.insert(unit);
    info!(unit_id = id.0, x = position.x, y = position.y, "player spawned");
    id
}

/// Spawn up to `count` enemies inside `area` (the whole map if `None`).
///
/// Positions are re-drawn until the footprint is clear of obstacles, the
/// map edge, and other units. An enemy that finds no spot is skipped.
pub fn spawn_enemies<R: Rng + ?Sized>(
    units: &mut UnitRegistry,
    map: &GameMap,
    config: &UnitConfig,
    count: usize,
    area: Option<Rect>,
    images: &dyn ImageProvider,
    rng: &mut R,
) -> Vec<CombatAi> {
    let world = map.map_size();
    let area = area.unwrap_or(Rect::new(0.0, 0.0, world.x, world.y));
    let mut ais = Vec::with_capacity(count);

    for _ in 0..count {
        let id = units.allocate_id();
        let mut unit = Unit::new(id, Team::Enemy, config.clone(), Vec2::ZERO);
        apply_body_image(&mut unit, images);

        let Some(position) = find_spawn(units, map, unit.size(), area, rng) else {
            warn!(unit_id = id.0, "no free spawn position, enemy skipped");
            continue;
        };
        unit.move_to(position);
        units.insert(unit);

        ais.push(CombatAi::new(id, position, Some(world), rng));
        info!(unit_id = id.0, x = position.x, y = position.y, "enemy spawned");
    }
    ais
}

fn find_spawn<R: Rng + ?Sized>(
    units: &UnitRegistry,
    map: &GameMap,
    size: Size,
    area: Rect,
    rng: &mut R,
) -> Option<Vec2> {
    let bounds = Rect::new(0.0, 0.0, map.map_size().x, map.map_size().y);
    let (half_w, half_h) = (size.width / 2.0, size.height / 2.0);
    let (min_x, max_x) = (area.x + half_w, area.right() - half_w);
    let (min_y, max_y) = (area.y + half_h, area.bottom() - half_h);
    if min_x >= max_x || min_y >= max_y {
        return None;
    }

    (0..SPAWN_ATTEMPTS).find_map(|_| {
        let candidate = Vec2::new(rng.gen_range(min_x..max_x), rng.gen_range(min_y..max_y));
        let footprint = Rect::from_center(candidate, size);
        let inside = footprint.x >= bounds.x
            && footprint.y >= bounds.y
            && footprint.right() <= bounds.right()
            && footprint.bottom() <= bounds.bottom();
        let clear = inside
            && !map.check_collision(&footprint)
            && units.iter().all(|u| !u.bounding_box().intersects(&footprint));
        clear.then_some(candidate)
    })
}
