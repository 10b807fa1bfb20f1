//! Tests for units, projectiles, the projectile manager, persistence, and the engine.

use std::fs;

use tankcombat_core::commands::{InputSnapshot, PlayerCommand};
use tankcombat_core::components::UnitConfig;
use tankcombat_core::constants::*;
use tankcombat_core::enums::*;
use tankcombat_core::events::CombatEvent;
use tankcombat_core::types::{ProjectileId, Rect, Size, UnitId, Vec2};
use tankcombat_map::presets::{border_map, empty_map};
use tankcombat_map::ObstacleQuery;

use crate::ammo::{ammo_override, apply_override, projectile_profile};
use crate::assets::{apply_body_image, ImageInfo, NullImageProvider, StaticImageProvider};
use crate::capability::{Collidable, Damageable};
use crate::engine::{SimConfig, SimulationEngine};
use crate::input::{InputProvider, ScriptedInput};
use crate::manager::ProjectileManager;
use crate::persistence::*;
use crate::projectile::Projectile;
use crate::registry::UnitRegistry;
use crate::unit::Unit;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn tank(id: u32, team: Team, position: Vec2) -> Unit {
    Unit::new(UnitId(id), team, UnitConfig::default(), position)
}

fn armored_tank(id: u32, team: Team, armor: ArmorType, position: Vec2) -> Unit {
    let config = UnitConfig {
        armor_type: armor,
        ..UnitConfig::default()
    };
    Unit::new(UnitId(id), team, config, position)
}

fn shell(kind: ProjectileKind, position: Vec2, direction: Vec2) -> Projectile {
    Projectile::new(
        ProjectileId(0),
        UnitId(0),
        Team::Player,
        kind,
        projectile_profile(kind),
        position,
        direction,
    )
}

fn no_obstacles() -> Vec<Rect> {
    Vec::new()
}

// ---- Unit kinematics ----

#[test]
fn test_speed_clamps_to_max() {
    let mut unit = tank(1, Team::Player, Vec2::new(500.0, 500.0));
    unit.set_acceleration(100.0);
    assert!(unit.update(1.0));
    assert!(approx(unit.speed(), 50.0), "speed {}", unit.speed());
}

#[test]
fn test_heading_turns_and_wraps() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    unit.set_turning(false, true);
    unit.update(0.5);
    assert!(approx(unit.heading(), 50.0));

    let mut unit = tank(2, Team::Player, Vec2::ZERO);
    unit.set_turning(true, false);
    unit.update(0.5);
    assert!(approx(unit.heading(), 310.0));

    let mut unit = tank(3, Team::Player, Vec2::ZERO);
    unit.set_turning(true, true);
    unit.update(0.5);
    assert_eq!(unit.heading(), 0.0);
}

#[test]
fn test_angular_speed_clamped_after_integration() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    unit.set_angular_speed(300.0);
    unit.update(0.1);
    // The first step uses the raw command; the stored value is clamped afterwards.
    assert!(approx(unit.heading(), 30.0));
    assert!(approx(unit.angular_speed(), UNIT_ANGULAR_SPEED));
}

#[test]
fn test_velocity_follows_heading_convention() {
    let start = Vec2::new(500.0, 500.0);
    let mut unit = tank(1, Team::Player, start);
    unit.set_heading(90.0);
    unit.set_movement(true, false);
    unit.update(1.0);
    // 90° points along +x.
    assert!(approx(unit.position().x, start.x + 50.0));
    assert!((unit.position().y - start.y).abs() < 1e-6);
    assert_eq!(unit.bounding_box(), Rect::from_center(unit.position(), unit.size()));
}

#[test]
fn test_reverse_drives_backward() {
    let start = Vec2::new(500.0, 500.0);
    let mut unit = tank(1, Team::Player, start);
    unit.set_movement(false, true);
    unit.update(0.25);
    assert!(approx(unit.speed(), -25.0));
    // Heading 0 is up, so reversing moves down (+y).
    assert!(unit.position().y > start.y);
}

#[test]
fn test_turret_takes_shortest_path_without_overshoot() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    unit.set_turret_target_angle(10.0);
    unit.update(1.0);
    assert!(approx(unit.turret(), 10.0));

    let mut unit = tank(2, Team::Player, Vec2::ZERO);
    unit.set_turret_target_angle(350.0);
    unit.update(0.05);
    assert!(approx(unit.turret(), 355.0));
    let before = (unit.turret() - 350.0).abs();
    unit.update(1.0);
    let after = (unit.turret() - 350.0).abs();
    assert!(after <= before);
    assert!(approx(unit.turret(), 350.0));
}

#[test]
fn test_turret_target_aims_at_point() {
    let mut unit = tank(1, Team::Player, Vec2::new(100.0, 100.0));
    unit.set_turret_target(Vec2::new(200.0, 100.0));
    assert!(approx(unit.turret_target(), 90.0));
    unit.set_turret_target(Vec2::new(100.0, 200.0));
    assert!(approx(unit.turret_target(), 180.0));
}

// ---- Unit collision ----

#[test]
fn test_collision_rolls_back_position() {
    let start = Vec2::new(100.0, 100.0);
    let mut unit = tank(1, Team::Player, start);
    // Wall above the tank; its footprint spans y 80..120.
    let obstacles = vec![Rect::new(80.0, 40.0, 40.0, 20.0)];
    unit.set_movement(true, false);
    unit.set_turret_target_angle(90.0);
    unit.update_with_collision(1.0, &obstacles);

    assert_eq!(unit.position(), start);
    assert_eq!(unit.speed(), 0.0);
    assert!(!obstacles.check_collision(&unit.bounding_box()));
    // The turret keeps its new angle.
    assert!(approx(unit.turret(), 90.0));
}

#[test]
fn test_collision_never_leaves_unit_overlapping() {
    let obstacles = border_map(10, 10, 64).obstacles().to_vec();
    let mut unit = tank(1, Team::Player, Vec2::new(320.0, 320.0));
    unit.set_heading(30.0);
    unit.set_movement(true, false);
    for _ in 0..2000 {
        unit.update_with_collision(DT, &obstacles);
        assert!(!obstacles.check_collision(&unit.bounding_box()));
    }
}

// ---- Damage and death ----

#[test]
fn test_take_damage_returns_full_amount() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    assert_eq!(unit.take_damage(30.0), 30.0);
    assert!(approx(unit.health(), 70.0));
    assert_eq!(unit.take_damage(150.0), 150.0);
    assert_eq!(unit.health(), 0.0);
    assert!(!unit.is_alive());
    assert_eq!(unit.state(), UnitState::Dead);
}

#[test]
fn test_dead_unit_is_inert() {
    let start = Vec2::new(10.0, 10.0);
    let mut unit = tank(1, Team::Player, start);
    unit.set_movement(true, false);
    unit.take_damage(100.0);
    assert!(!unit.update(1.0));
    assert_eq!(unit.position(), start);
    assert!(unit.fire(ProjectileKind::NormalShell, ProjectileId(0)).is_none());
}

// ---- Ammunition ----

#[test]
fn test_switch_to_unowned_ammo_rejected() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    assert!(!unit.switch_ammunition(AmmoKind::HighExplosive));
    assert_eq!(unit.current_ammo(), Some(AmmoKind::Bullet));
    assert_eq!(unit.state(), UnitState::Normal);
}

#[test]
fn test_switch_to_current_ammo_is_noop() {
    let mut unit = tank(1, Team::Player, Vec2::ZERO);
    assert!(unit.switch_ammunition(AmmoKind::Bullet));
    assert!(!unit.is_switching_ammo());
}

#[test]
fn test_ammo_switch_completes_after_timer() {
    let config = UnitConfig {
        ammunition: vec![AmmoKind::Bullet, AmmoKind::ArmorPiercing],
        ..UnitConfig::default()
    };
    let mut unit = Unit::new(UnitId(1), Team::Player, config, Vec2::ZERO);
    assert!(unit.switch_ammunition(AmmoKind::ArmorPiercing));
    assert_eq!(unit.state(), UnitState::SwitchingAmmo);
    assert!(unit.fire(ProjectileKind::NormalShell, ProjectileId(0)).is_none());

    unit.update(0.3);
    assert!(unit.is_switching_ammo());
    assert_eq!(unit.current_ammo(), Some(AmmoKind::Bullet));

    unit.update(0.3);
    assert_eq!(unit.state(), UnitState::Normal);
    assert_eq!(unit.current_ammo(), Some(AmmoKind::ArmorPiercing));
    assert_eq!(unit.ammo_switch_remaining(), 0.0);
}

#[test]
fn test_no_ammo_cannot_fire() {
    let config = UnitConfig {
        ammunition: Vec::new(),
        ..UnitConfig::default()
    };
    let unit = Unit::new(UnitId(1), Team::Player, config, Vec2::ZERO);
    assert!(unit.fire(ProjectileKind::NormalShell, ProjectileId(0)).is_none());
}

// ---- Firing ----

#[test]
fn test_fire_spawns_at_muzzle_along_turret() {
    let unit = tank(1, Team::Player, Vec2::new(100.0, 100.0));
    let shot = unit.fire(ProjectileKind::NormalShell, ProjectileId(7)).unwrap();
    assert_eq!(shot.id(), ProjectileId(7));
    assert_eq!(shot.shooter_id(), UnitId(1));
    // Turret 0° fires along +x.
    assert!(approx(shot.position().x, 100.0 + TANK_WIDTH / 2.0 + MUZZLE_OFFSET));
    assert!(approx(shot.position().y, 100.0));
    assert!(approx(shot.velocity().x, BULLET_SPEED));
    assert!(shot.velocity().y.abs() < 1e-9);
}

#[test]
fn test_fire_direction_is_turret_angle_without_offset() {
    let mut unit = tank(1, Team::Player, Vec2::new(100.0, 100.0));
    let target = Vec2::new(400.0, 250.0);
    unit.set_turret_target(target);
    unit.update(10.0);
    let shot = unit.fire(ProjectileKind::NormalShell, ProjectileId(0)).unwrap();

    // Turret angles carry the +90° of the heading convention, shots do not.
    let rad = unit.turret().to_radians();
    let expected = Vec2::new(rad.cos(), rad.sin());
    assert!((shot.velocity().normalize() - expected).length() < 1e-9);
    let heading_space = (target - unit.position()).normalize();
    let rotated = Vec2::new(-heading_space.y, heading_space.x);
    assert!(shot.velocity().normalize().dot(rotated) > 0.9999);

    // Per-axis muzzle offset.
    let offset = shot.position() - unit.position();
    assert!(approx(offset.x, expected.x * (TANK_WIDTH / 2.0 + MUZZLE_OFFSET)));
    assert!(approx(offset.y, expected.y * (TANK_HEIGHT / 2.0 + MUZZLE_OFFSET)));
}

#[test]
fn test_bullet_ammo_overrides_profile() {
    let profile = apply_override(
        projectile_profile(ProjectileKind::RocketShell),
        &ammo_override(AmmoKind::Bullet),
    );
    assert_eq!(profile.penetration, [1.0, 1.0, 1.0]);
    assert_eq!(profile.damage_rate, 1.0);
    assert_eq!(profile.speed_rate, 1.0);
    assert!(!profile.is_explosive);
    // Body geometry is untouched.
    assert_eq!(profile.size, Size::new(12.0, 12.0));
}

#[test]
fn test_high_explosive_ammo_arms_shell() {
    let config = UnitConfig {
        ammunition: vec![AmmoKind::HighExplosive],
        ..UnitConfig::default()
    };
    let unit = Unit::new(UnitId(1), Team::Player, config, Vec2::ZERO);
    let shot = unit.fire(ProjectileKind::NormalShell, ProjectileId(0)).unwrap();
    assert!(shot.is_explosive());
    assert!(shot.profile().explosion_radius > 0.0);
    // Speed is derived after the override.
    assert!(approx(shot.speed(), BULLET_SPEED * 0.9));
}

// ---- Projectile flight and hits ----

#[test]
fn test_heavy_armor_penetration_damage() {
    let mut units = vec![armored_tank(1, Team::Enemy, ArmorType::Heavy, Vec2::new(100.0, 100.0))];
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::new(70.0, 100.0), Vec2::X);
    assert!(!projectile.update(0.02, &mut units, &no_obstacles()));
    assert!(approx(units[0].health(), 92.0));
    assert!(!projectile.is_active());
    assert_eq!(projectile.collided_with(), CollisionKind::Unit);
}

#[test]
fn test_unarmored_takes_base_damage() {
    let projectile = shell(ProjectileKind::NormalShell, Vec2::ZERO, Vec2::X);
    assert!(approx(projectile.damage_against(ArmorType::None), BULLET_DAMAGE));
    assert!(approx(projectile.damage_against(ArmorType::Light), 12.0));
}

#[test]
fn test_friendly_hit_passes_through() {
    let mut units = vec![tank(1, Team::Player, Vec2::new(100.0, 100.0))];
    let mut projectile = shell(ProjectileKind::RocketShell, Vec2::new(70.0, 100.0), Vec2::X);
    assert!(projectile.update(0.025, &mut units, &no_obstacles()));
    assert_eq!(units[0].health(), UNIT_HEALTH);
    assert!(projectile.is_active());
    assert!(!projectile.has_collided());
    assert!(!projectile.has_exploded());
    assert_eq!(projectile.collided_with(), CollisionKind::Friendly);
}

#[test]
fn test_obstacle_stops_plain_shell() {
    let obstacles = vec![Rect::new(100.0, 0.0, 64.0, 200.0)];
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::new(90.0, 100.0), Vec2::X);
    let mut units: Vec<Unit> = Vec::new();
    assert!(!projectile.update(0.02, &mut units, &obstacles));
    assert!(projectile.has_collided());
    assert_eq!(projectile.collided_with(), CollisionKind::Obstacle);
}

#[test]
fn test_obstacle_checked_before_units() {
    let obstacles = vec![Rect::new(95.0, 95.0, 10.0, 10.0)];
    let mut units = vec![tank(1, Team::Enemy, Vec2::new(100.0, 100.0))];
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::new(100.0, 100.0), Vec2::X);
    projectile.update(0.0, &mut units, &obstacles);
    assert_eq!(projectile.collided_with(), CollisionKind::Obstacle);
    assert_eq!(units[0].health(), UNIT_HEALTH);
}

#[test]
fn test_first_unit_in_list_wins() {
    let mut units = vec![
        tank(1, Team::Enemy, Vec2::new(100.0, 100.0)),
        tank(2, Team::Enemy, Vec2::new(100.0, 100.0)),
    ];
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::new(100.0, 100.0), Vec2::X);
    projectile.update(0.0, &mut units, &no_obstacles());
    assert!(units[0].health() < UNIT_HEALTH);
    assert_eq!(units[1].health(), UNIT_HEALTH);
}

#[test]
fn test_lifetime_expires() {
    let mut units: Vec<Unit> = Vec::new();
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::ZERO, Vec2::X);
    assert!(projectile.update(1.0, &mut units, &no_obstacles()));
    assert!(!projectile.update(1.0, &mut units, &no_obstacles()));
    assert_eq!(projectile.phase(), ProjectilePhase::Expired);
    assert!(approx(projectile.distance_traveled(), BULLET_SPEED));
}

#[test]
fn test_explosive_stays_active_through_display_window() {
    let obstacles = vec![Rect::new(190.0, 190.0, 20.0, 20.0)];
    let mut units: Vec<Unit> = Vec::new();
    let mut projectile = shell(ProjectileKind::RocketShell, Vec2::new(200.0, 200.0), Vec2::X);

    assert!(projectile.update(0.0, &mut units, &obstacles));
    assert!(projectile.has_exploded());
    assert_eq!(projectile.phase(), ProjectilePhase::Exploding);
    assert_eq!(projectile.view().explosion_radius, 60.0);

    assert!(projectile.update(0.25, &mut units, &obstacles));
    assert!(!projectile.update(0.25, &mut units, &obstacles));
    assert!(!projectile.is_active());
}

#[test]
fn test_explosion_falloff() {
    let obstacles = vec![Rect::new(190.0, 190.0, 20.0, 20.0)];
    let mut units = vec![
        tank(1, Team::Enemy, Vec2::new(200.0, 200.0)),
        tank(2, Team::Enemy, Vec2::new(230.0, 200.0)),
        tank(3, Team::Enemy, Vec2::new(260.0, 200.0)),
        tank(4, Team::Player, Vec2::new(210.0, 200.0)),
    ];
    let mut projectile = shell(ProjectileKind::RocketShell, Vec2::new(200.0, 200.0), Vec2::X);
    projectile.update(0.0, &mut units, &obstacles);

    let dealt = projectile.apply_explosion_damage(&mut units);
    // Rocket: 10 × 1.5 base damage, 0.8 explosion rate, 60 radius.
    assert_eq!(dealt.len(), 2);
    assert!(approx(dealt[&UnitId(1)], 12.0));
    assert!(approx(dealt[&UnitId(2)], 6.0));
    assert!(approx(units[0].health(), 88.0));
    assert!(approx(units[1].health(), 94.0));
    assert_eq!(units[2].health(), UNIT_HEALTH);
    assert_eq!(units[3].health(), UNIT_HEALTH);
    assert!(!projectile.needs_explosion_damage());
}

#[test]
fn test_unexploded_shell_deals_no_area_damage() {
    let mut units = vec![tank(1, Team::Enemy, Vec2::ZERO)];
    let mut projectile = shell(ProjectileKind::RocketShell, Vec2::ZERO, Vec2::X);
    assert!(projectile.apply_explosion_damage(&mut units).is_empty());
    assert_eq!(units[0].health(), UNIT_HEALTH);
}

#[test]
fn test_move_helpers_update_bounding_box() {
    let mut projectile = shell(ProjectileKind::NormalShell, Vec2::ZERO, Vec2::X);
    projectile.move_to(Vec2::new(50.0, 50.0));
    projectile.move_by(Vec2::new(-10.0, 5.0));
    assert_eq!(projectile.position(), Vec2::new(40.0, 55.0));
    assert_eq!(projectile.bounding_box(), Rect::new(36.0, 51.0, 8.0, 8.0));
    // Velocity is unchanged by teleports.
    assert_eq!(projectile.velocity(), Vec2::new(BULLET_SPEED, 0.0));
}

#[test]
fn test_zero_direction_defaults_to_positive_x() {
    let projectile = shell(ProjectileKind::NormalShell, Vec2::ZERO, Vec2::ZERO);
    assert_eq!(projectile.velocity(), Vec2::new(BULLET_SPEED, 0.0));
}

// ---- Projectile manager ----

#[test]
fn test_manager_applies_explosion_once() {
    let obstacles = vec![Rect::new(190.0, 190.0, 20.0, 20.0)];
    let mut units = vec![tank(1, Team::Enemy, Vec2::new(200.0, 230.0))];
    let mut manager = ProjectileManager::new();
    manager.add(shell(ProjectileKind::RocketShell, Vec2::new(200.0, 200.0), Vec2::X));

    let mut events = Vec::new();
    manager.update(DT, &mut units, &obstacles, &mut events);
    let after_first = units[0].health();
    assert!(after_first < UNIT_HEALTH);
    assert_eq!(manager.active_count(), 1);

    for _ in 0..60 {
        manager.update(DT, &mut units, &obstacles, &mut events);
    }
    assert_eq!(units[0].health(), after_first);
    assert!(manager.is_empty());

    let splashes = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::SplashDamage { .. }))
        .count();
    let explosions = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::Exploded { .. }))
        .count();
    assert_eq!(splashes, 1);
    assert_eq!(explosions, 1);
    assert!(events.contains(&CombatEvent::ProjectileRemoved {
        projectile_id: ProjectileId(0)
    }));
}

#[test]
fn test_manager_removes_spent_shell_and_reports_kill() {
    let mut units = vec![tank(1, Team::Enemy, Vec2::new(100.0, 100.0))];
    units[0].take_damage(95.0);
    let mut manager = ProjectileManager::new();
    manager.add(shell(ProjectileKind::NormalShell, Vec2::new(100.0, 100.0), Vec2::X));

    let mut events = Vec::new();
    manager.update(DT, &mut units, &no_obstacles(), &mut events);

    assert!(manager.is_empty());
    assert!(!units[0].is_alive());
    assert!(events.contains(&CombatEvent::UnitHit {
        projectile_id: ProjectileId(0),
        shooter_id: UnitId(0),
        target_id: UnitId(1),
        damage: BULLET_DAMAGE,
    }));
    assert!(events.contains(&CombatEvent::UnitDestroyed { unit_id: UnitId(1) }));
}

#[test]
fn test_manager_reports_each_kill_once_per_frame() {
    let mut units = vec![
        tank(1, Team::Enemy, Vec2::new(100.0, 100.0)),
        tank(2, Team::Enemy, Vec2::new(300.0, 100.0)),
    ];
    units[0].take_damage(95.0);
    units[1].take_damage(95.0);
    let mut manager = ProjectileManager::new();
    for x in [100.0, 300.0, 500.0] {
        let id = manager.allocate_id();
        let kind = ProjectileKind::NormalShell;
        manager.add(Projectile::new(
            id,
            UnitId(0),
            Team::Player,
            kind,
            projectile_profile(kind),
            Vec2::new(x, 100.0),
            Vec2::X,
        ));
    }

    let mut events = Vec::new();
    manager.update(DT, &mut units, &no_obstacles(), &mut events);

    let destroyed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::UnitDestroyed { unit_id } => Some(*unit_id),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed, vec![UnitId(1), UnitId(2)]);
    assert_eq!(manager.len(), 1);

    events.clear();
    manager.update(DT, &mut units, &no_obstacles(), &mut events);
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitDestroyed { .. })));
}

#[test]
fn test_manager_friendly_reported_once() {
    let mut units = vec![tank(1, Team::Player, Vec2::new(100.0, 100.0))];
    let mut manager = ProjectileManager::new();
    // Slow enough to stay inside the friendly footprint for several frames.
    manager.add(shell(ProjectileKind::NormalShell, Vec2::new(100.0, 100.0), Vec2::X));

    let mut events = Vec::new();
    manager.update(0.001, &mut units, &no_obstacles(), &mut events);
    manager.update(0.001, &mut units, &no_obstacles(), &mut events);
    let passes = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::FriendlyPassThrough { .. }))
        .count();
    assert_eq!(passes, 1);
    assert_eq!(manager.len(), 1);
}

#[test]
fn test_manager_clear_and_ids() {
    let mut manager = ProjectileManager::new();
    let a = manager.allocate_id();
    let b = manager.allocate_id();
    assert_ne!(a, b);
    manager.add(shell(ProjectileKind::NormalShell, Vec2::ZERO, Vec2::X));
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.iter().count(), 1);
    manager.clear();
    assert!(manager.is_empty());
    assert_eq!(manager.active_count(), 0);
}

// ---- Registry ----

#[test]
fn test_registry_lookup_and_duplicates() {
    let mut registry = UnitRegistry::new();
    let id = registry.allocate_id();
    assert!(registry.insert(tank(id.0, Team::Player, Vec2::ZERO)));
    assert!(!registry.insert(tank(id.0, Team::Enemy, Vec2::ZERO)));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(id).map(|u| u.team()), Some(Team::Player));
    assert_ne!(registry.allocate_id(), id);
    assert!(registry.get(UnitId(99)).is_none());
}

// ---- Assets and input ----

#[test]
fn test_image_provider_sizes_unit() {
    let images = StaticImageProvider::new().with_image(
        "assets/tank/body.png",
        ImageInfo {
            width: 32,
            height: 48,
        },
    );
    let mut unit = tank(1, Team::Player, Vec2::new(100.0, 100.0));
    apply_body_image(&mut unit, &images);
    assert_eq!(unit.size(), Size::new(32.0, 48.0));
    assert_eq!(unit.bounding_box(), Rect::new(84.0, 76.0, 32.0, 48.0));

    let mut fallback = tank(2, Team::Player, Vec2::ZERO);
    apply_body_image(&mut fallback, &NullImageProvider);
    assert_eq!(fallback.size(), Size::new(TANK_WIDTH, TANK_HEIGHT));
}

#[test]
fn test_scripted_input_then_idle() {
    let fire = InputSnapshot {
        fire: true,
        ..Default::default()
    };
    let mut input = ScriptedInput::new(vec![fire.clone()]);
    assert_eq!(input.remaining(), 1);
    assert_eq!(input.poll(), fire);
    assert_eq!(input.poll(), InputSnapshot::default());
    assert_eq!(input.remaining(), 0);
}

// ---- Persistence ----

#[test]
fn test_projectile_record_roundtrip() {
    let dir = std::env::temp_dir().join("tankcombat_test_projectile_record");
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("shell.json");

    let original = shell(ProjectileKind::RocketShell, Vec2::new(12.0, 34.0), Vec2::new(0.0, 2.0));
    save_projectile(&original, &path).unwrap();
    let loaded = load_projectile(&path).unwrap();

    assert_eq!(loaded.position(), original.position());
    assert_eq!(loaded.velocity(), original.velocity());
    assert_eq!(loaded.profile(), original.profile());
    assert!(loaded.is_active());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_projectile_record_field_names() {
    let record = shell(ProjectileKind::NormalShell, Vec2::new(1.0, 2.0), Vec2::X).to_record();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["position"]["x"], 1.0);
    assert_eq!(json["velocity_direction"]["x"], 1.0);
    assert_eq!(json["size"]["width"], 8.0);
    assert_eq!(json["bounding_box"]["width"], 8.0);
    assert_eq!(json["penetration"][0], 1.2);
    assert_eq!(json["speed"], BULLET_SPEED);
    assert_eq!(json["velocity"]["x"], BULLET_SPEED);
    assert_eq!(json["has_collided"], false);
}

#[test]
fn test_record_missing_fields_use_defaults() {
    let record: ProjectileRecord = serde_json::from_str(r#"{"id": 5}"#).unwrap();
    assert_eq!(record.id, 5);
    assert_eq!(record.lifetime, BULLET_LIFETIME);
    assert_eq!(record.penetration, vec![1.0, 1.0, 1.0]);
    assert!(record.is_active);

    let unit: UnitRecord = serde_json::from_str(r#"{"team": "Enemy"}"#).unwrap();
    assert_eq!(unit.team, Team::Enemy);
    assert_eq!(unit.health, UNIT_HEALTH);
}

#[test]
fn test_loaders_fail_closed() {
    let dir = std::env::temp_dir().join("tankcombat_test_fail_closed");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    assert!(load_projectile_or_none(&dir.join("missing.json")).is_none());

    let bad = dir.join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    assert!(load_unit_or_none(&bad).is_none());
    assert!(matches!(
        load_unit(&bad),
        Err(tankcombat_core::error::PersistenceError::Json(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unit_record_roundtrip() {
    let dir = std::env::temp_dir().join("tankcombat_test_unit_record");
    let _ = fs::remove_dir_all(&dir);

    let mut unit = armored_tank(4, Team::Enemy, ArmorType::Medium, Vec2::new(300.0, 200.0));
    unit.set_heading(45.0);
    unit.take_damage(25.0);
    let path = save_json_to_dir(&unit.to_record(), &dir, "unit").unwrap();
    assert!(path.ends_with("unit0.json"));

    let loaded = load_unit(&path).unwrap();
    assert_eq!(loaded.id(), UnitId(4));
    assert_eq!(loaded.team(), Team::Enemy);
    assert_eq!(loaded.armor_type(), ArmorType::Medium);
    assert_eq!(loaded.position(), Vec2::new(300.0, 200.0));
    assert!(approx(loaded.heading(), 45.0));
    assert!(approx(loaded.health(), 75.0));

    let _ = fs::remove_dir_all(&dir);
}

// ---- Engine ----

fn open_field_config(enemy_count: usize) -> SimConfig {
    SimConfig {
        seed: 7,
        player_spawn: Vec2::new(640.0, 480.0),
        enemy_count,
        ..SimConfig::default()
    }
}

fn count_fired_by(events: &[CombatEvent], shooter: UnitId) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CombatEvent::ProjectileFired { shooter_id, .. } if *shooter_id == shooter))
        .count()
}

#[test]
fn test_engine_spawns_player_and_enemies() {
    let engine = SimulationEngine::new(SimConfig::default(), border_map(20, 15, DEFAULT_TILE_SIZE));
    assert_eq!(engine.units().len(), 1 + 3);
    assert_eq!(engine.ais().len(), 3);
    let player = engine.player().unwrap();
    assert_eq!(player.team(), Team::Player);
    for unit in engine.units().iter() {
        assert!(!engine.map().check_collision(&unit.bounding_box()));
    }
}

#[test]
fn test_engine_movement_commands() {
    let mut engine = SimulationEngine::new(open_field_config(0), empty_map(20, 15, DEFAULT_TILE_SIZE));
    engine.queue_command(PlayerCommand::SetMovement {
        forward: true,
        backward: false,
    });
    for _ in 0..60 {
        engine.tick(DT);
    }
    let player = engine.player().unwrap();
    assert!(player.position().y < 480.0);
    assert!(player.speed() > 0.0);
}

#[test]
fn test_engine_player_fire_cooldown() {
    let mut engine = SimulationEngine::new(open_field_config(0), empty_map(20, 15, DEFAULT_TILE_SIZE));
    let player_id = engine.player_id();

    engine.queue_command(PlayerCommand::Fire {
        kind: ProjectileKind::NormalShell,
    });
    let first = engine.tick(DT);
    assert_eq!(count_fired_by(&first.events, player_id), 1);
    assert_eq!(first.projectiles.len(), 1);

    engine.queue_command(PlayerCommand::Fire {
        kind: ProjectileKind::NormalShell,
    });
    let second = engine.tick(DT);
    assert_eq!(count_fired_by(&second.events, player_id), 0);

    // Past the cooldown.
    for _ in 0..20 {
        engine.tick(DT);
    }
    engine.queue_command(PlayerCommand::Fire {
        kind: ProjectileKind::NormalShell,
    });
    let third = engine.tick(DT);
    assert_eq!(count_fired_by(&third.events, player_id), 1);
}

#[test]
fn test_engine_clear_projectiles() {
    let mut engine = SimulationEngine::new(open_field_config(0), empty_map(20, 15, DEFAULT_TILE_SIZE));
    engine.queue_command(PlayerCommand::Fire {
        kind: ProjectileKind::RocketShell,
    });
    engine.tick(DT);
    assert_eq!(engine.projectiles().len(), 1);
    engine.queue_command(PlayerCommand::ClearProjectiles);
    let snapshot = engine.tick(DT);
    assert!(snapshot.projectiles.is_empty());
}

#[test]
fn test_engine_ammo_switch_event() {
    let mut engine = SimulationEngine::new(open_field_config(0), empty_map(20, 15, DEFAULT_TILE_SIZE));
    engine.apply_input(&InputSnapshot {
        switch_ammo: Some(AmmoKind::HighExplosive),
        ..Default::default()
    });
    let snapshot = engine.tick(DT);
    assert!(snapshot.events.contains(&CombatEvent::AmmoSwitchStarted {
        unit_id: engine.player_id(),
        ammo: AmmoKind::HighExplosive,
    }));
    assert!(snapshot.units[0].is_switching_ammo);
}

#[test]
fn test_engine_ai_attacks_visible_player() {
    let config = SimConfig {
        enemy_spawn_area: Some(Rect::new(810.0, 450.0, 60.0, 60.0)),
        ..open_field_config(1)
    };
    let mut engine = SimulationEngine::new(config, empty_map(20, 15, DEFAULT_TILE_SIZE));
    let enemy_id = engine.ais()[0].unit_id();
    engine.ais_mut()[0].set_state(AiState::Attack);

    let mut fired = 0;
    for _ in 0..150 {
        let snapshot = engine.tick(DT);
        fired += count_fired_by(&snapshot.events, enemy_id);
    }
    assert!(fired >= 1, "enemy never fired at a visible player");
}

#[test]
fn test_engine_swap_map() {
    let mut engine = SimulationEngine::new(open_field_config(0), border_map(20, 15, DEFAULT_TILE_SIZE));
    assert!(!engine.map().obstacles().is_empty());
    engine.swap_map(empty_map(20, 15, DEFAULT_TILE_SIZE));
    assert!(engine.map().obstacles().is_empty());
}

#[test]
fn test_engine_time_advances() {
    let mut engine = SimulationEngine::new(open_field_config(0), empty_map(10, 10, DEFAULT_TILE_SIZE));
    for _ in 0..3 {
        engine.tick(DT);
    }
    assert_eq!(engine.time().frame, 3);
    assert!(approx(engine.time().elapsed_secs, 3.0 * DT));
}
