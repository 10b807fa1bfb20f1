//! Tank units: kinematics, collision rollback, damage, and ammunition.

use tracing::{debug, info};

use tankcombat_core::angles::{
    angle_towards, facing_vector, normalize_angle, rotate_towards, turret_vector,
};
use tankcombat_core::components::UnitConfig;
use tankcombat_core::constants::*;
use tankcombat_core::enums::{AmmoKind, ArmorType, ProjectileKind, Team, UnitKind, UnitState};
use tankcombat_core::state::UnitInfo;
use tankcombat_core::types::{ProjectileId, Rect, Size, UnitId, Vec2};

use crate::ammo::{ammo_override, apply_override, projectile_profile};
use crate::capability::{Collidable, Damageable};
use crate::persistence::UnitRecord;
use crate::projectile::Projectile;

/// A tank.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    team: Team,
    config: UnitConfig,

    // Derived capability values.
    max_speed: f64,
    max_acceleration: f64,
    min_acceleration: f64,
    max_angular_speed: f64,
    turret_angular_speed: f64,
    max_health: f64,

    size: Size,
    position: Vec2,
    heading: f64,
    turret: f64,
    turret_target: f64,
    speed: f64,
    acceleration: f64,
    angular_speed: f64,
    velocity: Vec2,
    health: f64,
    bounding_box: Rect,

    state: UnitState,
    current_ammo: Option<AmmoKind>,
    pending_ammo: Option<AmmoKind>,
    ammo_switch_remaining: f64,
}

impl Unit {
    /// A unit at rest at `position` with full health, facing up.
    pub fn new(id: UnitId, team: Team, config: UnitConfig, position: Vec2) -> Self {
        let size = config.size;
        Self {
            id,
            team,
            max_speed: (UNIT_SPEED * config.max_speed_rate).max(0.0),
            max_acceleration: UNIT_ACC * config.max_acceleration_rate,
            min_acceleration: UNIT_ACC * config.min_acceleration_rate,
            max_angular_speed: (UNIT_ANGULAR_SPEED * config.max_angular_speed_rate).max(0.0),
            turret_angular_speed: (UNIT_TURRET_ANGULAR_SPEED * config.turret_angular_speed_rate)
                .max(0.0),
            max_health: UNIT_HEALTH * config.max_health_rate,
            size,
            position,
            heading: 0.0,
            turret: 0.0,
            turret_target: 0.0,
            speed: 0.0,
            acceleration: 0.0,
            angular_speed: 0.0,
            velocity: Vec2::ZERO,
            health: UNIT_HEALTH * config.max_health_rate,
            bounding_box: Rect::from_center(position, size),
            state: UnitState::Normal,
            current_ammo: config.ammunition.first().copied(),
            pending_ammo: None,
            ammo_switch_remaining: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn kind(&self) -> UnitKind {
        self.config.kind
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn turret(&self) -> f64 {
        self.turret
    }

    pub fn turret_target(&self) -> f64 {
        self.turret_target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_angular_speed(&self) -> f64 {
        self.max_angular_speed
    }

    pub fn current_ammo(&self) -> Option<AmmoKind> {
        self.current_ammo
    }

    pub fn is_switching_ammo(&self) -> bool {
        self.state == UnitState::SwitchingAmmo
    }

    pub fn ammo_switch_remaining(&self) -> f64 {
        self.ammo_switch_remaining
    }

    /// Set hull heading directly (spawn orientation, loaded records).
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_angle(heading);
    }

    /// Set the raw acceleration command, clamped to the unit's range.
    pub fn set_acceleration(&mut self, acceleration: f64) {
        self.acceleration = acceleration
            .min(self.max_acceleration)
            .max(self.min_acceleration);
    }

    /// Set the raw angular speed command. The magnitude is clamped after
    /// the next heading integration.
    pub fn set_angular_speed(&mut self, angular_speed: f64) {
        self.angular_speed = angular_speed;
    }

    /// Forward accelerates at the maximum, backward at the minimum. Both or
    /// neither coast.
    pub fn set_movement(&mut self, forward: bool, backward: bool) {
        self.acceleration = match (forward, backward) {
            (true, false) => self.max_acceleration,
            (false, true) => self.min_acceleration,
            _ => 0.0,
        };
    }

    /// Left turns counter-clockwise, right clockwise. Both or neither hold.
    pub fn set_turning(&mut self, left: bool, right: bool) {
        self.angular_speed = match (left, right) {
            (true, false) => -self.max_angular_speed,
            (false, true) => self.max_angular_speed,
            _ => 0.0,
        };
    }

    pub fn set_turret_target_angle(&mut self, angle: f64) {
        self.turret_target = normalize_angle(angle);
    }

    /// Aim the turret target at a world point.
    pub fn set_turret_target(&mut self, point: Vec2) {
        self.turret_target = angle_towards(self.position, point);
    }

    /// Advance one frame. Returns whether the unit is still alive.
    pub fn update(&mut self, dt: f64) -> bool {
        if self.state == UnitState::Dead {
            return false;
        }
        if self.health <= 0.0 {
            self.die();
            return false;
        }

        self.advance_ammo_switch(dt);

        self.speed = (self.speed + self.acceleration * dt).clamp(-self.max_speed, self.max_speed);

        self.heading = normalize_angle(self.heading + self.angular_speed * dt);
        self.angular_speed = self
            .angular_speed
            .clamp(-self.max_angular_speed, self.max_angular_speed);

        self.turret = rotate_towards(
            self.turret,
            self.turret_target,
            self.turret_angular_speed * dt,
        );

        self.velocity = facing_vector(self.heading) * self.speed;
        self.position += self.velocity * dt;
        self.bounding_box = Rect::from_center(self.position, self.size);
        true
    }

    /// Update, then roll the position back and stop if the new footprint
    /// overlaps any obstacle. Heading and turret keep their new values.
    ///
    /// Discrete check only: a fast unit can tunnel through a thin obstacle.
    pub fn update_with_collision(&mut self, dt: f64, obstacles: &[Rect]) -> bool {
        let previous = self.position;
        let alive = self.update(dt);
        if obstacles.iter().any(|o| self.bounding_box.intersects(o)) {
            self.position = previous;
            self.bounding_box = Rect::from_center(previous, self.size);
            self.speed = 0.0;
            self.velocity = Vec2::ZERO;
        }
        alive
    }

    /// Fire the selected ammunition from the turret muzzle.
    ///
    /// Refused while switching ammo, with nothing selected, or when dead.
    pub fn fire(&self, kind: ProjectileKind, id: ProjectileId) -> Option<Projectile> {
        if self.state != UnitState::Normal {
            return None;
        }
        let ammo = self.current_ammo?;

        let direction = turret_vector(self.turret);
        let muzzle = Vec2::new(
            direction.x * (self.size.width / 2.0 + MUZZLE_OFFSET),
            direction.y * (self.size.height / 2.0 + MUZZLE_OFFSET),
        );
        let profile = apply_override(projectile_profile(kind), &ammo_override(ammo));
        Some(Projectile::new(
            id,
            self.id,
            self.team,
            kind,
            profile,
            self.position + muzzle,
            direction,
        ))
    }

    /// Begin switching to `ammo`. False if the unit does not carry it.
    /// Already selected is a successful no-op.
    pub fn switch_ammunition(&mut self, ammo: AmmoKind) -> bool {
        if !self.config.ammunition.contains(&ammo) {
            debug!(unit_id = self.id.0, ?ammo, "ammo not carried");
            return false;
        }
        if self.current_ammo == Some(ammo) || self.state == UnitState::Dead {
            return self.current_ammo == Some(ammo);
        }
        self.pending_ammo = Some(ammo);
        self.ammo_switch_remaining = self.config.ammo_switch_time.max(0.0);
        self.state = UnitState::SwitchingAmmo;
        true
    }

    /// Teleport, keeping heading and speed.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.bounding_box = Rect::from_center(position, self.size);
    }

    /// Replace the collision footprint, e.g. with a loaded image's size.
    pub fn set_size(&mut self, size: Size) {
        if size.is_positive() {
            self.size = size;
            self.bounding_box = Rect::from_center(self.position, size);
        }
    }

    pub fn info(&self) -> UnitInfo {
        UnitInfo {
            id: self.id,
            team: self.team,
            kind: self.config.kind,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            max_speed: self.max_speed,
            heading: self.heading,
            turret: self.turret,
            current_ammo: self.current_ammo,
            is_alive: self.is_alive(),
            is_switching_ammo: self.is_switching_ammo(),
            ammo_switch_remaining: self.ammo_switch_remaining,
        }
    }

    pub fn to_record(&self) -> UnitRecord {
        UnitRecord {
            id: self.id.0,
            team: self.team,
            position: self.position.into(),
            size: self.size,
            bounding_box: Some(self.bounding_box),
            direction_angle: self.heading,
            turret_direction_angle: self.turret,
            health: self.health,
            current_ammo: self.current_ammo,
            config: self.config.clone(),
        }
    }

    /// Rebuild a unit from a saved record. Motion starts at rest.
    pub fn from_record(record: &UnitRecord) -> Self {
        let mut unit = Self::new(
            UnitId(record.id),
            record.team,
            record.config.clone(),
            record.position.into(),
        );
        unit.set_size(record.size);
        unit.heading = normalize_angle(record.direction_angle);
        unit.turret = normalize_angle(record.turret_direction_angle);
        unit.turret_target = unit.turret;
        unit.health = record.health.clamp(0.0, unit.max_health);
        if let Some(ammo) = record.current_ammo.filter(|a| unit.config.ammunition.contains(a)) {
            unit.current_ammo = Some(ammo);
        }
        if unit.health <= 0.0 {
            unit.state = UnitState::Dead;
        }
        unit
    }

    fn advance_ammo_switch(&mut self, dt: f64) {
        if self.state != UnitState::SwitchingAmmo {
            return;
        }
        self.ammo_switch_remaining -= dt;
        if self.ammo_switch_remaining <= 0.0 {
            self.ammo_switch_remaining = 0.0;
            if let Some(ammo) = self.pending_ammo.take() {
                self.current_ammo = Some(ammo);
            }
            self.state = UnitState::Normal;
        }
    }

    fn die(&mut self) {
        if self.state != UnitState::Dead {
            self.state = UnitState::Dead;
            self.pending_ammo = None;
            self.ammo_switch_remaining = 0.0;
            info!(unit_id = self.id.0, "unit destroyed");
        }
    }
}

impl Damageable for Unit {
    fn id(&self) -> UnitId {
        self.id
    }

    fn team(&self) -> Team {
        self.team
    }

    fn armor_type(&self) -> ArmorType {
        self.config.armor_type
    }

    fn is_alive(&self) -> bool {
        self.state != UnitState::Dead
    }

    fn take_damage(&mut self, amount: f64) -> f64 {
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.die();
        }
        amount
    }
}

impl Collidable for Unit {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounding_box(&self) -> Rect {
        self.bounding_box
    }
}
