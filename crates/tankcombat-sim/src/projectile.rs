//! Projectile ballistics, hit resolution, and explosion damage.
//!
//! A projectile flies in a straight line at a speed fixed at spawn. Each
//! frame it tests obstacles first, then living units, in list order; the
//! first overlap wins. Non-explosive shells stop on their first hit.
//! Explosive shells detonate and stay live for a short display window.

use std::collections::BTreeMap;

use tankcombat_core::components::ProjectileProfile;
use tankcombat_core::constants::{BULLET_DAMAGE, BULLET_SPEED, EXPLOSION_DISPLAY_SECS};
use tankcombat_core::enums::{ArmorType, CollisionKind, ProjectileKind, ProjectilePhase, Team};
use tankcombat_core::state::ProjectileView;
use tankcombat_core::types::{ProjectileId, Rect, UnitId, Vec2};

use crate::capability::{Collidable, Damageable};
use crate::persistence::{ProjectileRecord, XyRecord};

/// What a projectile struck during its last update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    Obstacle { position: Vec2 },
    Unit { target_id: UnitId, damage: f64 },
    Friendly { unit_id: UnitId },
}

/// A live shell.
#[derive(Debug, Clone)]
pub struct Projectile {
    id: ProjectileId,
    shooter_id: UnitId,
    shooter_team: Team,
    kind: ProjectileKind,
    profile: ProjectileProfile,
    speed: f64,
    base_damage: f64,
    position: Vec2,
    direction: Vec2,
    /// Fixed at spawn.
    velocity: Vec2,
    bounding_box: Rect,
    lifetime_remaining: f64,
    distance_traveled: f64,
    is_active: bool,
    has_collided: bool,
    has_exploded: bool,
    explosion_timer: f64,
    explosion_center: Option<Vec2>,
    explosion_applied: bool,
    collided_with: CollisionKind,
    last_friendly: Option<UnitId>,
    impact: Option<Impact>,
}

impl Projectile {
    /// Spawn a projectile. A zero `direction` flies along +x.
    pub fn new(
        id: ProjectileId,
        shooter_id: UnitId,
        shooter_team: Team,
        kind: ProjectileKind,
        profile: ProjectileProfile,
        position: Vec2,
        direction: Vec2,
    ) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        let speed = BULLET_SPEED * profile.speed_rate;
        let base_damage = BULLET_DAMAGE * profile.damage_rate;
        Self {
            id,
            shooter_id,
            shooter_team,
            kind,
            speed,
            base_damage,
            position,
            direction,
            velocity: direction * speed,
            bounding_box: Rect::from_center(position, profile.size),
            lifetime_remaining: profile.lifetime,
            distance_traveled: 0.0,
            is_active: true,
            has_collided: false,
            has_exploded: false,
            explosion_timer: 0.0,
            explosion_center: None,
            explosion_applied: false,
            collided_with: CollisionKind::None,
            last_friendly: None,
            impact: None,
            profile,
        }
    }

    pub fn id(&self) -> ProjectileId {
        self.id
    }

    pub fn shooter_id(&self) -> UnitId {
        self.shooter_id
    }

    pub fn shooter_team(&self) -> Team {
        self.shooter_team
    }

    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub fn profile(&self) -> &ProjectileProfile {
        &self.profile
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn base_damage(&self) -> f64 {
        self.base_damage
    }

    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    pub fn lifetime_remaining(&self) -> f64 {
        self.lifetime_remaining
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn has_collided(&self) -> bool {
        self.has_collided
    }

    pub fn has_exploded(&self) -> bool {
        self.has_exploded
    }

    pub fn is_explosive(&self) -> bool {
        self.profile.is_explosive
    }

    pub fn collided_with(&self) -> CollisionKind {
        self.collided_with
    }

    pub fn explosion_center(&self) -> Option<Vec2> {
        self.explosion_center
    }

    pub fn phase(&self) -> ProjectilePhase {
        if !self.is_active {
            ProjectilePhase::Expired
        } else if self.has_exploded {
            ProjectilePhase::Exploding
        } else {
            ProjectilePhase::Flying
        }
    }

    /// Exploded, explosive, and area damage not yet dealt.
    pub fn needs_explosion_damage(&self) -> bool {
        self.has_exploded && self.profile.is_explosive && !self.explosion_applied
    }

    /// Impact recorded by the last update, if any. Clears it.
    pub fn take_impact(&mut self) -> Option<Impact> {
        self.impact.take()
    }

    /// Direct-hit damage against `armor`. Unarmored targets take base damage.
    pub fn damage_against(&self, armor: ArmorType) -> f64 {
        let multiplier = armor
            .penetration_index()
            .map_or(1.0, |i| self.profile.penetration[i]);
        self.base_damage * multiplier
    }

    /// Advance one frame. Returns whether the projectile is still active.
    pub fn update<U>(&mut self, dt: f64, units: &mut [U], obstacles: &[Rect]) -> bool
    where
        U: Damageable + Collidable,
    {
        if !self.is_active {
            return false;
        }

        if self.has_exploded {
            self.explosion_timer += dt;
            if self.explosion_timer >= EXPLOSION_DISPLAY_SECS {
                self.is_active = false;
                return false;
            }
            return true;
        }

        self.lifetime_remaining -= dt;
        if self.lifetime_remaining <= 0.0 {
            self.is_active = false;
            return false;
        }

        let step = self.velocity * dt;
        self.position += step;
        self.distance_traveled += step.length();
        self.bounding_box = Rect::from_center(self.position, self.profile.size);

        if obstacles.iter().any(|o| self.bounding_box.intersects(o)) {
            self.has_collided = true;
            self.collided_with = CollisionKind::Obstacle;
            self.impact = Some(Impact::Obstacle {
                position: self.position,
            });
            return self.detonate_or_stop();
        }

        let bbox = self.bounding_box;
        let Some(target) = units
            .iter_mut()
            .find(|u| u.is_alive() && bbox.intersects(&u.bounding_box()))
        else {
            self.last_friendly = None;
            return true;
        };

        if target.team() == self.shooter_team {
            // Friendly overlap: keep flying, report once per unit.
            self.collided_with = CollisionKind::Friendly;
            let unit_id = target.id();
            if self.last_friendly != Some(unit_id) {
                self.impact = Some(Impact::Friendly { unit_id });
            }
            self.last_friendly = Some(unit_id);
            return true;
        }

        let damage = self.damage_against(target.armor_type());
        let applied = target.take_damage(damage);
        self.has_collided = true;
        self.collided_with = CollisionKind::Unit;
        self.impact = Some(Impact::Unit {
            target_id: target.id(),
            damage: applied,
        });
        self.detonate_or_stop()
    }

    /// Deal linear-falloff area damage to every living non-friendly unit
    /// inside the blast radius. Marks the explosion as applied.
    ///
    /// A unit exactly on the radius takes nothing.
    pub fn apply_explosion_damage<U>(&mut self, units: &mut [U]) -> BTreeMap<UnitId, f64>
    where
        U: Damageable + Collidable,
    {
        let mut dealt = BTreeMap::new();
        if !self.has_exploded || !self.profile.is_explosive {
            return dealt;
        }
        self.explosion_applied = true;

        let radius = self.profile.explosion_radius;
        if radius <= 0.0 {
            return dealt;
        }
        let center = self.explosion_center.unwrap_or(self.position);
        let peak = self.base_damage * self.profile.explosion_damage_rate;

        for unit in units.iter_mut() {
            if !unit.is_alive() || unit.team() == self.shooter_team {
                continue;
            }
            let distance = center.distance(unit.position());
            if distance >= radius {
                continue;
            }
            let damage = peak * (1.0 - distance / radius);
            dealt.insert(unit.id(), unit.take_damage(damage));
        }
        dealt
    }

    /// Teleport, keeping velocity.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.bounding_box = Rect::from_center(position, self.profile.size);
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.move_to(self.position + delta);
    }

    pub fn view(&self) -> ProjectileView {
        ProjectileView {
            id: self.id,
            shooter_id: self.shooter_id,
            position: self.position,
            bounding_box: self.bounding_box,
            phase: self.phase(),
            explosion_radius: if self.has_exploded {
                self.profile.explosion_radius
            } else {
                0.0
            },
        }
    }

    /// Serializable record including the derived speed, damage, and velocity.
    pub fn to_record(&self) -> ProjectileRecord {
        ProjectileRecord {
            id: self.id.0,
            shooter_id: self.shooter_id.0,
            shooter_team: self.shooter_team,
            kind: self.kind,
            image_path: self.profile.image_path.clone(),
            position: self.position.into(),
            velocity_direction: self.direction.into(),
            size: self.profile.size,
            bounding_box: Some(self.bounding_box),
            lifetime: self.lifetime_remaining,
            speed_rate: self.profile.speed_rate,
            damage_rate: self.profile.damage_rate,
            penetration: self.profile.penetration.to_vec(),
            is_explosive: self.profile.is_explosive,
            explosion_radius: self.profile.explosion_radius,
            explosion_damage_rate: self.profile.explosion_damage_rate,
            explosion_image_path: self.profile.explosion_image_path.clone(),
            is_active: self.is_active,
            has_collided: self.has_collided,
            speed: Some(self.speed),
            damage: Some(self.base_damage),
            velocity: Some(XyRecord::from(self.velocity)),
        }
    }

    /// Rebuild a projectile from a saved record. Flight restarts from the
    /// recorded position with the recorded remaining lifetime.
    pub fn from_record(record: &ProjectileRecord) -> Self {
        let mut penetration = [1.0; 3];
        for (slot, value) in penetration.iter_mut().zip(&record.penetration) {
            *slot = *value;
        }
        let profile = ProjectileProfile {
            size: record.size,
            lifetime: record.lifetime,
            speed_rate: record.speed_rate,
            damage_rate: record.damage_rate,
            penetration,
            is_explosive: record.is_explosive,
            explosion_radius: record.explosion_radius,
            explosion_damage_rate: record.explosion_damage_rate,
            image_path: record.image_path.clone(),
            explosion_image_path: record.explosion_image_path.clone(),
        };
        let mut projectile = Self::new(
            ProjectileId(record.id),
            UnitId(record.shooter_id),
            record.shooter_team,
            record.kind,
            profile,
            record.position.into(),
            record.velocity_direction.into(),
        );
        projectile.is_active = record.is_active;
        projectile.has_collided = record.has_collided;
        projectile
    }

    fn detonate_or_stop(&mut self) -> bool {
        if self.profile.is_explosive {
            self.has_exploded = true;
            self.explosion_timer = 0.0;
            self.explosion_center = Some(self.position);
            true
        } else {
            self.is_active = false;
            false
        }
    }
}
