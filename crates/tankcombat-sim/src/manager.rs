//! Owns the live projectile set and drives it each frame.

use tracing::debug;

use tankcombat_core::events::CombatEvent;
use tankcombat_core::types::{ProjectileId, Rect};

use crate::capability::{Collidable, Damageable};
use crate::projectile::{Impact, Projectile};

#[derive(Debug, Clone, Default)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    next_id: u64,
    remove_buffer: Vec<ProjectileId>,
    // Unit liveness as of the last projectile that dealt damage.
    alive_buffer: Vec<bool>,
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for a projectile about to be fired.
    pub fn allocate_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add(&mut self, projectile: Projectile) {
        debug!(
            projectile_id = projectile.id().0,
            shooter_id = projectile.shooter_id().0,
            x = projectile.position().x,
            y = projectile.position().y,
            "projectile added"
        );
        self.next_id = self.next_id.max(projectile.id().0 + 1);
        self.projectiles.push(projectile);
    }

    /// Update every projectile, apply each explosion's area damage once,
    /// then drop the inactive ones. Emitted events are appended to `events`.
    pub fn update<U>(
        &mut self,
        dt: f64,
        units: &mut [U],
        obstacles: &[Rect],
        events: &mut Vec<CombatEvent>,
    ) where
        U: Damageable + Collidable,
    {
        self.remove_buffer.clear();
        self.alive_buffer.clear();
        self.alive_buffer.extend(units.iter().map(|u| u.is_alive()));

        for projectile in &mut self.projectiles {
            let was_exploded = projectile.has_exploded();

            if !projectile.update(dt, units, obstacles) {
                self.remove_buffer.push(projectile.id());
            }
            let mut dealt_damage = push_impact_event(projectile, events);

            if !was_exploded && projectile.has_exploded() {
                if let Some(position) = projectile.explosion_center() {
                    events.push(CombatEvent::Exploded {
                        projectile_id: projectile.id(),
                        position,
                        radius: projectile.profile().explosion_radius,
                    });
                }
            }

            if projectile.needs_explosion_damage() {
                for (target_id, damage) in projectile.apply_explosion_damage(units) {
                    dealt_damage = true;
                    events.push(CombatEvent::SplashDamage {
                        projectile_id: projectile.id(),
                        target_id,
                        damage,
                    });
                }
            }

            if dealt_damage {
                for (unit, was_alive) in units.iter().zip(self.alive_buffer.iter_mut()) {
                    if *was_alive && !unit.is_alive() {
                        *was_alive = false;
                        events.push(CombatEvent::UnitDestroyed { unit_id: unit.id() });
                    }
                }
            }
        }

        if self.remove_buffer.is_empty() {
            return;
        }
        let removed = &self.remove_buffer;
        self.projectiles.retain(|p| !removed.contains(&p.id()));
        for &projectile_id in removed {
            debug!(projectile_id = projectile_id.0, "projectile removed");
            events.push(CombatEvent::ProjectileRemoved { projectile_id });
        }
    }

    /// Drop every projectile.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Projectiles still flying or exploding.
    pub fn active_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id() == id)
    }

    /// Live projectiles in spawn order, for renderers.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }
}

/// Returns true if the impact damaged a unit.
fn push_impact_event(projectile: &mut Projectile, events: &mut Vec<CombatEvent>) -> bool {
    let projectile_id = projectile.id();
    match projectile.take_impact() {
        Some(Impact::Obstacle { position }) => {
            events.push(CombatEvent::ObstacleHit {
                projectile_id,
                position,
            });
        }
        Some(Impact::Unit { target_id, damage }) => {
            debug!(projectile_id = projectile_id.0, target_id = target_id.0, damage, "unit hit");
            events.push(CombatEvent::UnitHit {
                projectile_id,
                shooter_id: projectile.shooter_id(),
                target_id,
                damage,
            });
            return true;
        }
        Some(Impact::Friendly { unit_id }) => {
            events.push(CombatEvent::FriendlyPassThrough {
                projectile_id,
                unit_id,
            });
        }
        None => {}
    }
    false
}
