//! Capability interfaces shared by every entity kind a projectile can hit.

use tankcombat_core::enums::{ArmorType, Team};
use tankcombat_core::types::{Rect, UnitId, Vec2};

/// Something that can be hit and hurt.
pub trait Damageable {
    fn id(&self) -> UnitId;
    fn team(&self) -> Team;
    fn armor_type(&self) -> ArmorType;
    fn is_alive(&self) -> bool;

    /// Subtract `amount` from health and return the amount requested,
    /// including any overkill.
    fn take_damage(&mut self, amount: f64) -> f64;
}

/// Something with a position and an axis-aligned footprint.
pub trait Collidable {
    fn position(&self) -> Vec2;
    fn bounding_box(&self) -> Rect;
}
