//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side a unit fights for. Projectiles never damage their shooter's team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Player,
    Enemy,
    Neutral,
}

/// Unit armor class. Selects the penetration multiplier applied on hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
}

impl ArmorType {
    /// Index into a projectile's penetration array. `None` has no entry
    /// and always takes a 1.0 multiplier.
    pub fn penetration_index(self) -> Option<usize> {
        match self {
            ArmorType::None => None,
            ArmorType::Light => Some(0),
            ArmorType::Medium => Some(1),
            ArmorType::Heavy => Some(2),
        }
    }
}

/// Map cell kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Open,
    Obstacle,
}

impl CellKind {
    /// Map text symbol for this cell.
    pub fn symbol(self) -> char {
        match self {
            CellKind::Open => 'o',
            CellKind::Obstacle => 'x',
        }
    }

    /// Parse a map text symbol. Unknown symbols return `None`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'o' => Some(CellKind::Open),
            'x' => Some(CellKind::Obstacle),
            _ => None,
        }
    }
}

/// Unit lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    /// Alive with a usable ammo selection.
    #[default]
    Normal,
    /// Alive, changing ammo. Firing is refused until the timer runs out.
    SwitchingAmmo,
    /// Health reached zero. Terminal.
    Dead,
}

/// Chassis kind of a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    #[default]
    Tank,
}

/// Ammunition loaded in a unit. Each kind maps to an override record
/// applied to every projectile fired while it is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoKind {
    /// Plain round: no armor bias, no explosive charge.
    Bullet,
    /// Faster round that favours heavy armor.
    ArmorPiercing,
    /// Slower round with an explosive charge.
    HighExplosive,
}

/// Projectile body launched by `fire`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    NormalShell,
    RocketShell,
}

/// Projectile flight phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    #[default]
    Flying,
    /// Explosion on display. Still active until the window elapses.
    Exploding,
    /// Removed from the live set at the end of the frame.
    Expired,
}

/// What a projectile last collided with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    #[default]
    None,
    Unit,
    Obstacle,
    /// Overlapped a unit of the shooter's team and kept flying.
    Friendly,
}

/// Combat AI behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Attack,
    Retreat,
}
