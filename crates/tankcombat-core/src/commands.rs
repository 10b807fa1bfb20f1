//! Player commands and per-frame input snapshots.
//!
//! Commands are queued on the engine and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{AmmoKind, ProjectileKind};
use crate::types::Vec2;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Hull ---
    /// Drive forward, backward, or coast when both or neither are held.
    SetMovement { forward: bool, backward: bool },
    /// Turn left, right, or hold heading when both or neither are held.
    SetTurning { left: bool, right: bool },

    // --- Turret ---
    /// Point the turret target at a world position.
    AimAt { target: Vec2 },

    // --- Weapons ---
    /// Request a shot this frame. Subject to the player fire cooldown.
    Fire { kind: ProjectileKind },
    /// Begin switching to another owned ammunition kind.
    SwitchAmmo { ammo: AmmoKind },

    // --- Simulation control ---
    /// Remove every live projectile.
    ClearProjectiles,
}

/// Snapshot of the input devices for one frame, in world coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Aim point (mouse position plus camera offset).
    pub aim_point: Option<Vec2>,
    pub fire: bool,
    pub switch_ammo: Option<AmmoKind>,
    pub clear_projectiles: bool,
}

impl InputSnapshot {
    /// Expand the snapshot into the commands it implies.
    pub fn to_commands(&self, fire_kind: ProjectileKind) -> Vec<PlayerCommand> {
        let mut commands = vec![
            PlayerCommand::SetMovement {
                forward: self.forward,
                backward: self.backward,
            },
            PlayerCommand::SetTurning {
                left: self.turn_left,
                right: self.turn_right,
            },
        ];
        if let Some(target) = self.aim_point {
            commands.push(PlayerCommand::AimAt { target });
        }
        if let Some(ammo) = self.switch_ammo {
            commands.push(PlayerCommand::SwitchAmmo { ammo });
        }
        if self.fire {
            commands.push(PlayerCommand::Fire { kind: fire_kind });
        }
        if self.clear_projectiles {
            commands.push(PlayerCommand::ClearProjectiles);
        }
        commands
    }
}
