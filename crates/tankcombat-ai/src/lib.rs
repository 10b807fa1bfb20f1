//! Combat AI for enemy tanks.
//!
//! A per-unit finite-state controller (patrol, attack, retreat) that reads
//! unit and target state and produces movement, turret, and fire intents.
//! Randomness is always injected by the caller.

pub mod fsm;
pub mod patrol;
pub mod weighted;

pub use fsm::{AiContext, AiIntent, AiUpdate, CombatAi, TargetInfo};
pub use tankcombat_core as core;
