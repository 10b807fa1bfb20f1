//! Simulation core for the tank combat game.
//!
//! Owns units, projectiles, and AI controllers, steps them in a fixed
//! frame order, and produces `FrameSnapshot`s. Completely headless:
//! images and input come in through collaborator traits.

pub mod ammo;
pub mod assets;
pub mod capability;
pub mod engine;
pub mod input;
pub mod manager;
pub mod persistence;
pub mod projectile;
pub mod registry;
pub mod unit;
pub mod world_setup;

pub use capability::{Collidable, Damageable};
pub use engine::{SimConfig, SimulationEngine};
pub use manager::ProjectileManager;
pub use projectile::Projectile;
pub use tankcombat_core as core;
pub use unit::Unit;

#[cfg(test)]
mod tests;
