//! Headless runner for the tank combat simulation.
//!
//! Reads settings from the environment, builds the map and engine, and
//! drives a fixed-step loop from an input provider.

pub mod config;
pub mod game_loop;

pub use tankcombat_core as core;
