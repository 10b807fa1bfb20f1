//! Core types and definitions for the tank combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, enums, tuning records, commands, events, snapshots, and
//! constants. It has no dependency on any rendering or runtime framework.

pub mod angles;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
