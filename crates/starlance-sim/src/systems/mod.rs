//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for reads).
//! Cross-system state lives in components or is passed in by the engine.

pub mod autopilot;
pub mod barrage;
pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod decoys;
pub mod enemy_ai;
pub mod health;
pub mod movement;
pub mod player_flight;
pub mod player_gun;
pub mod projectiles;
pub mod snapshot;
