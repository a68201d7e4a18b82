//! Simulation engine for STARLANCE.
//!
//! Owns the hecs ECS world, runs systems on a fixed tick under a variable
//! frame clock, and produces GameStateSnapshots for the host.

pub mod controller;
pub mod engine;
pub mod guidance;
pub mod registry;
pub mod services;
pub mod systems;
pub mod telemetry;
pub mod timers;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starlance_core as core;
