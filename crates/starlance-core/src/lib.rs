//! Core types and definitions for the STARLANCE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, tuning, state snapshots, events, and constants.
//! It has no dependency on the ECS or any host framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod tuning;
pub mod types;

pub use error::{Result, SimError};

#[cfg(test)]
mod tests;
