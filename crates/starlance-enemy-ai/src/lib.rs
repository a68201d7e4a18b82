//! Enemy AI for STARLANCE.
//!
//! Implements the enemy behavior state machine and the movement, shoot and
//! death-burst pattern functions it dispatches to.

pub mod fsm;
pub mod patterns;

pub use starlance_core as core;

#[cfg(test)]
mod tests;
