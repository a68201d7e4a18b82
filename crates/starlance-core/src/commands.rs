//! Player input delivered to the simulation.
//!
//! Continuous axes are sampled every frame through [`ControlInput`]; discrete
//! actions are queued as [`PlayerCommand`]s and processed at the next frame
//! boundary.

use serde::{Deserialize, Serialize};

use crate::enums::SizeClass;

/// Discrete player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Scene control ---
    /// Spawn the player and the enemy roster and begin simulating.
    StartScene,
    Pause,
    Resume,

    // --- Combat ---
    /// Launch one missile barrage.
    FireMissiles,
    /// Switch ship size (keys 1/2/3). Resets flight state to rest.
    SelectSize { size: SizeClass },
    ToggleAutopilot,
    /// Summon a boss from the configured roster.
    SpawnBoss { index: usize },

    // --- Telemetry ---
    /// Hand the telemetry record to the store and clear it.
    SaveTelemetry,
}

/// Continuous control axes for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Forward/back axis in [-1, 1].
    pub thrust: f64,
    /// Turn axis in [-1, 1], positive turns clockwise.
    pub turn: f64,
    /// Fire button held.
    pub fire: bool,
}

impl ControlInput {
    /// Axes clamped to [-1, 1].
    pub fn clamped(self) -> Self {
        Self {
            thrust: self.thrust.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
            fire: self.fire,
        }
    }
}
