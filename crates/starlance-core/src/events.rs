//! Events and presentation requests emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::SizeClass;
use crate::types::DVec2;

/// Feedback events for presentation hosts (audio, particles, UI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Player gun fired one bullet.
    ShotFired { position: DVec2, heading: f64 },
    /// A missile barrage left the launcher.
    MissileBarrage { count: u32 },
    /// Explosion effect request.
    Explosion { position: DVec2, scale: f64 },
    /// Player ship should be hidden until respawn.
    PlayerHidden,
    PlayerRespawned { position: DVec2 },
    EnemyDestroyed { position: DVec2, boss: bool },
    DecoyDestroyed { position: DVec2 },
    SizeChanged { size: SizeClass },
    BossSpawned { name: String },
    /// Bullet time engaged or released.
    BulletTime { active: bool },
    AutopilotChanged { enabled: bool },
    TelemetrySaved,
}

/// Transient on-screen text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub duration_secs: f64,
}

/// Camera shake parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeRequest {
    pub duration: f64,
    pub intensity_x: f64,
    pub intensity_y: f64,
}

impl ShakeRequest {
    pub fn from_tuple((duration, intensity_x, intensity_y): (f64, f64, f64)) -> Self {
        Self {
            duration,
            intensity_x,
            intensity_y,
        }
    }
}
