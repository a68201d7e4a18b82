//! Game state snapshot returned to the host after each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{DVec2, SimTime};

/// Complete visible state after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Current world time scale (1.0 normal, lower during bullet time).
    pub time_scale: f64,
    pub bullet_time: bool,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub decoys: Vec<DecoyView>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub heading: f64,
    pub velocity: DVec2,
    pub angular_velocity: f64,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
    pub visible: bool,
    pub critical: bool,
    pub size: SizeClass,
    pub autopilot: bool,
    /// Gun charge accumulator in seconds.
    pub charge: f64,
    /// Trigger released and charge still draining.
    pub cooling_down: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    /// hecs entity bits, stable while the entity lives.
    pub id: u64,
    pub position: DVec2,
    pub heading: f64,
    pub health: f64,
    pub mode: EnemyMode,
    pub movement: MovementPattern,
    pub shoot: ShootPattern,
    /// Boss name, if this enemy is a boss.
    pub boss: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub side: Side,
    pub kind: ProjectileKind,
    pub position: DVec2,
    pub heading: f64,
    pub scale: f64,
    /// Guidance phase for missiles.
    pub missile_phase: Option<MissilePhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoyView {
    pub id: u64,
    pub position: DVec2,
    pub health: f64,
}
