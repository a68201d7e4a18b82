//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::DVec2;

/// Marks the player-controlled ship.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerShip {
    pub size: SizeClass,
    /// Whether presentation should draw the ship (false while awaiting respawn).
    pub visible: bool,
}

/// Jerk-limited controller state for linear and angular motion.
///
/// `speed` is signed forward speed along the heading; `turn_rate` is the
/// controller's angular velocity (positive = clockwise, matching turn input).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub speed: f64,
    pub acceleration: f64,
    pub turn_rate: f64,
    pub turn_acceleration: f64,
}

/// Hit points, alive flag and invulnerability countdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    /// Ticks remaining during which incoming damage is ignored.
    pub invulnerable_ticks: u32,
    /// Countdown restarted after every applied hit. Zero disables i-frames.
    ///
    /// The window includes the tick the hit landed on: a hit on tick `t`
    /// blocks ticks `t + 1 ..= t + iframe_ticks - 1` and the next hit can land
    /// on tick `t + iframe_ticks`.
    pub iframe_ticks: u32,
    pub alive: bool,
}

/// Passive per-tick health recovery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Regeneration {
    pub per_tick: f64,
}

/// Marks an enemy ship (plain or boss).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Per-enemy behavior state consumed by the enemy FSM.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyBehavior {
    pub mode: EnemyMode,
    pub movement: MovementPattern,
    pub shoot: ShootPattern,
    /// World seconds accumulated toward the next shot.
    pub fire_timer: f64,
    /// Random phase offset for the zigzag sine.
    pub zigzag_phase: f64,
    /// Accumulator for the Orbit movement pattern.
    pub orbit_angle: f64,
    /// Accumulator for circling the rally point while roaming.
    pub roam_angle: f64,
    /// World seconds since spawn; drives the zigzag sine.
    pub age_secs: f64,
}

/// Boss metadata. Bosses are also `Enemy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub name: String,
    /// Real time at spawn, for time-to-defeat telemetry.
    pub spawned_at_secs: f64,
}

/// Marks a decorative target (missile bait, knockback-able).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Decoy;

/// Bullet or missile state shared by both sides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub side: Side,
    pub kind: ProjectileKind,
    /// Seconds until forced removal.
    pub lifespan_secs: f64,
    pub damage: f64,
    /// Visual scale relative to the template.
    pub scale: f64,
}

/// Circle collider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Pattern-driven flight for enemy bullets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatternedFlight {
    pub pattern: MovementPattern,
    pub forward: DVec2,
    pub right: DVec2,
    pub speed: f64,
    pub age_secs: f64,
    pub orbit_angle: f64,
    pub zigzag_phase: f64,
}

/// Entity integrates its motion on real time, ignoring bullet time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeExempt;
