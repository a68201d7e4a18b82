//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Ship size class. Ordinal index selects scale and handling multipliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn index(self) -> usize {
        match self {
            SizeClass::Small => 0,
            SizeClass::Medium => 1,
            SizeClass::Large => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SizeClass::Small),
            1 => Some(SizeClass::Medium),
            2 => Some(SizeClass::Large),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Small => "Small",
            SizeClass::Medium => "Medium",
            SizeClass::Large => "Large",
        }
    }
}

/// Which side fired a projectile. Used for collision filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    Missile,
}

/// Missile flight phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissilePhase {
    /// Passive post-launch deceleration, no steering.
    #[default]
    Slide,
    /// Seeking the nearest target.
    Homing,
    /// Lifespan elapsed; removed at cleanup.
    Expired,
}

/// Enemy behavior mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMode {
    #[default]
    Roaming,
    Engaging,
    /// Terminal.
    Dead,
}

/// Movement modulation applied to an enemy's base direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPattern {
    #[default]
    Drift,
    ZigZag,
    Orbit,
}

/// Shot layout emitted when an enemy's fire timer elapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShootPattern {
    #[default]
    Regular,
    Wave,
    SlowAndBig,
}

/// Registry category for target queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetCategory {
    Player,
    Enemy,
    Decoy,
}

/// Lifecycle state of a delayed task (decay, respawn, shake).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    #[default]
    Pending,
    Active,
    Cancelled,
    Completed,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    Paused,
}

/// Telemetry counter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TelemetryCounter {
    ShotsFired,
    MissilesFired,
    DamageTaken,
    ShipDestructions,
    Deaths,
    BossSpawned,
    BossDefeated,
    BossDefeatTime,
    DeathsBeforeBossDefeat,
}

impl TelemetryCounter {
    pub fn key(self) -> &'static str {
        match self {
            TelemetryCounter::ShotsFired => "ShotsFired",
            TelemetryCounter::MissilesFired => "MissilesFired",
            TelemetryCounter::DamageTaken => "DamageTaken",
            TelemetryCounter::ShipDestructions => "ShipDestructions",
            TelemetryCounter::Deaths => "Deaths",
            TelemetryCounter::BossSpawned => "BossSpawned",
            TelemetryCounter::BossDefeated => "BossDefeated",
            TelemetryCounter::BossDefeatTime => "BossDefeatTime",
            TelemetryCounter::DeathsBeforeBossDefeat => "DeathsBeforeBossDefeat",
        }
    }
}
