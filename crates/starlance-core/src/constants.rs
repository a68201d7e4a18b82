//! Simulation constants and tuning defaults.
//!
//! These are the authoritative defaults behind [`crate::tuning::Tuning`].
//! Angles are radians, distances are world units, times are seconds.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

const DEG: f64 = PI / 180.0;

/// Fixed physics tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per fixed tick (undilated).
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Upper bound on fixed ticks a single frame may run before dropping time.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

// --- Player flight ---

pub const PLAYER_MAX_FORWARD_SPEED: f64 = 5.0;
pub const PLAYER_FORWARD_ACCELERATION: f64 = 2.0;
pub const PLAYER_FORWARD_JERK: f64 = 2.0;
/// Speed lost per second while no thrust input is held.
pub const PLAYER_FORWARD_FRICTION: f64 = 1.5;

/// Braking / reversal uses this multiple of both jerk and target acceleration.
pub const DECELERATION_MULTIPLIER: f64 = 2.0;

pub const PLAYER_MAX_TURN_RATE: f64 = PI;
pub const PLAYER_TURN_ACCELERATION: f64 = FRAC_PI_2;
pub const PLAYER_TURN_JERK: f64 = FRAC_PI_2;
pub const PLAYER_TURN_FRICTION: f64 = PI;

/// Angular speed above which an opposite turn input counts as braking.
pub const TURN_BRAKE_THRESHOLD: f64 = 0.1 * DEG;

/// Maneuverability multiplier at zero health.
pub const HEALTH_DAMPING_FLOOR: f64 = 0.3;

// --- Size classes (small, medium, large) ---

pub const SIZE_SCALES: [f64; 3] = [1.0, 2.0, 4.0];
pub const SIZE_SPEED_FACTORS: [f64; 3] = [1.0, 0.5, 0.25];
pub const SIZE_TURN_FACTORS: [f64; 3] = [1.0, 0.5, 0.25];

// --- Player gun ---

/// Seconds of held fire to reach the fastest fire rate.
pub const GUN_BUILD_UP_TIME: f64 = 3.0;
/// Shot interval at zero charge (seconds).
pub const GUN_BASE_MIN_FIRE_RATE: f64 = 0.5;
/// Shot interval at full charge (seconds).
pub const GUN_BASE_MAX_FIRE_RATE: f64 = 0.1;
pub const GUN_FIRE_DECAY_TIME: f64 = 1.5;
pub const GUN_BASE_BULLET_SPEED: f64 = 15.0;
pub const GUN_BASE_BULLET_SIZE: f64 = 1.0;
pub const GUN_BULLET_OFFSET_ANGLE: f64 = 2.0 * DEG;
pub const GUN_MAX_KICK_ANGLE: f64 = 6.0 * DEG;
pub const GUN_MUZZLE_OFFSET: f64 = 0.5;

// --- Missile barrage ---

pub const BARRAGE_MISSILE_COUNT: u32 = 5;
pub const BARRAGE_SPREAD_ANGLE: f64 = 45.0 * DEG;
pub const BARRAGE_JITTER_ANGLE: f64 = 5.0 * DEG;
pub const BARRAGE_LAUNCH_SPEED: f64 = 5.0;
pub const BARRAGE_SPAWN_OFFSET_MIN: f64 = 0.3;
pub const BARRAGE_SPAWN_OFFSET_MAX: f64 = 1.0;

// --- Missile guidance ---

pub const MISSILE_JERK: f64 = 40.0;
pub const MISSILE_ACCELERATION: f64 = 15.0;
pub const MISSILE_MAX_SPEED: f64 = 120.0;
pub const MISSILE_TURN_SPEED: f64 = TAU;
pub const MISSILE_LIFESPAN: f64 = 12.0;
/// Turn-rate multiplier once heading error exceeds 90 degrees.
pub const MISSILE_BANANA_TURN_MULTIPLIER: f64 = 3.0;
pub const MISSILE_SLIDE_TIME: f64 = 1.0;
pub const MISSILE_SLIDE_DECELERATION: f64 = 2.0;
/// Distance floor for the inverse-distance turn boost.
pub const MISSILE_MIN_TURN_DISTANCE: f64 = 0.1;
pub const MISSILE_OVERSHOOT_ANGLE: f64 = FRAC_PI_2;

// --- Enemy ships ---

pub const ENEMY_SPEED: f64 = 3.0;
pub const ENEMY_HEALTH: f64 = 10.0;
pub const ENEMY_DETECTION_RANGE: f64 = 50.0;
pub const ENEMY_FIRE_COOLDOWN: f64 = 0.25;
pub const ENEMY_ZIGZAG_AMPLITUDE: f64 = 1.0;
pub const ENEMY_ZIGZAG_FREQUENCY: f64 = 2.0;
pub const ENEMY_ORBIT_SPEED: f64 = FRAC_PI_2;
/// Distance from the rally point at which roaming enemies start circling.
pub const ENEMY_RALLY_THRESHOLD: f64 = 1.5;
pub const ENEMY_RADIUS: f64 = 0.5;

// --- Enemy bullets ---

pub const ENEMY_BULLET_SPEED: f64 = 6.0;
pub const ENEMY_BULLET_ZIGZAG_AMPLITUDE: f64 = 1.0;
pub const ENEMY_BULLET_ZIGZAG_FREQUENCY: f64 = 6.0;
pub const ENEMY_BULLET_ORBIT_RADIUS: f64 = 1.0;
pub const ENEMY_BULLET_ORBIT_SPEED: f64 = PI;
pub const ENEMY_BULLET_LIFESPAN: f64 = 5.0;
pub const ENEMY_BULLET_DAMAGE_MIN: u32 = 3;
/// Exclusive upper bound.
pub const ENEMY_BULLET_DAMAGE_MAX: u32 = 5;
pub const WAVE_SPREAD_ANGLE: f64 = 15.0 * DEG;
pub const SLOW_AND_BIG_SCALE: f64 = 3.0;
pub const SLOW_AND_BIG_SPEED_FACTOR: f64 = 0.3;

// --- Death burst ---

pub const DEATH_BURST_COUNT: u32 = 16;

// --- Health ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_REGEN_PER_TICK: f64 = 0.01;
pub const PLAYER_IFRAME_TICKS: u32 = 25;
pub const BOSS_IFRAME_TICKS: u32 = 10;
/// Health fraction at or below which the critical flag is raised.
pub const CRITICAL_HEALTH_FRACTION: f64 = 0.25;
pub const BULLET_TIME_SCALE: f64 = 0.3;
pub const PLAYER_RESPAWN_DELAY: f64 = 3.0;
pub const PLAYER_RADIUS: f64 = 0.5;
pub const PROJECTILE_DAMAGE: f64 = 1.0;

// --- Presentation requests ---

pub const STATUS_MESSAGE_DURATION: f64 = 2.0;
pub const PLAYER_DEATH_SHAKE: (f64, f64, f64) = (0.5, 0.4, 0.4);
pub const ENEMY_DEATH_SHAKE: (f64, f64, f64) = (0.25, 0.15, 0.15);

// --- Decoy targets ---

pub const PLAY_BOUNDS: (f64, f64) = (2000.0, 2000.0);
pub const DECOY_SPAWN_INTERVAL: f64 = 1.0;
pub const DECOY_MAX_ALIVE: usize = 40;
pub const DECOY_HEALTH: f64 = 3.0;
pub const DECOY_KNOCKBACK: f64 = 5.0;
pub const DECOY_RADIUS: f64 = 0.5;
pub const DECOY_CONTACT_DAMAGE: f64 = 10.0;

// --- Projectile templates ---

pub const PLAYER_BULLET_LIFESPAN: f64 = 3.0;
pub const PLAYER_BULLET_RADIUS: f64 = 0.1;
pub const MISSILE_RADIUS: f64 = 0.2;
pub const ENEMY_BULLET_RADIUS: f64 = 0.15;

// --- Autopilot & telemetry ---

pub const AUTOPILOT_BARRAGE_MIN_INTERVAL: f64 = 5.0;
pub const AUTOPILOT_BARRAGE_MAX_INTERVAL: f64 = 10.0;
pub const TELEMETRY_SAMPLE_INTERVAL: f64 = 1.0;

// --- Bosses ---

pub const BOSS_HEALTH: f64 = 60.0;
pub const BOSS_RADIUS: f64 = 1.5;
