//! Runtime tuning loaded from JSON.
//!
//! [`Tuning`] mirrors every default in [`crate::constants`]. Hosts may load a
//! partial JSON document with [`Tuning::from_json`]; missing keys fall back to
//! the compile-time defaults, so a file can override just the values it cares
//! about. Call [`Tuning::validate`] before handing the tuning to the engine.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{MovementPattern, ShootPattern, SizeClass};
use crate::error::{Result, SimError};
use crate::events::ShakeRequest;
use crate::types::DVec2;

/// Complete gameplay tuning, grouped by subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub flight: FlightTuning,
    pub sizes: SizeTuning,
    pub gun: GunTuning,
    pub missile: MissileTuning,
    pub enemy: EnemyTuning,
    pub health: HealthTuning,
    pub world: WorldTuning,
    pub templates: ProjectileTemplates,
    pub bosses: Vec<BossEntry>,
    pub autopilot: AutopilotTuning,
}

/// Player jerk-limited controller parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub max_forward_speed: f64,
    pub forward_acceleration: f64,
    pub forward_jerk: f64,
    pub forward_friction: f64,
    pub deceleration_multiplier: f64,
    pub max_turn_rate: f64,
    pub turn_acceleration: f64,
    pub turn_jerk: f64,
    pub turn_friction: f64,
    pub turn_brake_threshold: f64,
    pub health_damping_floor: f64,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            max_forward_speed: PLAYER_MAX_FORWARD_SPEED,
            forward_acceleration: PLAYER_FORWARD_ACCELERATION,
            forward_jerk: PLAYER_FORWARD_JERK,
            forward_friction: PLAYER_FORWARD_FRICTION,
            deceleration_multiplier: DECELERATION_MULTIPLIER,
            max_turn_rate: PLAYER_MAX_TURN_RATE,
            turn_acceleration: PLAYER_TURN_ACCELERATION,
            turn_jerk: PLAYER_TURN_JERK,
            turn_friction: PLAYER_TURN_FRICTION,
            turn_brake_threshold: TURN_BRAKE_THRESHOLD,
            health_damping_floor: HEALTH_DAMPING_FLOOR,
        }
    }
}

/// Per-size multipliers, indexed by [`SizeClass::index`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeTuning {
    pub scales: [f64; 3],
    pub speed_factors: [f64; 3],
    pub turn_factors: [f64; 3],
}

impl Default for SizeTuning {
    fn default() -> Self {
        Self {
            scales: SIZE_SCALES,
            speed_factors: SIZE_SPEED_FACTORS,
            turn_factors: SIZE_TURN_FACTORS,
        }
    }
}

impl SizeTuning {
    pub fn scale(&self, size: SizeClass) -> f64 {
        self.scales[size.index()]
    }

    pub fn speed_factor(&self, size: SizeClass) -> f64 {
        self.speed_factors[size.index()]
    }

    pub fn turn_factor(&self, size: SizeClass) -> f64 {
        self.turn_factors[size.index()]
    }
}

/// Player gun and missile barrage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GunTuning {
    pub build_up_time: f64,
    pub base_min_fire_rate: f64,
    pub base_max_fire_rate: f64,
    pub fire_decay_time: f64,
    pub base_bullet_speed: f64,
    pub base_bullet_size: f64,
    pub bullet_offset_angle: f64,
    pub max_kick_angle: f64,
    pub muzzle_offset: f64,
    pub missile_count: u32,
    pub missile_spread_angle: f64,
    pub missile_jitter_angle: f64,
    pub missile_launch_speed: f64,
    pub missile_spawn_offset_min: f64,
    pub missile_spawn_offset_max: f64,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            build_up_time: GUN_BUILD_UP_TIME,
            base_min_fire_rate: GUN_BASE_MIN_FIRE_RATE,
            base_max_fire_rate: GUN_BASE_MAX_FIRE_RATE,
            fire_decay_time: GUN_FIRE_DECAY_TIME,
            base_bullet_speed: GUN_BASE_BULLET_SPEED,
            base_bullet_size: GUN_BASE_BULLET_SIZE,
            bullet_offset_angle: GUN_BULLET_OFFSET_ANGLE,
            max_kick_angle: GUN_MAX_KICK_ANGLE,
            muzzle_offset: GUN_MUZZLE_OFFSET,
            missile_count: BARRAGE_MISSILE_COUNT,
            missile_spread_angle: BARRAGE_SPREAD_ANGLE,
            missile_jitter_angle: BARRAGE_JITTER_ANGLE,
            missile_launch_speed: BARRAGE_LAUNCH_SPEED,
            missile_spawn_offset_min: BARRAGE_SPAWN_OFFSET_MIN,
            missile_spawn_offset_max: BARRAGE_SPAWN_OFFSET_MAX,
        }
    }
}

/// Homing missile guidance parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileTuning {
    pub jerk: f64,
    pub acceleration: f64,
    pub max_speed: f64,
    pub turn_speed: f64,
    pub lifespan: f64,
    pub banana_turn_multiplier: f64,
    pub overshoot_angle: f64,
    pub slide_time: f64,
    pub slide_deceleration: f64,
    pub min_turn_distance: f64,
}

impl Default for MissileTuning {
    fn default() -> Self {
        Self {
            jerk: MISSILE_JERK,
            acceleration: MISSILE_ACCELERATION,
            max_speed: MISSILE_MAX_SPEED,
            turn_speed: MISSILE_TURN_SPEED,
            lifespan: MISSILE_LIFESPAN,
            banana_turn_multiplier: MISSILE_BANANA_TURN_MULTIPLIER,
            overshoot_angle: MISSILE_OVERSHOOT_ANGLE,
            slide_time: MISSILE_SLIDE_TIME,
            slide_deceleration: MISSILE_SLIDE_DECELERATION,
            min_turn_distance: MISSILE_MIN_TURN_DISTANCE,
        }
    }
}

/// Enemy ship and enemy bullet parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub speed: f64,
    pub health: f64,
    pub detection_range: f64,
    pub fire_cooldown: f64,
    pub zigzag_amplitude: f64,
    pub zigzag_frequency: f64,
    pub orbit_speed: f64,
    pub rally_point: DVec2,
    pub rally_threshold: f64,
    pub radius: f64,
    pub bullet_speed: f64,
    pub bullet_zigzag_amplitude: f64,
    pub bullet_zigzag_frequency: f64,
    pub bullet_orbit_radius: f64,
    pub bullet_orbit_speed: f64,
    pub wave_spread_angle: f64,
    pub slow_and_big_scale: f64,
    pub slow_and_big_speed_factor: f64,
    pub death_burst_count: u32,
    pub bullet_damage_min: u32,
    pub bullet_damage_max: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            detection_range: ENEMY_DETECTION_RANGE,
            fire_cooldown: ENEMY_FIRE_COOLDOWN,
            zigzag_amplitude: ENEMY_ZIGZAG_AMPLITUDE,
            zigzag_frequency: ENEMY_ZIGZAG_FREQUENCY,
            orbit_speed: ENEMY_ORBIT_SPEED,
            rally_point: DVec2::ZERO,
            rally_threshold: ENEMY_RALLY_THRESHOLD,
            radius: ENEMY_RADIUS,
            bullet_speed: ENEMY_BULLET_SPEED,
            bullet_zigzag_amplitude: ENEMY_BULLET_ZIGZAG_AMPLITUDE,
            bullet_zigzag_frequency: ENEMY_BULLET_ZIGZAG_FREQUENCY,
            bullet_orbit_radius: ENEMY_BULLET_ORBIT_RADIUS,
            bullet_orbit_speed: ENEMY_BULLET_ORBIT_SPEED,
            wave_spread_angle: WAVE_SPREAD_ANGLE,
            slow_and_big_scale: SLOW_AND_BIG_SCALE,
            slow_and_big_speed_factor: SLOW_AND_BIG_SPEED_FACTOR,
            death_burst_count: DEATH_BURST_COUNT,
            bullet_damage_min: ENEMY_BULLET_DAMAGE_MIN,
            bullet_damage_max: ENEMY_BULLET_DAMAGE_MAX,
        }
    }
}

/// Health, death and bullet-time parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthTuning {
    pub player_max_health: f64,
    pub regen_per_tick: f64,
    pub player_iframe_ticks: u32,
    pub boss_iframe_ticks: u32,
    pub critical_fraction: f64,
    pub bullet_time_scale: f64,
    pub respawn_delay: f64,
    pub spawn_point: DVec2,
    pub player_radius: f64,
    pub projectile_damage: f64,
    pub status_duration: f64,
    pub player_death_shake: ShakeRequest,
    pub enemy_death_shake: ShakeRequest,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            player_max_health: PLAYER_MAX_HEALTH,
            regen_per_tick: PLAYER_REGEN_PER_TICK,
            player_iframe_ticks: PLAYER_IFRAME_TICKS,
            boss_iframe_ticks: BOSS_IFRAME_TICKS,
            critical_fraction: CRITICAL_HEALTH_FRACTION,
            bullet_time_scale: BULLET_TIME_SCALE,
            respawn_delay: PLAYER_RESPAWN_DELAY,
            spawn_point: DVec2::ZERO,
            player_radius: PLAYER_RADIUS,
            projectile_damage: PROJECTILE_DAMAGE,
            status_duration: STATUS_MESSAGE_DURATION,
            player_death_shake: ShakeRequest::from_tuple(PLAYER_DEATH_SHAKE),
            enemy_death_shake: ShakeRequest::from_tuple(ENEMY_DEATH_SHAKE),
        }
    }
}

/// An enemy placed at scene start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub position: DVec2,
    #[serde(default)]
    pub movement: MovementPattern,
    #[serde(default)]
    pub shoot: ShootPattern,
}

/// Play area, decoy spawning and the initial enemy roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub play_bounds: DVec2,
    pub origin: DVec2,
    pub decoy_spawn_interval: f64,
    pub decoy_max_alive: usize,
    pub decoy_health: f64,
    pub decoy_knockback: f64,
    pub decoy_radius: f64,
    pub decoy_contact_damage: f64,
    pub enemies: Vec<EnemySpawn>,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            play_bounds: DVec2::new(PLAY_BOUNDS.0, PLAY_BOUNDS.1),
            origin: DVec2::ZERO,
            decoy_spawn_interval: DECOY_SPAWN_INTERVAL,
            decoy_max_alive: DECOY_MAX_ALIVE,
            decoy_health: DECOY_HEALTH,
            decoy_knockback: DECOY_KNOCKBACK,
            decoy_radius: DECOY_RADIUS,
            decoy_contact_damage: DECOY_CONTACT_DAMAGE,
            enemies: vec![
                EnemySpawn {
                    position: DVec2::new(20.0, 20.0),
                    movement: MovementPattern::ZigZag,
                    shoot: ShootPattern::Regular,
                },
                EnemySpawn {
                    position: DVec2::new(-25.0, 15.0),
                    movement: MovementPattern::Orbit,
                    shoot: ShootPattern::Wave,
                },
                EnemySpawn {
                    position: DVec2::new(0.0, -30.0),
                    movement: MovementPattern::Drift,
                    shoot: ShootPattern::SlowAndBig,
                },
            ],
        }
    }
}

/// Collision radius and lifespan of a spawned projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileTemplate {
    pub radius: f64,
    pub lifespan: f64,
}

/// Projectile templates. A `None` template turns the matching fire
/// operation into a logged no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTemplates {
    pub player_bullet: Option<ProjectileTemplate>,
    pub missile: Option<ProjectileTemplate>,
    pub enemy_bullet: Option<ProjectileTemplate>,
}

impl Default for ProjectileTemplates {
    fn default() -> Self {
        Self {
            player_bullet: Some(ProjectileTemplate {
                radius: PLAYER_BULLET_RADIUS,
                lifespan: PLAYER_BULLET_LIFESPAN,
            }),
            missile: Some(ProjectileTemplate {
                radius: MISSILE_RADIUS,
                lifespan: MISSILE_LIFESPAN,
            }),
            enemy_bullet: Some(ProjectileTemplate {
                radius: ENEMY_BULLET_RADIUS,
                lifespan: ENEMY_BULLET_LIFESPAN,
            }),
        }
    }
}

/// A boss that can be summoned with `PlayerCommand::SpawnBoss`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossEntry {
    pub name: String,
    pub position: DVec2,
    #[serde(default = "default_boss_health")]
    pub health: f64,
    #[serde(default)]
    pub movement: MovementPattern,
    #[serde(default)]
    pub shoot: ShootPattern,
}

fn default_boss_health() -> f64 {
    BOSS_HEALTH
}

/// Autopilot cadence and telemetry sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotTuning {
    pub barrage_min_interval: f64,
    pub barrage_max_interval: f64,
    pub telemetry_sample_interval: f64,
}

impl Default for AutopilotTuning {
    fn default() -> Self {
        Self {
            barrage_min_interval: AUTOPILOT_BARRAGE_MIN_INTERVAL,
            barrage_max_interval: AUTOPILOT_BARRAGE_MAX_INTERVAL,
            telemetry_sample_interval: TELEMETRY_SAMPLE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Default tuning plus the stock boss roster.
    pub fn with_default_bosses() -> Self {
        Self {
            bosses: vec![
                BossEntry {
                    name: "Dreadnought".to_string(),
                    position: DVec2::new(0.0, 40.0),
                    health: BOSS_HEALTH,
                    movement: MovementPattern::Orbit,
                    shoot: ShootPattern::SlowAndBig,
                },
                BossEntry {
                    name: "Hive Mother".to_string(),
                    position: DVec2::new(-40.0, 0.0),
                    health: BOSS_HEALTH * 1.5,
                    movement: MovementPattern::ZigZag,
                    shoot: ShootPattern::Wave,
                },
            ],
            ..Self::default()
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        positive("gun.build_up_time", self.gun.build_up_time)?;
        positive("gun.base_min_fire_rate", self.gun.base_min_fire_rate)?;
        positive("gun.base_max_fire_rate", self.gun.base_max_fire_rate)?;
        positive("gun.fire_decay_time", self.gun.fire_decay_time)?;
        if self.gun.base_max_fire_rate > self.gun.base_min_fire_rate {
            return Err(invalid(
                "gun.base_max_fire_rate",
                "full-charge interval must not exceed the zero-charge interval",
            ));
        }
        non_negative("gun.bullet_offset_angle", self.gun.bullet_offset_angle)?;
        non_negative("gun.max_kick_angle", self.gun.max_kick_angle)?;
        non_negative("gun.missile_jitter_angle", self.gun.missile_jitter_angle)?;
        if self.gun.missile_spawn_offset_min > self.gun.missile_spawn_offset_max {
            return Err(invalid(
                "gun.missile_spawn_offset_min",
                "must not exceed missile_spawn_offset_max",
            ));
        }
        non_negative("world.play_bounds.x", self.world.play_bounds.x)?;
        non_negative("world.play_bounds.y", self.world.play_bounds.y)?;
        positive("flight.max_forward_speed", self.flight.max_forward_speed)?;
        positive("flight.max_turn_rate", self.flight.max_turn_rate)?;
        if self.flight.deceleration_multiplier < 1.0 {
            return Err(invalid("flight.deceleration_multiplier", "must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.flight.health_damping_floor) {
            return Err(invalid("flight.health_damping_floor", "must be within [0, 1]"));
        }
        for (i, f) in self.sizes.speed_factors.iter().enumerate() {
            if *f <= 0.0 {
                return Err(invalid("sizes.speed_factors", format!("entry {i} must be > 0")));
            }
        }
        positive("missile.max_speed", self.missile.max_speed)?;
        positive("missile.min_turn_distance", self.missile.min_turn_distance)?;
        positive("enemy.fire_cooldown", self.enemy.fire_cooldown)?;
        if self.enemy.bullet_damage_min >= self.enemy.bullet_damage_max {
            return Err(invalid(
                "enemy.bullet_damage_min",
                "must be below the exclusive maximum",
            ));
        }
        positive("health.player_max_health", self.health.player_max_health)?;
        if !(self.health.bullet_time_scale > 0.0 && self.health.bullet_time_scale <= 1.0) {
            return Err(invalid("health.bullet_time_scale", "must be within (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.health.critical_fraction) {
            return Err(invalid("health.critical_fraction", "must be within [0, 1]"));
        }
        if self.health.respawn_delay < 0.0 {
            return Err(invalid("health.respawn_delay", "must be >= 0"));
        }
        if self.autopilot.barrage_min_interval > self.autopilot.barrage_max_interval {
            return Err(invalid(
                "autopilot.barrage_min_interval",
                "must not exceed barrage_max_interval",
            ));
        }
        positive(
            "autopilot.telemetry_sample_interval",
            self.autopilot.telemetry_sample_interval,
        )?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be > 0, got {value}")))
    }
}

/// Also rejects NaN, which would make a random range empty.
fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidTuning {
        field,
        reason: reason.into(),
    }
}
