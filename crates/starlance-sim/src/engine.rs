//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems and produces `GameStateSnapshot`s. Completely headless.
//!
//! Two clocks drive it. [`SimulationEngine::frame`] receives variable real
//! time from the host, processes commands and runs every fixed tick that is
//! due. Each fixed tick covers `DT` real seconds and `DT * time_scale` world
//! seconds, so bullet time slows the world while the player and everything
//! keyed to real time keep their pace.

use std::collections::{HashSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use starlance_core::commands::{ControlInput, PlayerCommand};
use starlance_core::components::{Collider, FlightState, Health, PlayerShip};
use starlance_core::constants::{DT, MAX_TICKS_PER_FRAME};
use starlance_core::enums::{GamePhase, MovementPattern, ShootPattern, SizeClass, TelemetryCounter};
use starlance_core::error::Result;
use starlance_core::events::{ShakeRequest, SimEvent};
use starlance_core::state::GameStateSnapshot;
use starlance_core::tuning::Tuning;
use starlance_core::types::{DVec2, KinematicBody, SimTime};
use starlance_enemy_ai::patterns::death_burst;

use crate::registry::TargetRegistry;
use crate::services::Services;
use crate::systems;
use crate::systems::autopilot::AutopilotState;
use crate::systems::enemy_ai::EnemyDeath;
use crate::systems::health::is_critical;
use crate::telemetry::{Telemetry, TelemetryRecord, TelemetrySample};
use crate::timers::DelayedTask;
use crate::world_setup;

/// Slack when comparing accumulated frame time against `DT`.
const TICK_EPSILON: f64 = 1e-9;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tuning: Tuning::with_default_bosses(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    tuning: Tuning,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    registry: TargetRegistry,
    services: Services,
    telemetry: Telemetry,

    input: ControlInput,
    /// Real seconds received but not yet simulated.
    accumulator: f64,
    time_scale: f64,
    bullet_time: bool,
    player: Option<Entity>,
    respawn: Option<DelayedTask>,
    shake: Option<DelayedTask>,
    autopilot: AutopilotState,
    decoy_timer: f64,
    reported_contacts: Vec<(Entity, Entity)>,
    /// Decoy/player pairs overlapping at the end of the last tick.
    decoy_contacts: HashSet<(Entity, Entity)>,
    /// Player flight state at the end of the previous tick, for jerk samples.
    last_flight: FlightState,
}

impl SimulationEngine {
    /// Build an engine from `config`.
    ///
    /// The tuning is trusted as given. Tuning from [`Tuning::from_json`] is
    /// already validated; use [`SimulationEngine::try_new`] for tuning
    /// assembled in code.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            tuning: config.tuning,
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            registry: TargetRegistry::default(),
            services: Services::default(),
            telemetry: Telemetry::default(),
            input: ControlInput::default(),
            accumulator: 0.0,
            time_scale: 1.0,
            bullet_time: false,
            player: None,
            respawn: None,
            shake: None,
            autopilot: AutopilotState::default(),
            decoy_timer: 0.0,
            reported_contacts: Vec::new(),
            decoy_contacts: HashSet::new(),
            last_flight: FlightState::default(),
        }
    }

    /// Validate the tuning, then build the engine.
    pub fn try_new(config: SimConfig) -> Result<Self> {
        config.tuning.validate()?;
        Ok(Self::new(config))
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn set_services(&mut self, services: Services) {
        self.services = services;
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Set the continuous control axes used by every tick until changed.
    pub fn set_input(&mut self, input: ControlInput) {
        self.input = input.clamped();
    }

    /// Report a touch detected by an external physics host.
    pub fn report_contact(&mut self, a: Entity, b: Entity) {
        self.reported_contacts.push((a, b));
    }

    /// Advance by `real_dt` seconds of real time and return the snapshot.
    pub fn frame(&mut self, real_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.accumulator += real_dt.max(0.0);
            let mut ticks = 0;
            while self.accumulator + TICK_EPSILON >= DT && ticks < MAX_TICKS_PER_FRAME {
                self.fixed_tick();
                self.accumulator -= DT;
                ticks += 1;
            }
            if self.accumulator + TICK_EPSILON >= DT {
                debug!(dropped_secs = self.accumulator, "frame exceeded tick budget");
                self.accumulator = 0.0;
            }
            self.accumulator = self.accumulator.max(0.0);
        }

        self.build_snapshot()
    }

    /// Run exactly one fixed tick.
    pub fn step(&mut self) -> GameStateSnapshot {
        self.accumulator = 0.0;
        self.frame(DT)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn bullet_time(&self) -> bool {
        self.bullet_time
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.enabled
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// The player entity, once a scene has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn telemetry(&self) -> &TelemetryRecord {
        self.telemetry.record()
    }

    /// Spawn an enemy outside the configured roster.
    pub fn spawn_enemy(
        &mut self,
        position: DVec2,
        movement: MovementPattern,
        shoot: ShootPattern,
    ) -> Entity {
        world_setup::spawn_enemy(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &self.tuning,
            position,
            movement,
            shoot,
        )
    }

    pub fn spawn_decoy(&mut self, position: DVec2) -> Entity {
        world_setup::spawn_decoy(&mut self.world, &mut self.registry, &self.tuning, position)
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Deal damage to the player as an enemy bullet would.
    #[cfg(test)]
    pub fn damage_player(&mut self, amount: f64) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        match self.world.get::<&mut Health>(player) {
            Ok(mut health) => systems::health::apply_damage(&mut health, amount),
            Err(_) => false,
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartScene => self.start_scene(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::FireMissiles => {
                if let (GamePhase::Active, Some(player)) = (self.phase, self.player) {
                    systems::barrage::launch(
                        &mut self.world,
                        player,
                        &self.tuning,
                        &mut self.rng,
                        &mut self.telemetry,
                        &mut self.events,
                    );
                }
            }
            PlayerCommand::SelectSize { size } => self.select_size(size),
            PlayerCommand::ToggleAutopilot => {
                let enabled =
                    self.autopilot
                        .toggle(self.time.real_secs, &self.tuning.autopilot, &mut self.rng);
                info!(enabled, "autopilot toggled");
                let text = if enabled { "Autopilot engaged" } else { "Autopilot off" };
                self.services
                    .show_status(text, self.tuning.health.status_duration);
                self.events.push(SimEvent::AutopilotChanged { enabled });
            }
            PlayerCommand::SpawnBoss { index } => {
                if self.phase == GamePhase::Active {
                    self.spawn_boss(index);
                }
            }
            PlayerCommand::SaveTelemetry => self.save_telemetry(),
        }
    }

    fn start_scene(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.despawn_buffer.clear();
        self.reported_contacts.clear();
        self.decoy_contacts.clear();
        self.player = Some(world_setup::setup_scene(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &self.tuning,
        ));
        self.time = SimTime::default();
        self.accumulator = 0.0;
        self.time_scale = 1.0;
        self.bullet_time = false;
        self.respawn = None;
        self.shake = None;
        self.autopilot = AutopilotState::default();
        self.decoy_timer = 0.0;
        self.last_flight = FlightState::default();
        self.phase = GamePhase::Active;
        info!(
            enemies = self.tuning.world.enemies.len(),
            "scene started"
        );
    }

    fn select_size(&mut self, size: SizeClass) {
        let Some(player) = self.player else {
            return;
        };
        let radius = self.tuning.health.player_radius * self.tuning.sizes.scale(size);
        let Ok((ship, flight, body, collider)) = self.world.query_one_mut::<(
            &mut PlayerShip,
            &mut FlightState,
            &mut KinematicBody,
            &mut Collider,
        )>(player) else {
            return;
        };
        ship.size = size;
        systems::player_flight::reset_motion(flight, body);
        collider.radius = radius;
        self.last_flight = FlightState::default();

        debug!(size = size.label(), "ship size changed");
        self.services.show_status(
            format!("Size: {}", size.label()),
            self.tuning.health.status_duration,
        );
        self.events.push(SimEvent::SizeChanged { size });
    }

    fn spawn_boss(&mut self, index: usize) -> Option<Entity> {
        let Some(entry) = self.tuning.bosses.get(index).cloned() else {
            warn!(index, "no boss configured at index");
            return None;
        };
        let entity = world_setup::spawn_boss(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &self.tuning,
            &entry,
            self.time.real_secs,
        );
        self.telemetry.mark_boss_spawned();
        self.services
            .show_status(entry.name.clone(), self.tuning.health.status_duration);
        info!(name = %entry.name, "boss spawned");
        self.events.push(SimEvent::BossSpawned { name: entry.name });
        Some(entity)
    }

    fn save_telemetry(&mut self) {
        match self
            .telemetry
            .save(self.services.telemetry_store.as_deref_mut())
        {
            Ok(()) => {
                info!("telemetry saved");
                self.events.push(SimEvent::TelemetrySaved);
            }
            Err(err) => warn!(%err, "telemetry save failed"),
        }
    }

    /// Run all systems for one fixed tick.
    fn fixed_tick(&mut self) {
        let real_dt = DT;
        self.update_bullet_time();
        let world_dt = DT * self.time_scale;
        self.time.advance_real(real_dt);
        let now = self.time.real_secs;

        // 1. Real-time tasks (respawn, shake)
        self.advance_tasks(real_dt);
        // 2. Player input (manual or autopilot) and flight
        let input = self.effective_input(now);
        systems::player_flight::run(&mut self.world, input, &self.tuning, real_dt);
        // 3. Player gun
        systems::player_gun::run(
            &mut self.world,
            input.fire,
            &self.tuning,
            now,
            real_dt,
            &mut self.rng,
            &mut self.telemetry,
            &mut self.events,
        );
        // 4. Enemy AI
        let deaths = systems::enemy_ai::run(
            &mut self.world,
            &self.registry,
            &self.tuning,
            world_dt,
            &mut self.rng,
        );
        for death in deaths {
            self.handle_enemy_death(death, now);
        }
        // 5. Projectile steering and guidance
        systems::projectiles::steer_patterned(&mut self.world, &self.tuning, world_dt);
        systems::projectiles::guide_missiles(&mut self.world, &self.registry, &self.tuning, real_dt);
        // 6. Movement integration
        systems::movement::run(&mut self.world, real_dt, world_dt);
        // 7. Decoy spawning
        systems::decoys::run(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &self.tuning,
            &mut self.decoy_timer,
            world_dt,
        );
        // 8. Contacts and damage
        systems::health::tick_invulnerability(&mut self.world);
        let mut contacts = systems::collision::begin_rams(
            systems::collision::detect(&self.world),
            &mut self.decoy_contacts,
        );
        contacts.extend(
            self.reported_contacts
                .drain(..)
                .filter_map(|(a, b)| systems::collision::classify(&self.world, a, b)),
        );
        systems::damage::resolve(
            &mut self.world,
            &contacts,
            &self.tuning,
            &mut self.rng,
            &mut self.telemetry,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        self.check_player_death();
        systems::health::regenerate(&mut self.world);
        // 9. Lifespans and cleanup
        systems::projectiles::expire(&mut self.world, real_dt, world_dt, &mut self.despawn_buffer);
        systems::cleanup::run(
            &mut self.world,
            &mut self.registry,
            &self.tuning,
            &mut self.despawn_buffer,
        );
        // 10. Telemetry
        self.sample_telemetry(now);

        self.time.advance_tick(world_dt);
    }

    fn update_bullet_time(&mut self) {
        let fraction = self.tuning.health.critical_fraction;
        let critical = self
            .player
            .and_then(|p| self.world.get::<&Health>(p).ok().map(|h| is_critical(&h, fraction)))
            .unwrap_or(false);
        if critical != self.bullet_time {
            self.bullet_time = critical;
            debug!(active = critical, "bullet time changed");
            self.events.push(SimEvent::BulletTime { active: critical });
        }
        self.time_scale = if critical {
            self.tuning.health.bullet_time_scale
        } else {
            1.0
        };
    }

    fn advance_tasks(&mut self, real_dt: f64) {
        if let Some(task) = self.respawn.as_mut() {
            if task.advance(real_dt) {
                self.respawn = None;
                self.respawn_player();
            }
        }
        if let Some(task) = self.shake.as_mut() {
            if task.advance(real_dt) {
                self.shake = None;
            }
        }
    }

    fn effective_input(&mut self, now: f64) -> ControlInput {
        let Some(player) = self.player else {
            return self.input;
        };
        if !self.autopilot.enabled {
            return self.input;
        }
        let input = systems::autopilot::synthesize_input(&self.world, &self.registry, player);
        if self
            .autopilot
            .barrage_due(now, &self.tuning.autopilot, &mut self.rng)
        {
            systems::barrage::launch(
                &mut self.world,
                player,
                &self.tuning,
                &mut self.rng,
                &mut self.telemetry,
                &mut self.events,
            );
        }
        input
    }

    /// Cancel any in-flight shake and start a new one.
    fn request_shake(&mut self, request: ShakeRequest) {
        if let Some(task) = self.shake.as_mut() {
            if task.is_running() {
                task.cancel();
                self.services.cancel_shake();
            }
        }
        self.shake = Some(DelayedTask::started(request.duration));
        self.services.start_shake(request);
    }

    fn handle_enemy_death(&mut self, death: EnemyDeath, now: f64) {
        self.despawn_buffer.push(death.entity);
        self.telemetry.increment(TelemetryCounter::ShipDestructions);
        self.events.push(SimEvent::Explosion {
            position: death.position,
            scale: 1.0,
        });
        self.events.push(SimEvent::EnemyDestroyed {
            position: death.position,
            boss: death.boss.is_some(),
        });
        self.request_shake(self.tuning.health.enemy_death_shake);

        let status = match death.boss {
            Some((name, spawned_at)) => {
                self.telemetry.mark_boss_defeated(now - spawned_at);
                info!(name = %name, "boss defeated");
                format!("{name} defeated")
            }
            None => {
                debug!(entity = ?death.entity, "enemy destroyed");
                "Enemy destroyed".to_string()
            }
        };
        self.services
            .show_status(status, self.tuning.health.status_duration);
    }

    fn check_player_death(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let (position, size) = match self
            .world
            .query_one_mut::<(&mut PlayerShip, &mut Health, &mut KinematicBody)>(player)
        {
            Ok((ship, health, body)) if health.alive && health.current <= 0.0 => {
                health.alive = false;
                ship.visible = false;
                body.velocity = DVec2::ZERO;
                body.angular_velocity = 0.0;
                (body.position, ship.size)
            }
            _ => return,
        };

        info!(x = position.x, y = position.y, "player destroyed");
        let burst = death_burst(
            self.tuning.enemy.death_burst_count,
            self.tuning.enemy.bullet_speed,
        );
        for shot in &burst {
            let heading = shot.direction.y.atan2(shot.direction.x);
            world_setup::spawn_player_bullet(
                &mut self.world,
                &self.tuning,
                position,
                heading,
                shot.speed,
                shot.scale,
            );
        }
        self.events.push(SimEvent::Explosion {
            position,
            scale: self.tuning.sizes.scale(size),
        });
        self.events.push(SimEvent::PlayerHidden);
        self.request_shake(self.tuning.health.player_death_shake);
        self.services
            .show_status("Ship destroyed", self.tuning.health.status_duration);
        self.telemetry.increment(TelemetryCounter::Deaths);
        self.respawn = Some(DelayedTask::started(self.tuning.health.respawn_delay));
    }

    fn respawn_player(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        if let Some(position) = world_setup::respawn_player(&mut self.world, player, &self.tuning) {
            info!("player respawned");
            self.last_flight = FlightState::default();
            self.services
                .show_status("Respawned", self.tuning.health.status_duration);
            self.events.push(SimEvent::PlayerRespawned { position });
        }
    }

    fn sample_telemetry(&mut self, now: f64) {
        let Some(player) = self.player else {
            return;
        };
        let Ok((ship, flight)) = self
            .world
            .query_one_mut::<(&PlayerShip, &FlightState)>(player)
        else {
            return;
        };
        let (flight, size) = (*flight, ship.size);

        if self.autopilot.enabled && self.telemetry.sample_due(now) {
            let sample = TelemetrySample {
                timestamp: now,
                speed: flight.speed.abs(),
                acceleration: flight.acceleration,
                jerk: (flight.acceleration - self.last_flight.acceleration) / DT,
                rot_speed: flight.turn_rate,
                rot_acceleration: flight.turn_acceleration,
                rot_jerk: (flight.turn_acceleration - self.last_flight.turn_acceleration) / DT,
                size_index: size.index(),
            };
            self.telemetry
                .push_sample(sample, self.tuning.autopilot.telemetry_sample_interval);
        }
        self.last_flight = flight;
    }

    fn build_snapshot(&mut self) -> GameStateSnapshot {
        let ctx = systems::snapshot::SnapshotContext {
            time: self.time,
            phase: self.phase,
            time_scale: self.time_scale,
            bullet_time: self.bullet_time,
            autopilot: self.autopilot.enabled,
            critical_fraction: self.tuning.health.critical_fraction,
        };
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &ctx, events)
    }
}
