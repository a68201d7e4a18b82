//! Telemetry counters and autopilot flight samples.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use starlance_core::enums::TelemetryCounter;
use starlance_core::error::{Result, SimError};

use crate::services::TelemetryStore;

/// Flight state sampled once per interval while the autopilot flies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Real seconds since scene start.
    pub timestamp: f64,
    pub speed: f64,
    pub acceleration: f64,
    pub jerk: f64,
    pub rot_speed: f64,
    pub rot_acceleration: f64,
    pub rot_jerk: f64,
    pub size_index: usize,
}

/// Everything handed to a [`TelemetryStore`] on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub counters: BTreeMap<TelemetryCounter, i64>,
    pub samples: Vec<TelemetrySample>,
}

impl TelemetryRecord {
    pub fn get(&self, counter: TelemetryCounter) -> i64 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.samples.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Telemetry {
    record: TelemetryRecord,
    next_sample_at: f64,
}

impl Telemetry {
    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    pub fn add(&mut self, counter: TelemetryCounter, amount: i64) {
        *self.record.counters.entry(counter).or_insert(0) += amount;
    }

    pub fn increment(&mut self, counter: TelemetryCounter) {
        self.add(counter, 1);
    }

    pub fn mark_boss_spawned(&mut self) {
        self.increment(TelemetryCounter::BossSpawned);
    }

    /// Record time-to-defeat (rounded seconds) and deaths so far.
    pub fn mark_boss_defeated(&mut self, time_to_defeat_secs: f64) {
        self.add(
            TelemetryCounter::BossDefeatTime,
            time_to_defeat_secs.round() as i64,
        );
        let deaths = self.record.get(TelemetryCounter::Deaths);
        self.add(TelemetryCounter::DeathsBeforeBossDefeat, deaths);
        self.increment(TelemetryCounter::BossDefeated);
    }

    /// Whether a sample is due at real time `now`.
    pub fn sample_due(&self, now: f64) -> bool {
        now >= self.next_sample_at
    }

    pub fn push_sample(&mut self, sample: TelemetrySample, interval: f64) {
        self.next_sample_at = sample.timestamp + interval;
        self.record.samples.push(sample);
    }

    /// Hand the record to `store`, clearing it on success.
    pub fn save(&mut self, store: Option<&mut (dyn TelemetryStore + 'static)>) -> Result<()> {
        let store = store.ok_or_else(|| {
            SimError::TelemetryStore("no telemetry store configured".to_string())
        })?;
        store.persist(&self.record)?;
        self.record = TelemetryRecord::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl TelemetryStore for FailingStore {
        fn persist(&mut self, _record: &TelemetryRecord) -> Result<()> {
            Err(SimError::TelemetryStore("disk full".into()))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<TelemetryRecord>,
    }

    impl TelemetryStore for MemoryStore {
        fn persist(&mut self, record: &TelemetryRecord) -> Result<()> {
            self.saved.push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_boss_defeat_records_deaths_so_far() {
        let mut telemetry = Telemetry::default();
        telemetry.increment(TelemetryCounter::Deaths);
        telemetry.increment(TelemetryCounter::Deaths);
        telemetry.mark_boss_spawned();
        telemetry.mark_boss_defeated(41.6);
        let record = telemetry.record();
        assert_eq!(record.get(TelemetryCounter::BossDefeatTime), 42);
        assert_eq!(record.get(TelemetryCounter::DeathsBeforeBossDefeat), 2);
        assert_eq!(record.get(TelemetryCounter::BossDefeated), 1);
    }

    #[test]
    fn test_save_clears_on_success() {
        let mut telemetry = Telemetry::default();
        telemetry.add(TelemetryCounter::ShotsFired, 7);
        let mut store = MemoryStore::default();
        telemetry.save(Some(&mut store)).unwrap();
        assert!(telemetry.record().is_empty());
        assert_eq!(store.saved[0].get(TelemetryCounter::ShotsFired), 7);
    }

    #[test]
    fn test_failed_save_keeps_data() {
        let mut telemetry = Telemetry::default();
        telemetry.add(TelemetryCounter::MissilesFired, 5);
        assert!(telemetry.save(Some(&mut FailingStore)).is_err());
        assert!(telemetry.save(None).is_err());
        assert_eq!(telemetry.record().get(TelemetryCounter::MissilesFired), 5);
    }

    #[test]
    fn test_sampling_interval() {
        let mut telemetry = Telemetry::default();
        assert!(telemetry.sample_due(0.0));
        telemetry.push_sample(
            TelemetrySample {
                timestamp: 0.0,
                ..Default::default()
            },
            1.0,
        );
        assert!(!telemetry.sample_due(0.5));
        assert!(telemetry.sample_due(1.0));
    }
}
