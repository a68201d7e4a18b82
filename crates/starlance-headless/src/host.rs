//! Host-side services: status and shake requests go to the log, telemetry
//! goes to CSV files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use starlance_core::error::Result;
use starlance_core::events::{ShakeRequest, StatusMessage};
use starlance_sim::services::{CameraShake, StatusDisplay, TelemetryStore};
use starlance_sim::telemetry::TelemetryRecord;

pub struct LogStatus;

impl StatusDisplay for LogStatus {
    fn show(&mut self, message: &StatusMessage) {
        info!(text = %message.text, secs = message.duration_secs, "status");
    }
}

pub struct LogShake;

impl CameraShake for LogShake {
    fn start(&mut self, request: ShakeRequest) {
        debug!(
            duration = request.duration,
            x = request.intensity_x,
            y = request.intensity_y,
            "camera shake"
        );
    }

    fn cancel(&mut self) {
        debug!("camera shake cancelled");
    }
}

/// Writes each saved record to `telemetry_<unix seconds>.csv` under `dir`.
pub struct CsvTelemetryStore {
    dir: PathBuf,
}

impl CsvTelemetryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TelemetryStore for CsvTelemetryStore {
    fn persist(&mut self, record: &TelemetryRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = self.dir.join(format!("telemetry_{stamp}.csv"));
        let mut out = BufWriter::new(File::create(&path)?);
        write_csv(&mut out, record)?;
        out.flush()?;
        info!(path = %path.display(), "telemetry written");
        Ok(())
    }
}

/// Counters as `Key,Value` rows, then one row per motion sample.
pub fn write_csv(out: &mut impl Write, record: &TelemetryRecord) -> std::io::Result<()> {
    writeln!(out, "Key,Value")?;
    for (counter, value) in &record.counters {
        writeln!(out, "{},{}", counter.key(), value)?;
    }
    if !record.samples.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Timestamp,Speed,Acceleration,Jerk,RotSpeed,RotAcceleration,RotJerk,Size"
        )?;
        for s in &record.samples {
            writeln!(
                out,
                "{:.2},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
                s.timestamp,
                s.speed,
                s.acceleration,
                s.jerk,
                s.rot_speed,
                s.rot_acceleration,
                s.rot_jerk,
                s.size_index
            )?;
        }
    }
    Ok(())
}
