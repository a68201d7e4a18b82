//! Presentation and persistence collaborators injected into the engine.
//!
//! Every service is optional. A missing service turns its requests into
//! no-ops.

use starlance_core::error::Result;
use starlance_core::events::{ShakeRequest, StatusMessage};

use crate::telemetry::TelemetryRecord;

/// Transient on-screen text.
pub trait StatusDisplay {
    fn show(&mut self, message: &StatusMessage);
}

/// Camera shake. `start` is only called after any in-flight shake was cancelled.
pub trait CameraShake {
    fn start(&mut self, request: ShakeRequest);
    fn cancel(&mut self);
}

/// Durable telemetry persistence.
pub trait TelemetryStore {
    fn persist(&mut self, record: &TelemetryRecord) -> Result<()>;
}

#[derive(Default)]
pub struct Services {
    pub status: Option<Box<dyn StatusDisplay>>,
    pub shake: Option<Box<dyn CameraShake>>,
    pub telemetry_store: Option<Box<dyn TelemetryStore>>,
}

impl Services {
    pub fn with_status(mut self, status: impl StatusDisplay + 'static) -> Self {
        self.status = Some(Box::new(status));
        self
    }

    pub fn with_shake(mut self, shake: impl CameraShake + 'static) -> Self {
        self.shake = Some(Box::new(shake));
        self
    }

    pub fn with_telemetry_store(mut self, store: impl TelemetryStore + 'static) -> Self {
        self.telemetry_store = Some(Box::new(store));
        self
    }

    pub fn show_status(&mut self, text: impl Into<String>, duration_secs: f64) {
        if let Some(status) = self.status.as_mut() {
            status.show(&StatusMessage {
                text: text.into(),
                duration_secs,
            });
        }
    }

    pub fn start_shake(&mut self, request: ShakeRequest) {
        if let Some(shake) = self.shake.as_mut() {
            shake.start(request);
        }
    }

    pub fn cancel_shake(&mut self) {
        if let Some(shake) = self.shake.as_mut() {
            shake.cancel();
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("status", &self.status.is_some())
            .field("shake", &self.shake.is_some())
            .field("telemetry_store", &self.telemetry_store.is_some())
            .finish()
    }
}
