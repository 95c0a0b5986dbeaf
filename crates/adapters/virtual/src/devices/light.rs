//! Virtual light — responds to `turn_on` (with optional brightness) and
//! `turn_off`.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::DeviceSnapshot;

struct LightState {
    on: bool,
    brightness_pct: u8,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            brightness_pct: 100,
        }
    }
}

/// A simulated dimmable light.
pub struct VirtualLight {
    state: Mutex<LightState>,
}

impl Default for VirtualLight {
    fn default() -> Self {
        Self {
            state: Mutex::new(LightState::default()),
        }
    }
}

impl VirtualLight {
    /// Handle a service call.
    pub fn apply(&self, service: &str, data: &Value) {
        let mut state = self.lock();
        match service {
            "turn_on" => {
                state.on = true;
                if let Some(value) = data.get("brightness_pct").and_then(Value::as_u64) {
                    state.brightness_pct =
                        u8::try_from(value.min(100)).expect("value is clamped to 100");
                }
            }
            "turn_off" => state.on = false,
            _ => {}
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        let state = self.lock();
        DeviceSnapshot::Light {
            on: state.on,
            brightness_pct: state.brightness_pct,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
