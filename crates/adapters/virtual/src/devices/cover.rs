//! Virtual cover — responds to `open`, `close`, `set_position`.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::DeviceSnapshot;

/// A simulated cover tracking its position (0 closed, 100 open).
#[derive(Default)]
pub struct VirtualCover {
    position: Mutex<u8>,
}

impl VirtualCover {
    /// Handle a service call.
    pub fn apply(&self, service: &str, data: &Value) {
        let mut position = self.lock();
        match service {
            "open" => *position = 100,
            "close" => *position = 0,
            "set_position" => {
                if let Some(value) = data.get("position").and_then(Value::as_u64) {
                    *position = u8::try_from(value.min(100)).expect("value is clamped to 100");
                }
            }
            _ => {}
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot::Cover {
            position: *self.lock(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, u8> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
