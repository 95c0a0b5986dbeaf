//! Virtual relay — responds to `turn_on`, `turn_off`, `toggle`.

use std::sync::{Mutex, PoisonError};

use super::DeviceSnapshot;

/// A simulated on/off relay.
#[derive(Default)]
pub struct VirtualRelay {
    on: Mutex<bool>,
}

impl VirtualRelay {
    /// Handle a service call.
    pub fn apply(&self, service: &str) {
        let mut on = self.lock();
        match service {
            "turn_on" => *on = true,
            "turn_off" => *on = false,
            "toggle" => *on = !*on,
            _ => {}
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot::Relay { on: *self.lock() }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, bool> {
        self.on.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
