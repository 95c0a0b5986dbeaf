//! # daywindow-adapter-virtual
//!
//! Virtual/demo device adapter that provides simulated devices for testing
//! and demonstration purposes.
//!
//! ## Provided devices
//!
//! | Family tag | Device | Behaviour |
//! |------------|--------|-----------|
//! | `cover` | [`VirtualCover`] | Responds to `open` / `close` / `set_position` |
//! | `light` | [`VirtualLight`] | Responds to `turn_on` (with optional `brightness_pct`) / `turn_off` |
//! | anything else | [`VirtualRelay`] | Responds to `turn_on` / `turn_off` / `toggle` |
//!
//! ## Dependency rule
//!
//! Depends on `daywindow-app` (port traits) and `daywindow-domain` only.

mod devices;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use daywindow_app::ports::DeviceGateway;
use daywindow_domain::error::DayWindowError;

pub use devices::{DeviceSnapshot, VirtualCover, VirtualDevice, VirtualLight, VirtualRelay};

/// One call that reached the gateway, kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub domain: String,
    pub service: String,
    pub data: Value,
}

/// Device gateway backed by simulated devices.
///
/// Every call is recorded and applied to the matching devices; calls for
/// unknown targets are logged and dropped, never failed — the boundary is
/// fire-and-forget.
#[derive(Default)]
pub struct VirtualDeviceGateway {
    devices: Mutex<HashMap<String, VirtualDevice>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl VirtualDeviceGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one simulated device per `family.identifier` target.
    ///
    /// Targets without a family separator are skipped; already provisioned
    /// targets are kept as-is.
    pub fn provision<S: AsRef<str>>(&self, targets: &[S]) {
        let mut devices = self.lock_devices();
        for target in targets {
            let target = target.as_ref();
            let Some((domain, _)) = target.split_once('.') else {
                continue;
            };
            devices
                .entry(target.to_string())
                .or_insert_with(|| VirtualDevice::for_family(domain));
        }
    }

    /// Every call issued so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    /// The current state of a provisioned device.
    #[must_use]
    pub fn snapshot(&self, target: &str) -> Option<DeviceSnapshot> {
        self.lock_devices().get(target).map(VirtualDevice::snapshot)
    }

    fn lock_devices(&self) -> MutexGuard<'_, HashMap<String, VirtualDevice>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceGateway for VirtualDeviceGateway {
    fn call(
        &self,
        domain: &str,
        service: &str,
        data: Value,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        self.lock_calls().push(RecordedCall {
            domain: domain.to_string(),
            service: service.to_string(),
            data: data.clone(),
        });

        let ids: Vec<String> = data
            .get("target_ids")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let devices = self.lock_devices();
        for id in ids {
            let target = format!("{domain}.{id}");
            match devices.get(&target) {
                Some(device) => device.apply(service, &data),
                None => tracing::warn!(entity = %target, "call for unprovisioned device dropped"),
            }
        }

        async { Ok(()) }
    }
}
