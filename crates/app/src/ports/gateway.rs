//! Device-control boundary port.

use std::future::Future;

use daywindow_domain::error::DayWindowError;

/// Issues service calls against a device family domain.
///
/// Calls are fire-and-forget from the engine's perspective: a successful
/// return means the call was enqueued, not that the device acted on it.
/// Timeout and retry policy belong to the implementation.
pub trait DeviceGateway {
    /// Invoke `service` on `domain` with the given parameter map.
    ///
    /// `data` carries the action parameters plus a `target_ids` list naming
    /// the devices in the group.
    fn call(
        &self,
        domain: &str,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send;
}

impl<T: DeviceGateway + Send + Sync> DeviceGateway for std::sync::Arc<T> {
    fn call(
        &self,
        domain: &str,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        (**self).call(domain, service, data)
    }
}
