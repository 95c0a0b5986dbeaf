//! Shared application state for axum handlers.

use std::sync::Arc;

use daywindow_app::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};
use daywindow_app::services::schedule_service::ScheduleService;
use daywindow_app::update_bus::InProcessUpdateBus;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, gateway, and publisher types to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers
/// are cloned.
pub struct AppState<R, G, P> {
    /// Schedule use-cases and the runner registry.
    pub schedule_service: Arc<ScheduleService<R, G, P>>,
    /// Update bus the SSE stream subscribes to.
    pub update_bus: Arc<InProcessUpdateBus>,
}

impl<R, G, P> Clone for AppState<R, G, P> {
    fn clone(&self) -> Self {
        Self {
            schedule_service: Arc::clone(&self.schedule_service),
            update_bus: Arc::clone(&self.update_bus),
        }
    }
}

impl<R, G, P> AppState<R, G, P>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    /// Create a new application state from a service instance and bus.
    pub fn new(schedule_service: ScheduleService<R, G, P>, update_bus: Arc<InProcessUpdateBus>) -> Self {
        Self {
            schedule_service: Arc::new(schedule_service),
            update_bus,
        }
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    ///
    /// Use this when the service needs to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        schedule_service: Arc<ScheduleService<R, G, P>>,
        update_bus: Arc<InProcessUpdateBus>,
    ) -> Self {
        Self {
            schedule_service,
            update_bus,
        }
    }
}
