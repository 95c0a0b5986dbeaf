//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod schedules;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use daywindow_app::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, G, P>() -> Router<AppState<R, G, P>>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/schedules",
            get(schedules::list::<R, G, P>).post(schedules::create::<R, G, P>),
        )
        .route(
            "/schedules/{id}",
            get(schedules::get::<R, G, P>).delete(schedules::delete::<R, G, P>),
        )
        .route("/schedules/{id}/state", get(schedules::state::<R, G, P>))
        .route(
            "/schedules/{id}/options",
            post(schedules::set_options::<R, G, P>),
        )
        .route("/updates/stream", get(sse::stream::<R, G, P>))
}
