//! Server-Sent Events (SSE) stream for schedule updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use daywindow_app::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};

use crate::state::AppState;

/// `GET /api/updates/stream` — SSE stream of schedule update events.
///
/// Subscribes to the update bus broadcast channel and sends JSON-encoded
/// events as SSE `data:` frames. The stream continues until the client
/// disconnects or the bus is closed.
pub async fn stream<R, G, P>(
    State(state): State<AppState<R, G, P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    let update_rx = state.update_bus.subscribe();
    let event_stream = BroadcastStream::new(update_rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize update event for SSE stream");
                None
            }
        },
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some updates were dropped"
            );
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
