//! In-process update bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use daywindow_domain::error::DayWindowError;
use daywindow_domain::event::ScheduleEvent;

use crate::ports::UpdatePublisher;

/// In-process update bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessUpdateBus {
    sender: broadcast::Sender<ScheduleEvent>,
}

impl InProcessUpdateBus {
    /// Create a new update bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ScheduleEvent> {
        self.sender.subscribe()
    }
}

impl UpdatePublisher for InProcessUpdateBus {
    fn publish(
        &self,
        event: ScheduleEvent,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
