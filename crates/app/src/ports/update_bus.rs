//! Update bus port — publish/subscribe for schedule notifications.

use std::future::Future;

use daywindow_domain::error::DayWindowError;
use daywindow_domain::event::ScheduleEvent;

/// Publishes schedule events to interested subscribers.
pub trait UpdatePublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: ScheduleEvent,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send;
}

impl<T: UpdatePublisher + Send + Sync> UpdatePublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: ScheduleEvent,
    ) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        (**self).publish(event)
    }
}
