//! Storage port — the host-owned options store.

use std::future::Future;

use daywindow_domain::error::DayWindowError;
use daywindow_domain::id::ScheduleId;
use daywindow_domain::options::ScheduleOptions;
use daywindow_domain::schedule::Schedule;

/// Repository over configured schedules and their persisted options.
pub trait ScheduleRepository {
    /// Persist a new schedule.
    fn create(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send;

    /// Look up a schedule by id.
    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<Schedule>, DayWindowError>> + Send;

    /// List all schedules.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, DayWindowError>> + Send;

    /// Replace a schedule's options wholesale (replace-and-persist
    /// semantics — the caller merges first).
    fn update_options(
        &self,
        id: ScheduleId,
        options: ScheduleOptions,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send;

    /// Remove a schedule.
    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), DayWindowError>> + Send;
}

impl<T: ScheduleRepository + Send + Sync> ScheduleRepository for std::sync::Arc<T> {
    fn create(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send {
        (**self).create(schedule)
    }

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<Schedule>, DayWindowError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, DayWindowError>> + Send {
        (**self).get_all()
    }

    fn update_options(
        &self,
        id: ScheduleId,
        options: ScheduleOptions,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send {
        (**self).update_options(id, options)
    }

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        (**self).delete(id)
    }
}
