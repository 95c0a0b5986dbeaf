//! In-memory schedule repository — the in-process options store.
//!
//! Persistence formats are host-owned; a real deployment implements
//! [`ScheduleRepository`] against its own store and plugs it in at the
//! composition root.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use daywindow_domain::error::{DayWindowError, NotFoundError, StorageError};
use daywindow_domain::id::ScheduleId;
use daywindow_domain::options::ScheduleOptions;
use daywindow_domain::schedule::Schedule;

use crate::ports::ScheduleRepository;

/// Mutex-guarded map of schedules keyed by id.
#[derive(Default)]
pub struct InMemoryScheduleRepository {
    store: Mutex<HashMap<ScheduleId, Schedule>>,
}

impl InMemoryScheduleRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-seeded with the given schedules.
    #[must_use]
    pub fn with(schedules: Vec<Schedule>) -> Self {
        let map: HashMap<_, _> = schedules.into_iter().map(|s| (s.id, s)).collect();
        Self {
            store: Mutex::new(map),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ScheduleId, Schedule>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScheduleRepository for InMemoryScheduleRepository {
    fn create(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send {
        let result = {
            let mut store = self.lock();
            if store.contains_key(&schedule.id) {
                Err(StorageError(format!("schedule {} already exists", schedule.id)).into())
            } else {
                store.insert(schedule.id, schedule.clone());
                Ok(schedule)
            }
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<Schedule>, DayWindowError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, DayWindowError>> + Send {
        let result: Vec<Schedule> = self.lock().values().cloned().collect();
        async { Ok(result) }
    }

    fn update_options(
        &self,
        id: ScheduleId,
        options: ScheduleOptions,
    ) -> impl Future<Output = Result<Schedule, DayWindowError>> + Send {
        let result = {
            let mut store = self.lock();
            match store.get_mut(&id) {
                Some(schedule) => {
                    schedule.options = options;
                    Ok(schedule.clone())
                }
                None => Err(NotFoundError {
                    entity: "Schedule",
                    id: id.to_string(),
                }
                .into()),
            }
        };
        async { result }
    }

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), DayWindowError>> + Send {
        self.lock().remove(&id);
        async { Ok(()) }
    }
}
