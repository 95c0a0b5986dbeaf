//! Schedule service — use-cases for managing schedules and their runners.
//!
//! Holds the registry of live [`ScheduleRunner`]s (one per configured
//! schedule) and fronts the options store for the RPC and view adapters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use daywindow_domain::error::{DayWindowError, NotFoundError};
use daywindow_domain::id::ScheduleId;
use daywindow_domain::options::{OptionsPatch, ScheduleOptions};
use daywindow_domain::schedule::Schedule;
use daywindow_domain::state::ScheduleState;

use crate::engine::ScheduleRunner;
use crate::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};

type Runner<R, G, P> = ScheduleRunner<Arc<R>, Arc<G>, Arc<P>>;

/// Application service owning every schedule's engine instance.
pub struct ScheduleService<R, G, P> {
    repo: Arc<R>,
    gateway: Arc<G>,
    publisher: Arc<P>,
    runners: Mutex<HashMap<ScheduleId, Arc<Runner<R, G, P>>>>,
}

impl<R, G, P> ScheduleService<R, G, P>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    /// Create a new service backed by the given ports.
    pub fn new(repo: R, gateway: G, publisher: P) -> Self {
        Self {
            repo: Arc::new(repo),
            gateway: Arc::new(gateway),
            publisher: Arc::new(publisher),
            runners: Mutex::new(HashMap::new()),
        }
    }

    fn lock_runners(&self) -> MutexGuard<'_, HashMap<ScheduleId, Arc<Runner<R, G, P>>>> {
        self.runners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn runner(&self, id: ScheduleId) -> Result<Arc<Runner<R, G, P>>, DayWindowError> {
        self.lock_runners().get(&id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Schedule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Create a schedule, persist it, and start its runner.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, schedule), fields(schedule_name = %schedule.name))]
    pub async fn create_schedule(&self, schedule: Schedule) -> Result<Schedule, DayWindowError> {
        schedule.validate()?;
        let schedule = self.repo.create(schedule).await?;

        let runner = Arc::new(ScheduleRunner::new(
            &schedule,
            Arc::clone(&self.repo),
            Arc::clone(&self.gateway),
            Arc::clone(&self.publisher),
        ));
        runner.start().await;
        self.lock_runners().insert(schedule.id, runner);

        Ok(schedule)
    }

    /// Look up a schedule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::NotFound`] when no schedule with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_schedule(&self, id: ScheduleId) -> Result<Schedule, DayWindowError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Schedule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all schedules.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, DayWindowError> {
        self.repo.get_all().await
    }

    /// The current derived state of a running schedule.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::NotFound`] when no runner exists for `id`.
    pub fn state_of(&self, id: ScheduleId) -> Result<Arc<ScheduleState>, DayWindowError> {
        Ok(self.runner(id)?.state())
    }

    /// The `set_options` RPC: merge the provided fields, persist, reload
    /// the runner, and return the resulting full options map.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::NotFound`] for an unknown schedule id, or
    /// a storage error from persisting.
    #[tracing::instrument(skip(self, patch))]
    pub async fn set_options(
        &self,
        id: ScheduleId,
        patch: &OptionsPatch,
    ) -> Result<ScheduleOptions, DayWindowError> {
        let schedule = self.get_schedule(id).await?;

        let mut merged = schedule.options;
        patch.apply(&mut merged);
        self.repo.update_options(id, merged.clone()).await?;

        self.runner(id)?.reload().await?;
        Ok(merged)
    }

    /// Merge a single option key through the schedule's runner.
    ///
    /// This is the path the toggle and time views use.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::NotFound`] for an unknown schedule id, a
    /// validation error for a bad key or value, or a storage error.
    #[tracing::instrument(skip(self, value))]
    pub async fn set_option(
        &self,
        id: ScheduleId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), DayWindowError> {
        self.runner(id)?.set_option(key, value).await
    }

    /// Stop a schedule's runner and remove it from the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove_schedule(&self, id: ScheduleId) -> Result<(), DayWindowError> {
        let runner = self.lock_runners().remove(&id);
        if let Some(runner) = runner {
            runner.stop().await;
        }
        self.repo.delete(id).await
    }

    /// Release every runner's timers; used on shutdown.
    pub async fn stop_all(&self) {
        let runners: Vec<_> = self.lock_runners().values().cloned().collect();
        for runner in runners {
            runner.stop().await;
        }
    }
}
