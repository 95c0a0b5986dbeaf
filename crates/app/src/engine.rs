//! Scheduler engine — owns the two live daily timers of one schedule.
//!
//! A [`ScheduleRunner`] keeps the derived [`ScheduleState`] as an atomically
//! swapped snapshot: every reconfiguration builds a complete new state and
//! replaces the old one in a single assignment, so a timer callback can
//! never read a half-updated schedule. Control-plane operations
//! (`start`/`stop`/`reload`/`set_option`) serialize on one async mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{Datelike, Local, Weekday};
use tokio::task::JoinHandle;

use daywindow_domain::error::{DayWindowError, NotFoundError};
use daywindow_domain::event::ScheduleEvent;
use daywindow_domain::id::ScheduleId;
use daywindow_domain::schedule::Schedule;
use daywindow_domain::state::{Edge, ScheduleState};

use crate::dispatch;
use crate::ports::{DeviceGateway, ScheduleRepository, UpdatePublisher};

/// The scheduler engine for one configured schedule.
///
/// `Stopped` ⇄ `Running`: while running, exactly one timer per edge is
/// armed; `stop` releases both and is idempotent.
pub struct ScheduleRunner<R, G, P> {
    inner: Arc<RunnerInner<R, G, P>>,
    /// Serializes control-plane mutations so a reload can never interleave
    /// with a concurrent `set_option`.
    control: tokio::sync::Mutex<()>,
}

struct RunnerInner<R, G, P> {
    id: ScheduleId,
    name: String,
    /// Immutable after creation; changing targets means a new schedule.
    targets: Vec<String>,
    repo: R,
    gateway: G,
    publisher: P,
    /// Current snapshot; replaced wholesale, never mutated in place.
    state: Mutex<Arc<ScheduleState>>,
    timers: Mutex<Option<TimerPair>>,
}

struct TimerPair {
    start: JoinHandle<()>,
    end: JoinHandle<()>,
}

impl<R, G, P> ScheduleRunner<R, G, P>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    /// Create a runner in the `Stopped` state with a freshly derived snapshot.
    pub fn new(schedule: &Schedule, repo: R, gateway: G, publisher: P) -> Self {
        Self {
            inner: Arc::new(RunnerInner {
                id: schedule.id,
                name: schedule.name.clone(),
                targets: schedule.targets.clone(),
                repo,
                gateway,
                publisher,
                state: Mutex::new(Arc::new(ScheduleState::derive(schedule))),
                timers: Mutex::new(None),
            }),
            control: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn id(&self) -> ScheduleId {
        self.inner.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.inner.targets
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<ScheduleState> {
        self.inner.snapshot()
    }

    /// Whether the timer pair is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lock_timers().is_some()
    }

    /// `Stopped` → `Running`: arm both daily timers. No-op when running.
    pub async fn start(&self) {
        let _guard = self.control.lock().await;
        self.inner.arm_timers();
        tracing::info!(schedule = %self.inner.name, "scheduler started");
    }

    /// `Running` → `Stopped`: release both timers. Idempotent.
    pub async fn stop(&self) {
        let _guard = self.control.lock().await;
        if self.inner.release_timers() {
            tracing::info!(schedule = %self.inner.name, "scheduler stopped");
        }
    }

    /// Re-derive state from the repository, swap the snapshot, and re-arm
    /// the timers if running. Publishes a `Reloaded` notification.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::NotFound`] when the schedule no longer
    /// exists in the repository, or a storage error from the read.
    pub async fn reload(&self) -> Result<(), DayWindowError> {
        let _guard = self.control.lock().await;
        let schedule = self.load().await?;
        self.inner.apply(&schedule);
        self.inner.notify_reloaded().await;
        Ok(())
    }

    /// Merge a single option key, persist, rebuild, and re-arm.
    ///
    /// The rebuild derives from the merged options only — never from a
    /// blind re-read that could copy one edge's time onto the other.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown key or wrongly typed
    /// value, [`DayWindowError::NotFound`] when the schedule is gone, or a
    /// storage error from persisting.
    pub async fn set_option(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), DayWindowError> {
        let _guard = self.control.lock().await;
        let mut schedule = self.load().await?;
        schedule.options.set(key, value)?;
        let schedule = self
            .inner
            .repo
            .update_options(self.inner.id, schedule.options)
            .await?;
        self.inner.apply(&schedule);
        self.inner.notify_reloaded().await;
        Ok(())
    }

    /// Fire one edge, applying the enabled/weekday gate.
    ///
    /// Never returns an error: gated-off firings are a no-op and device
    /// failures stay inside dispatch.
    pub async fn handle_edge(&self, edge: Edge, today: Weekday) {
        self.inner.handle_edge(edge, today).await;
    }

    async fn load(&self) -> Result<Schedule, DayWindowError> {
        self.inner
            .repo
            .get_by_id(self.inner.id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Schedule",
                    id: self.inner.id.to_string(),
                }
                .into()
            })
    }
}

impl<R, G, P> RunnerInner<R, G, P>
where
    R: ScheduleRepository + Send + Sync + 'static,
    G: DeviceGateway + Send + Sync + 'static,
    P: UpdatePublisher + Send + Sync + 'static,
{
    fn snapshot(&self) -> Arc<ScheduleState> {
        Arc::clone(&self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn lock_timers(&self) -> MutexGuard<'_, Option<TimerPair>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in a freshly derived snapshot and re-arm if running.
    fn apply(self: &Arc<Self>, schedule: &Schedule) {
        let was_running = self.release_timers();
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = Arc::new(ScheduleState::derive(schedule));
        }
        if was_running {
            self.arm_timers();
        }
    }

    fn release_timers(&self) -> bool {
        match self.lock_timers().take() {
            Some(pair) => {
                pair.start.abort();
                pair.end.abort();
                true
            }
            None => false,
        }
    }

    fn arm_timers(self: &Arc<Self>) {
        let mut timers = self.lock_timers();
        if timers.is_some() {
            return;
        }
        *timers = Some(TimerPair {
            start: self.spawn_edge_timer(Edge::Start),
            end: self.spawn_edge_timer(Edge::End),
        });
    }

    fn spawn_edge_timer(self: &Arc<Self>, edge: Edge) -> JoinHandle<()> {
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let at = inner.snapshot().time_of(edge);
                let now = Local::now();
                let next = at.next_occurrence_after(now);
                let wait = (next - now).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;

                inner.handle_edge(edge, Local::now().weekday()).await;

                // Step past the matching second so an early wake-up cannot
                // fire twice within it.
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        })
    }

    async fn handle_edge(&self, edge: Edge, today: Weekday) {
        let state = self.snapshot();
        if !state.allows(today) {
            tracing::debug!(schedule = %self.name, %edge, "edge gated off");
            return;
        }
        tracing::info!(schedule = %self.name, %edge, "edge fired");
        dispatch::dispatch(&self.gateway, &state, edge, &self.targets).await;
        // Notification is observability only; a full bus never blocks an edge.
        let _ = self
            .publisher
            .publish(ScheduleEvent::edge_fired(self.id, edge))
            .await;
    }

    async fn notify_reloaded(&self) {
        let _ = self
            .publisher
            .publish(ScheduleEvent::reloaded(self.id))
            .await;
    }
}
