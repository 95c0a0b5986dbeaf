//! Schedule update events — the change-notification payload.
//!
//! One `Reloaded` event is published every time a schedule's state is
//! rebuilt, so view components can refresh; `EdgeFired` is observability
//! for the daily firings.

use serde::{Deserialize, Serialize};

use crate::id::ScheduleId;
use crate::state::Edge;
use crate::time::Timestamp;

/// What happened to the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleEventKind {
    /// Schedule state was rebuilt from the persisted options.
    Reloaded,
    /// A daily edge fired and its actions were dispatched.
    EdgeFired { edge: Edge },
}

/// A notification keyed by schedule identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub schedule_id: ScheduleId,
    #[serde(flatten)]
    pub kind: ScheduleEventKind,
    pub at: Timestamp,
}

impl ScheduleEvent {
    /// A `Reloaded` event stamped with the current time.
    #[must_use]
    pub fn reloaded(schedule_id: ScheduleId) -> Self {
        Self {
            schedule_id,
            kind: ScheduleEventKind::Reloaded,
            at: crate::time::now(),
        }
    }

    /// An `EdgeFired` event stamped with the current time.
    #[must_use]
    pub fn edge_fired(schedule_id: ScheduleId, edge: Edge) -> Self {
        Self {
            schedule_id,
            kind: ScheduleEventKind::EdgeFired { edge },
            at: crate::time::now(),
        }
    }
}
