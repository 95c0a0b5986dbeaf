//! Derived schedule state — rebuilt wholesale on every options change.
//!
//! [`ScheduleState`] is the engine's working snapshot. It is never patched
//! field by field: any configuration change derives a complete new value
//! that replaces the old one in a single assignment, so a timer callback
//! can never observe a half-updated schedule.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{DeviceFamily, ServiceCall};
use crate::options::{DEFAULT_END_TIME, DEFAULT_START_TIME};
use crate::schedule::Schedule;
use crate::time::TimeOfDay;
use crate::weekday::WeekdaySet;

/// One of the two daily trigger moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    End,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// The in-memory record the scheduler engine fires from.
///
/// Edge actions are resolved once per device family at derivation time and
/// cached here, keyed by the literal target prefix, so the hot path does no
/// re-resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleState {
    pub enabled: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub weekdays: WeekdaySet,
    pub start_actions: BTreeMap<String, ServiceCall>,
    pub end_actions: BTreeMap<String, ServiceCall>,
}

impl ScheduleState {
    /// Derive a complete state from a schedule's options and targets.
    ///
    /// Malformed time strings fall back to the defaults; targets without a
    /// family separator contribute no action entry (dispatch skips them).
    #[must_use]
    pub fn derive(schedule: &Schedule) -> Self {
        let opts = &schedule.options;

        let mut start_actions = BTreeMap::new();
        let mut end_actions = BTreeMap::new();
        for target in &schedule.targets {
            let Some((domain, _)) = target.split_once('.') else {
                continue;
            };
            if start_actions.contains_key(domain) {
                continue;
            }
            let family = DeviceFamily::from_tag(domain);
            start_actions.insert(domain.to_string(), family.reshape(&opts.start_action));
            end_actions.insert(domain.to_string(), family.reshape(&opts.end_action));
        }

        Self {
            enabled: opts.enabled,
            start: TimeOfDay::parse_or(&opts.start_time, DEFAULT_START_TIME),
            end: TimeOfDay::parse_or(&opts.end_time, DEFAULT_END_TIME),
            weekdays: WeekdaySet::from_tags(&opts.weekdays),
            start_actions,
            end_actions,
        }
    }

    /// The wall-clock time of the given edge.
    #[must_use]
    pub fn time_of(&self, edge: Edge) -> TimeOfDay {
        match edge {
            Edge::Start => self.start,
            Edge::End => self.end,
        }
    }

    /// The cached call for `edge` on the given family domain, if any.
    #[must_use]
    pub fn action_for(&self, edge: Edge, domain: &str) -> Option<&ServiceCall> {
        match edge {
            Edge::Start => self.start_actions.get(domain),
            Edge::End => self.end_actions.get(domain),
        }
    }

    /// Whether edges may fire on `day`.
    ///
    /// An empty weekday set allows no day; it never widens to "all days".
    #[must_use]
    pub fn allows(&self, day: chrono::Weekday) -> bool {
        self.enabled && self.weekdays.contains(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn schedule_with(options: crate::options::ScheduleOptions) -> Schedule {
        Schedule::builder()
            .name("Test schedule")
            .targets(["cover.kitchen", "cover.bedroom", "light.hall", "switch.pump"])
            .options(options)
            .build()
            .unwrap()
    }

    #[test]
    fn should_derive_defaults_from_default_options() {
        let state = ScheduleState::derive(&schedule_with(Default::default()));
        assert!(state.enabled);
        assert_eq!(state.start.to_string(), "06:00:00");
        assert_eq!(state.end.to_string(), "18:00:00");
        assert_eq!(state.weekdays, WeekdaySet::full());
    }

    #[test]
    fn should_cache_one_action_per_family_domain() {
        let state = ScheduleState::derive(&schedule_with(Default::default()));
        assert_eq!(state.start_actions.len(), 3);
        assert!(state.start_actions.contains_key("cover"));
        assert!(state.start_actions.contains_key("light"));
        assert!(state.start_actions.contains_key("switch"));
    }

    #[test]
    fn should_shape_edge_actions_per_family() {
        let options = crate::options::ScheduleOptions {
            start_action: ServiceCall::new("set_position").with("position", 40u64),
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));

        assert_eq!(
            state.action_for(Edge::Start, "cover").unwrap(),
            &ServiceCall::new("set_position").with("position", 40u64)
        );
        assert_eq!(
            state.action_for(Edge::Start, "light").unwrap(),
            &ServiceCall::new("turn_on")
        );
        assert_eq!(
            state.action_for(Edge::Start, "switch").unwrap(),
            &ServiceCall::new("turn_on")
        );
    }

    #[test]
    fn should_shape_end_actions_to_each_family_off_call() {
        let state = ScheduleState::derive(&schedule_with(Default::default()));
        assert_eq!(
            state.action_for(Edge::End, "cover").unwrap(),
            &ServiceCall::new("close")
        );
        assert_eq!(
            state.action_for(Edge::End, "light").unwrap(),
            &ServiceCall::new("turn_off")
        );
    }

    #[test]
    fn should_fall_back_to_default_times_on_malformed_options() {
        let options = crate::options::ScheduleOptions {
            start_time: "not-a-time".to_string(),
            end_time: "25:99".to_string(),
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));
        assert_eq!(state.start.to_string(), "06:00:00");
        assert_eq!(state.end.to_string(), "18:00:00");
    }

    #[test]
    fn should_never_allow_firing_with_empty_weekdays() {
        let options = crate::options::ScheduleOptions {
            weekdays: vec![],
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));

        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(!state.allows(day), "empty set must not fire on {day}");
        }
    }

    #[test]
    fn should_allow_every_day_with_full_weekdays() {
        let state = ScheduleState::derive(&schedule_with(Default::default()));
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(state.allows(day));
        }
    }

    #[test]
    fn should_not_allow_firing_when_disabled() {
        let options = crate::options::ScheduleOptions {
            enabled: false,
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));
        assert!(!state.allows(Weekday::Tue));
    }

    #[test]
    fn should_gate_on_weekday_membership() {
        let options = crate::options::ScheduleOptions {
            weekdays: ["mon", "tue", "wed", "thu", "fri"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));
        assert!(state.allows(Weekday::Tue));
        assert!(!state.allows(Weekday::Sat));
    }

    #[test]
    fn should_keep_end_before_start_as_independent_triggers() {
        // The window is two fixed daily triggers; end < start is legal and
        // is never reinterpreted as "next day".
        let options = crate::options::ScheduleOptions {
            start_time: "22:00:00".to_string(),
            end_time: "06:00:00".to_string(),
            ..Default::default()
        };
        let state = ScheduleState::derive(&schedule_with(options));
        assert_eq!(state.start.to_string(), "22:00:00");
        assert_eq!(state.end.to_string(), "06:00:00");
        assert!(state.end < state.start);
    }

    #[test]
    fn should_return_time_of_each_edge() {
        let state = ScheduleState::derive(&schedule_with(Default::default()));
        assert_eq!(state.time_of(Edge::Start).to_string(), "06:00:00");
        assert_eq!(state.time_of(Edge::End).to_string(), "18:00:00");
    }

    #[test]
    fn should_display_edges_in_lowercase() {
        assert_eq!(Edge::Start.to_string(), "start");
        assert_eq!(Edge::End.to_string(), "end");
    }
}
