//! Persisted schedule options and their merge rules.
//!
//! The options map is host-owned storage; this module defines its typed
//! shape, the option key names, the single-key merge used by toggle/time
//! views, and the partial patch accepted by the `set_options` RPC.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::ServiceCall;
use crate::error::{DayWindowError, ValidationError};
use crate::weekday::WEEKDAY_TAGS;

pub const OPT_ENABLED: &str = "enabled";
pub const OPT_START_TIME: &str = "start_time";
pub const OPT_END_TIME: &str = "end_time";
pub const OPT_WEEKDAYS: &str = "weekdays";
pub const OPT_START_ACTION: &str = "start_action";
pub const OPT_END_ACTION: &str = "end_action";

pub const DEFAULT_START_TIME: &str = "06:00:00";
pub const DEFAULT_END_TIME: &str = "18:00:00";

/// The persisted options of one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
    pub weekdays: Vec<String>,
    pub start_action: ServiceCall,
    pub end_action: ServiceCall,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            weekdays: WEEKDAY_TAGS.iter().map(ToString::to_string).collect(),
            start_action: ServiceCall::new("turn_on"),
            end_action: ServiceCall::new("turn_off"),
        }
    }
}

impl ScheduleOptions {
    /// Merge a single option key, leaving every other field untouched.
    ///
    /// This is the only mutation path used by the toggle and time views;
    /// it never re-derives one edge's time from the other.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownOptionKey`] for an unrecognized key
    /// and [`ValidationError::InvalidOptionValue`] when the value does not
    /// decode to the key's type.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), DayWindowError> {
        match key {
            OPT_ENABLED => self.enabled = decode(OPT_ENABLED, value)?,
            OPT_START_TIME => self.start_time = decode(OPT_START_TIME, value)?,
            OPT_END_TIME => self.end_time = decode(OPT_END_TIME, value)?,
            OPT_WEEKDAYS => self.weekdays = decode(OPT_WEEKDAYS, value)?,
            OPT_START_ACTION => self.start_action = decode(OPT_START_ACTION, value)?,
            OPT_END_ACTION => self.end_action = decode(OPT_END_ACTION, value)?,
            other => return Err(ValidationError::UnknownOptionKey(other.to_string()).into()),
        }
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    key: &'static str,
    value: Value,
) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|_| ValidationError::InvalidOptionValue { key })
}

/// Partial options update accepted by the `set_options` RPC.
///
/// Only the provided fields are merged. Empty-string times coerce to the
/// defaults; an explicitly empty weekday list is stored as-is and means
/// the schedule fires on no day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_action: Option<ServiceCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_action: Option<ServiceCall>,
}

impl OptionsPatch {
    /// Merge the provided fields into `options`.
    pub fn apply(&self, options: &mut ScheduleOptions) {
        if let Some(enabled) = self.enabled {
            options.enabled = enabled;
        }
        if let Some(start) = &self.start_time {
            options.start_time = coerce_time(start, DEFAULT_START_TIME);
        }
        if let Some(end) = &self.end_time {
            options.end_time = coerce_time(end, DEFAULT_END_TIME);
        }
        if let Some(weekdays) = &self.weekdays {
            options.weekdays = weekdays.clone();
        }
        if let Some(call) = &self.start_action {
            options.start_action = call.clone();
        }
        if let Some(call) = &self.end_action {
            options.end_action = call.clone();
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.weekdays.is_none()
            && self.start_action.is_none()
            && self.end_action.is_none()
    }
}

fn coerce_time(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
