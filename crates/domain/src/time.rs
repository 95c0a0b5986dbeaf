//! Time-of-day values and timestamp helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, LocalResult, NaiveTime, TimeZone, Utc};

/// UTC timestamp used for event times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A wall-clock time of day (hour, minute, second), no date component.
///
/// The canonical textual form is zero-padded `"HH:MM:SS"`; parsing also
/// accepts `"HH"` and `"HH:MM"` with the missing components defaulting
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting out-of-range components.
    #[must_use]
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }

    #[must_use]
    pub fn second(self) -> u8 {
        self.second
    }

    /// Parse `"HH"`, `"HH:MM"`, or `"HH:MM:SS"`.
    ///
    /// Returns `None` on non-numeric components, out-of-range values,
    /// or more than three fields.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = [0u8; 3];
        let mut count = 0;
        for part in text.split(':') {
            if count == fields.len() {
                return None;
            }
            fields[count] = part.parse().ok()?;
            count += 1;
        }
        Self::new(fields[0], fields[1], fields[2])
    }

    /// Parse `text`, silently parsing `fallback` instead on any failure.
    ///
    /// # Panics
    ///
    /// Panics when `fallback` itself is malformed; passing a malformed
    /// fallback is a caller contract violation, not a recoverable error.
    #[must_use]
    pub fn parse_or(text: &str, fallback: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| {
            Self::parse(fallback).expect("fallback time string must be well-formed")
        })
    }

    /// The next local instant matching this time of day, strictly after `now`.
    ///
    /// Skips forward a day when today's occurrence has already passed or does
    /// not exist locally (DST gap); an ambiguous local time resolves to its
    /// earliest mapping.
    #[must_use]
    pub fn next_occurrence_after(self, now: DateTime<Local>) -> DateTime<Local> {
        let time = NaiveTime::from_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
        .expect("components are range-checked on construction");

        let mut date = now.date_naive();
        loop {
            match Local.from_local_datetime(&date.and_time(time)) {
                LocalResult::Single(at) | LocalResult::Ambiguous(at, _) if at > now => return at,
                _ => {}
            }
            date = date
                .succ_opt()
                .expect("date arithmetic stays far from the calendar limits");
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Error returned when strict parsing of a [`TimeOfDay`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeOfDayError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseTimeOfDayError(s.to_string()))
    }
}

impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
