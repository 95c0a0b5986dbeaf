//! Active-weekday set.
//!
//! Weekdays are tagged `"mon"` through `"sun"` in the persisted options;
//! the numeric order matches [`chrono::Weekday::num_days_from_monday`].
//! An empty set means the schedule fires on **no** day — it never widens
//! to "all days".

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Option tags in monday-first order.
pub const WEEKDAY_TAGS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Set of active weekdays, stored as a bitmask over mon..sun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The set containing no day.
    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set containing all seven days.
    #[must_use]
    pub fn full() -> Self {
        Self(0b0111_1111)
    }

    /// Build a set from option tags; unknown tags are ignored.
    #[must_use]
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut set = Self::empty();
        for tag in tags {
            if let Some(idx) = WEEKDAY_TAGS.iter().position(|t| *t == tag.as_ref()) {
                set.0 |= 1 << idx;
            }
        }
        set
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.num_days_from_monday());
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The tags of the contained days, in monday-first order.
    #[must_use]
    pub fn tags(self) -> Vec<&'static str> {
        WEEKDAY_TAGS
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.0 & (1 << idx) != 0)
            .map(|(_, tag)| *tag)
            .collect()
    }
}

impl From<Vec<String>> for WeekdaySet {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(&tags)
    }
}

impl From<WeekdaySet> for Vec<String> {
    fn from(set: WeekdaySet) -> Self {
        set.tags().into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_DAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    #[test]
    fn should_contain_no_day_when_empty() {
        let set = WeekdaySet::empty();
        for day in ALL_DAYS {
            assert!(!set.contains(day));
        }
        assert!(set.is_empty());
    }

    #[test]
    fn should_contain_every_day_when_full() {
        let set = WeekdaySet::full();
        for day in ALL_DAYS {
            assert!(set.contains(day));
        }
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn should_build_from_tags() {
        let set = WeekdaySet::from_tags(&["mon", "fri"]);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Sat));
    }

    #[test]
    fn should_ignore_unknown_tags() {
        let set = WeekdaySet::from_tags(&["mon", "someday", ""]);
        assert_eq!(set.tags(), vec!["mon"]);
    }

    #[test]
    fn should_insert_and_remove_days() {
        let mut set = WeekdaySet::empty();
        set.insert(Weekday::Wed);
        assert!(set.contains(Weekday::Wed));
        set.remove(Weekday::Wed);
        assert!(set.is_empty());
    }

    #[test]
    fn should_list_tags_in_monday_first_order() {
        let set = WeekdaySet::from_tags(&["sun", "tue", "mon"]);
        assert_eq!(set.tags(), vec!["mon", "tue", "sun"]);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let set = WeekdaySet::from_tags(&["mon", "wed", "sun"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["mon","wed","sun"]"#);
        let parsed: WeekdaySet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn should_deserialize_empty_list_as_empty_set() {
        let parsed: WeekdaySet = serde_json::from_str("[]").unwrap();
        assert!(parsed.is_empty());
    }
}
