use crate::core::error::MatchError;
use crate::core::time_code::TimeCode;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Day key of a weekly schedule, numbered from Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Weekday of the UTC calendar day containing `instant`.
    ///
    /// Always UTC, whatever the requester's local zone: a 23:30 request in
    /// UTC-5 lands on the following day here.
    pub fn of_instant(instant: DateTime<Utc>) -> Self {
        Self::from(instant.weekday())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Sun => "sun",
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        Self::ALL[value.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recurring slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeWindow")]
pub struct TimeWindow {
    #[serde(rename = "startTime")]
    pub start_time: TimeCode,
    #[serde(rename = "endTime")]
    pub end_time: TimeCode,
}

impl TimeWindow {
    /// Build a same-day window; windows crossing midnight are not representable
    pub fn new(start_time: TimeCode, end_time: TimeCode) -> Result<Self, MatchError> {
        if start_time >= end_time {
            return Err(MatchError::InvalidTimeWindow {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self { start_time, end_time })
    }
}

/// Wire shape of a [`TimeWindow`] before the start/end check
#[derive(Deserialize)]
struct RawTimeWindow {
    #[serde(rename = "startTime")]
    start_time: TimeCode,
    #[serde(rename = "endTime")]
    end_time: TimeCode,
}

impl TryFrom<RawTimeWindow> for TimeWindow {
    type Error = MatchError;

    fn try_from(raw: RawTimeWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start_time, raw.end_time)
    }
}

/// Recurring weekly availability of one counsellor.
///
/// Windows within a day are kept in insertion order and may overlap; the
/// schedule owner is responsible for data quality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Weekday, Vec<TimeWindow>>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for adding a window to a day
    pub fn with_window(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.add_window(day, window);
        self
    }

    pub fn add_window(&mut self, day: Weekday, window: TimeWindow) {
        self.0.entry(day).or_default().push(window);
    }

    /// Windows scheduled on `day`, empty when the day has no entry
    pub fn windows(&self, day: Weekday) -> &[TimeWindow] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any window on `day` starts at or after `from`
    pub fn has_opening_from(&self, day: Weekday, from: TimeCode) -> bool {
        self.windows(day).iter().any(|w| w.start_time >= from)
    }

    /// Earliest window start on `day` strictly after `after`
    pub fn earliest_opening_after(&self, day: Weekday, after: TimeCode) -> Option<TimeCode> {
        self.windows(day)
            .iter()
            .map(|w| w.start_time)
            .filter(|start| *start > after)
            .min()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}
