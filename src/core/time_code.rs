use crate::core::error::MatchError;
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_HOUR: u16 = 23;
const MAX_MINUTE: u16 = 59;

/// Time of day packed as `hour * 100 + minute`, e.g. `1430` for 14:30.
///
/// The packed value is the single source of truth; the "H:MM" form is
/// derived from it, so the two representations can never drift apart.
/// Ordering follows the packed value, which is chronological within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeCode", into = "u16")]
pub struct TimeCode(u16);

/// Either accepted input shape for a [`TimeCode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimeCode {
    Packed(i64),
    Formatted(String),
}

impl TimeCode {
    pub const MIDNIGHT: TimeCode = TimeCode(0);
    pub const END_OF_DAY: TimeCode = TimeCode(MAX_HOUR * 100 + MAX_MINUTE);

    /// Parse either representation
    pub fn parse(value: RawTimeCode) -> Result<Self, MatchError> {
        match value {
            RawTimeCode::Packed(packed) => Self::from_packed(packed),
            RawTimeCode::Formatted(text) => text.parse(),
        }
    }

    /// Build from a packed `hhmm` integer, rejecting hours above 23 and
    /// minutes above 59
    pub fn from_packed(packed: i64) -> Result<Self, MatchError> {
        if !(0..=i64::from(Self::END_OF_DAY.0)).contains(&packed) {
            return Err(MatchError::InvalidTimeFormat(packed.to_string()));
        }
        let hour = (packed / 100) as u16;
        let minute = (packed % 100) as u16;
        Self::from_hm(hour, minute).ok_or_else(|| MatchError::InvalidTimeFormat(packed.to_string()))
    }

    /// Time of day of an instant, read on the UTC clock
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self((instant.hour() * 100 + instant.minute()) as u16)
    }

    fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > MAX_HOUR || minute > MAX_MINUTE {
            return None;
        }
        Some(Self(hour * 100 + minute))
    }

    pub fn hour(self) -> u16 {
        self.0 / 100
    }

    pub fn minute(self) -> u16 {
        self.0 % 100
    }

    pub fn to_packed(self) -> u16 {
        self.0
    }

    /// "H:MM" form: hour is not padded, minutes always are
    pub fn to_formatted(self) -> String {
        self.to_string()
    }

    /// Advance by `minutes`, carrying whole hours.
    ///
    /// Does not roll over into the next day: any result past 23:59 clamps
    /// to 23:59.
    pub fn add_minutes(self, minutes: u32) -> Self {
        let total = u64::from(self.minute()) + u64::from(minutes);
        let hour = u64::from(self.hour()) + total / 60;
        if hour > u64::from(MAX_HOUR) {
            return Self::END_OF_DAY;
        }
        Self((hour * 100 + total % 60) as u16)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeCode {
    type Err = MatchError;

    /// Accepts `digits*:2digits`; an empty hour part reads as hour 0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MatchError::InvalidTimeFormat(s.to_string());

        let (hour_part, minute_part) = s.split_once(':').ok_or_else(invalid)?;
        if !hour_part.bytes().all(|b| b.is_ascii_digit())
            || minute_part.len() != 2
            || !minute_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour = if hour_part.is_empty() {
            0
        } else {
            hour_part.parse::<u16>().map_err(|_| invalid())?
        };
        let minute = minute_part.parse::<u16>().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<RawTimeCode> for TimeCode {
    type Error = MatchError;

    fn try_from(value: RawTimeCode) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TimeCode> for u16 {
    fn from(value: TimeCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_parse_formatted() {
        let t: TimeCode = "14:30".parse().unwrap();
        assert_eq!(t.to_packed(), 1430);
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);

        let early: TimeCode = "9:05".parse().unwrap();
        assert_eq!(early.to_packed(), 905);
    }

    #[test]
    fn test_parse_accepts_padded_and_empty_hour() {
        assert_eq!("09:05".parse::<TimeCode>().unwrap().to_packed(), 905);
        assert_eq!(":45".parse::<TimeCode>().unwrap().to_packed(), 45);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for bad in ["", "1430", "14:3", "14:300", "a4:30", "14-30", "14:3x", "24:00", "12:60"] {
            assert!(
                matches!(bad.parse::<TimeCode>(), Err(MatchError::InvalidTimeFormat(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_from_packed_bounds() {
        assert_eq!(TimeCode::from_packed(0).unwrap(), TimeCode::MIDNIGHT);
        assert_eq!(TimeCode::from_packed(2359).unwrap(), TimeCode::END_OF_DAY);
        assert!(TimeCode::from_packed(2400).is_err());
        assert!(TimeCode::from_packed(1260).is_err());
        assert!(TimeCode::from_packed(-5).is_err());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(TimeCode::from_packed(905).unwrap().to_formatted(), "9:05");
        assert_eq!(TimeCode::from_packed(0).unwrap().to_formatted(), "0:00");
        assert_eq!(TimeCode::from_packed(1430).unwrap().to_string(), "14:30");
    }

    #[test]
    fn test_add_minutes_carries_hours() {
        let t = TimeCode::from_packed(1450).unwrap();
        assert_eq!(t.add_minutes(20).to_packed(), 1510);
        assert_eq!(t.add_minutes(0), t);
        assert_eq!(t.add_minutes(130).to_packed(), 1700);
    }

    #[test]
    fn test_add_minutes_clamps_at_end_of_day() {
        let late = TimeCode::from_packed(2340).unwrap();
        assert_eq!(late.add_minutes(30), TimeCode::END_OF_DAY);
        assert_eq!(late.add_minutes(u32::MAX), TimeCode::END_OF_DAY);
        // 23:59 itself is reachable without clamping
        assert_eq!(late.add_minutes(19).to_packed(), 2359);
    }

    #[test]
    fn test_from_instant_uses_utc_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 14, 7, 59).unwrap();
        assert_eq!(TimeCode::from_instant(instant).to_packed(), 1407);
    }

    #[test]
    fn test_serde_accepts_both_shapes() {
        let packed: TimeCode = serde_json::from_str("1430").unwrap();
        let text: TimeCode = serde_json::from_str("\"14:30\"").unwrap();
        assert_eq!(packed, text);
        assert_eq!(serde_json::to_string(&packed).unwrap(), "1430");

        assert!(serde_json::from_str::<TimeCode>("\"25:00\"").is_err());
        assert!(serde_json::from_str::<TimeCode>("1299").is_err());
    }

    proptest! {
        #[test]
        fn prop_formatted_round_trip(hour in 0u16..24, minute in 0u16..60) {
            let text = format!("{:02}:{:02}", hour, minute);
            let parsed: TimeCode = text.parse().unwrap();
            prop_assert_eq!(parsed.to_formatted(), format!("{}:{:02}", hour, minute));
            prop_assert_eq!(parsed.to_formatted().parse::<TimeCode>().unwrap(), parsed);
        }

        #[test]
        fn prop_packed_round_trip(hour in 0i64..24, minute in 0i64..60) {
            let packed = hour * 100 + minute;
            prop_assert_eq!(i64::from(TimeCode::from_packed(packed).unwrap().to_packed()), packed);
        }

        #[test]
        fn prop_add_minutes_never_exceeds_end_of_day(packed in 0i64..2360, minutes in 0u32..5000) {
            if let Ok(t) = TimeCode::from_packed(packed) {
                let advanced = t.add_minutes(minutes);
                prop_assert!(advanced.hour() <= 23);
                prop_assert!(advanced.minute() <= 59);
                prop_assert!(advanced >= t);
            }
        }
    }
}
