//! Day-of-week and time-of-day handling shared by tolls and coverage.
//!
//! Day names and `HH:MM:SS` strings arrive untyped from tabular input; the
//! parsers here turn them into a [`WeekInstant`] or report a
//! [`TimestampError`].
//!
//! # Examples
//! ```
//! use waymark_core::{Day, WeekInstant};
//!
//! # fn main() -> Result<(), waymark_core::TimestampError> {
//! let instant = WeekInstant::parse("Tuesday", "01:30:00")?;
//! assert_eq!(instant.day, Day::Tuesday);
//! assert_eq!(instant.second_of_week(), 86_400 + 5_400);
//! # Ok(())
//! # }
//! ```

use jiff::civil::{DateTime, Time, Weekday};
use thiserror::Error;

/// Seconds in a day.
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Seconds in a week.
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Errors raised for unparsable or inconsistent day/time fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The value is not a recognised day name.
    #[error("'{value}' is not a day of the week")]
    MalformedDay {
        /// The rejected input.
        value: String,
    },
    /// The value is not a valid time of day.
    #[error("'{value}' is not a valid time of day: {reason}")]
    MalformedTime {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The value is not a valid civil date and time.
    #[error("'{value}' is not a valid date and time: {reason}")]
    MalformedDateTime {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A span ends before it starts.
    #[error("span ends at {end} before it starts at {start}")]
    EndBeforeStart {
        /// Start of the span.
        start: String,
        /// End of the span.
        end: String,
    },
}

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// Every day in week order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Return the day as its English name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Zero-based offset from Monday.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Report whether the day falls on a weekend.
    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Day {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(TimestampError::MalformedDay {
                value: s.to_owned(),
            }),
        }
    }
}

/// Parse an `HH:MM:SS` time of day.
///
/// # Errors
/// Returns [`TimestampError::MalformedTime`] when `value` is not a valid
/// civil time.
pub fn parse_time_of_day(value: &str) -> Result<Time, TimestampError> {
    value
        .trim()
        .parse::<Time>()
        .map_err(|err| TimestampError::MalformedTime {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// Parse an ISO 8601 civil date and time such as `2024-04-01T10:30:00`.
///
/// # Errors
/// Returns [`TimestampError::MalformedDateTime`] when `value` cannot be
/// parsed.
pub fn parse_datetime(value: &str) -> Result<DateTime, TimestampError> {
    value
        .trim()
        .parse::<DateTime>()
        .map_err(|err| TimestampError::MalformedDateTime {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// A position within the repeating seven-day week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekInstant {
    /// Day of the week.
    pub day: Day,
    /// Time of day.
    pub time: Time,
}

impl WeekInstant {
    /// Construct an instant from typed parts.
    #[must_use]
    pub const fn new(day: Day, time: Time) -> Self {
        Self { day, time }
    }

    /// Parse a day name and an `HH:MM:SS` time.
    ///
    /// # Errors
    /// Returns [`TimestampError`] when either part is malformed.
    pub fn parse(day: &str, time: &str) -> Result<Self, TimestampError> {
        Ok(Self {
            day: day.parse()?,
            time: parse_time_of_day(time)?,
        })
    }

    /// Whole seconds elapsed since Monday 00:00:00.
    #[must_use]
    pub fn second_of_week(&self) -> i64 {
        let time = &self.time;
        i64::from(self.day.index()) * SECONDS_PER_DAY
            + i64::from(time.hour()) * 3_600
            + i64::from(time.minute()) * 60
            + i64::from(time.second())
    }
}

impl From<DateTime> for WeekInstant {
    fn from(datetime: DateTime) -> Self {
        Self {
            day: datetime.weekday().into(),
            time: datetime.time(),
        }
    }
}

impl std::fmt::Display for WeekInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("Monday", Day::Monday)]
    #[case("sunday", Day::Sunday)]
    #[case(" FRIDAY ", Day::Friday)]
    #[case("Wed", Day::Wednesday)]
    fn parses_day_names(#[case] input: &str, #[case] expected: Day) {
        assert_eq!(Day::from_str(input), Ok(expected));
    }

    #[rstest]
    fn display_matches_as_str() {
        assert_eq!(Day::Thursday.to_string(), Day::Thursday.as_str());
    }

    #[rstest]
    fn rejects_unknown_day() {
        let err = Day::from_str("Funday").expect_err("unknown day");
        assert_eq!(
            err,
            TimestampError::MalformedDay {
                value: "Funday".into()
            }
        );
    }

    #[rstest]
    #[case("25:00:00")]
    #[case("noon")]
    #[case("")]
    fn rejects_malformed_times(#[case] input: &str) {
        let err = parse_time_of_day(input).expect_err("malformed time");
        assert!(matches!(err, TimestampError::MalformedTime { .. }));
    }

    #[rstest]
    fn parses_time_of_day() {
        assert_eq!(parse_time_of_day("23:59:59"), Ok(time(23, 59, 59, 0)));
    }

    #[rstest]
    #[case(Day::Monday, time(0, 0, 0, 0), 0)]
    #[case(Day::Sunday, time(23, 59, 59, 0), SECONDS_PER_WEEK - 1)]
    #[case(Day::Wednesday, time(12, 0, 0, 0), 2 * SECONDS_PER_DAY + 43_200)]
    fn second_of_week_counts_from_monday(
        #[case] day: Day,
        #[case] at: Time,
        #[case] expected: i64,
    ) {
        assert_eq!(WeekInstant::new(day, at).second_of_week(), expected);
    }

    #[rstest]
    fn datetime_maps_onto_week() {
        let datetime = parse_datetime("2024-04-06T07:15:00").expect("valid datetime");
        let instant = WeekInstant::from(datetime);
        assert_eq!(instant.day, Day::Saturday);
        assert_eq!(instant.time, time(7, 15, 0, 0));
    }

    #[rstest]
    fn rejects_malformed_datetime() {
        let err = parse_datetime("2024-13-40T00:00:00").expect_err("malformed datetime");
        assert!(matches!(err, TimestampError::MalformedDateTime { .. }));
    }

    #[rstest]
    fn weekday_conversion_preserves_day() {
        for (weekday, day) in [
            (Weekday::Monday, Day::Monday),
            (Weekday::Saturday, Day::Saturday),
            (Weekday::Sunday, Day::Sunday),
        ] {
            assert_eq!(Day::from(weekday), day);
        }
    }
}
