//! Weekly coverage checks for interval datasets.
//!
//! Each [`IntervalRecord`] describes a span between two positions in the
//! repeating week. A span is expanded into hourly timestamps starting at its
//! start instant and stepping one hour while the timestamp does not pass the
//! end instant, so the end is inclusive. Each timestamp occupies the hour slot
//! it falls in. A span whose end precedes its start wraps past Sunday into the
//! following week.
//!
//! A `(id, id_2)` group is complete when the union of its slots covers all
//! [`HOURS_PER_WEEK`] hours.

use std::collections::{BTreeMap, BTreeSet};

use crate::LocationId;
use crate::calendar::{SECONDS_PER_WEEK, TimestampError, WeekInstant};

/// Hourly slots in a week.
pub const HOURS_PER_WEEK: usize = 24 * 7;

const SECONDS_PER_HOUR: i64 = 3_600;

/// Grouping key of an interval dataset.
pub type CoverageKey<L> = (L, L);

/// A raw interval row, with day and time fields as they appear in the data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalRecord<L> {
    /// First grouping identifier.
    pub id: L,
    /// Second grouping identifier.
    pub id_2: L,
    /// Day name the interval starts on.
    #[cfg_attr(feature = "serde", serde(rename = "startDay"))]
    pub start_day: String,
    /// `HH:MM:SS` the interval starts at.
    #[cfg_attr(feature = "serde", serde(rename = "startTime"))]
    pub start_time: String,
    /// Day name the interval ends on.
    #[cfg_attr(feature = "serde", serde(rename = "endDay"))]
    pub end_day: String,
    /// `HH:MM:SS` the interval ends at.
    #[cfg_attr(feature = "serde", serde(rename = "endTime"))]
    pub end_time: String,
}

impl<L: LocationId> IntervalRecord<L> {
    /// Construct a record from raw fields.
    pub fn new(
        id: L,
        id_2: L,
        start: (&str, &str),
        end: (&str, &str),
    ) -> Self {
        Self {
            id,
            id_2,
            start_day: start.0.to_owned(),
            start_time: start.1.to_owned(),
            end_day: end.0.to_owned(),
            end_time: end.1.to_owned(),
        }
    }

    /// Hour-of-week slots (`0..168`, Monday 00:00 first) touched by the span.
    ///
    /// # Errors
    /// Returns [`TimestampError`] when a day or time field is malformed.
    pub fn hourly_slots(&self) -> Result<BTreeSet<i64>, TimestampError> {
        let start = WeekInstant::parse(&self.start_day, &self.start_time)?.second_of_week();
        let mut end = WeekInstant::parse(&self.end_day, &self.end_time)?.second_of_week();
        if end < start {
            end += SECONDS_PER_WEEK;
        }
        let slots = (0..)
            .map(|step| start + step * SECONDS_PER_HOUR)
            .take_while(|&timestamp| timestamp <= end)
            .map(|timestamp| (timestamp / SECONDS_PER_HOUR).rem_euclid(168))
            .collect();
        Ok(slots)
    }
}

/// Report, per `(id, id_2)` group, whether its intervals cover every hour of
/// the week.
///
/// `true` means complete. Groups are returned in ascending key order.
///
/// # Examples
/// ```
/// use waymark_core::{IntervalRecord, check_full_week_coverage};
///
/// # fn main() -> Result<(), waymark_core::TimestampError> {
/// let records = vec![
///     IntervalRecord::new(1_u64, 2, ("Monday", "00:00:00"), ("Sunday", "23:59:59")),
///     IntervalRecord::new(3, 4, ("Monday", "00:00:00"), ("Friday", "23:59:59")),
/// ];
/// let coverage = check_full_week_coverage(&records)?;
/// assert_eq!(coverage.get(&(1, 2)), Some(&true));
/// assert_eq!(coverage.get(&(3, 4)), Some(&false));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Returns [`TimestampError`] for the first record with a malformed day or
/// time field.
pub fn check_full_week_coverage<L: LocationId>(
    intervals: &[IntervalRecord<L>],
) -> Result<BTreeMap<CoverageKey<L>, bool>, TimestampError> {
    let mut groups: BTreeMap<CoverageKey<L>, BTreeSet<i64>> = BTreeMap::new();
    for record in intervals {
        let slots = record.hourly_slots()?;
        groups
            .entry((record.id.clone(), record.id_2.clone()))
            .or_default()
            .extend(slots);
    }
    Ok(groups
        .into_iter()
        .map(|(key, slots)| (key, slots.len() == HOURS_PER_WEEK))
        .collect())
}
