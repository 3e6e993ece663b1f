//! Toll rates per vehicle class with calendar discounting.
//!
//! Pricing runs in two stages. [`calculate_toll_rates`] multiplies each edge's
//! base distance by the class coefficients from [`RateCoefficients`]. The
//! second stage applies a [`DiscountSchedule`] factor to every class value,
//! either by replicating each rate row across the schedule's fixed calendar
//! windows ([`expand_time_windows`]) or by pricing individual [`Trip`]s whose
//! own timestamps pick the factor ([`price_trips`]).
//!
//! # Examples
//! ```
//! use waymark_core::{
//!     DiscountSchedule, EdgeRecord, RateCoefficients, Trip, calculate_toll_rates, price_trips,
//! };
//!
//! # fn main() -> Result<(), waymark_core::TollError> {
//! let edges = vec![EdgeRecord::new(1_u64, 2, 10.0)];
//! let rates = calculate_toll_rates(&edges, &RateCoefficients::default());
//! assert_eq!(rates[0].rates.truck, 36.0);
//!
//! // 2024-04-03 is a Wednesday.
//! let trip = Trip::parse(1, 2, "2024-04-03T12:00:00", "2024-04-03T12:45:00")?;
//! let priced = price_trips(&rates, &[trip], &DiscountSchedule::default())?;
//! assert!((priced[0].rates.truck - 43.2).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

mod error;
mod schedule;
mod vehicle;

use std::collections::BTreeMap;

use jiff::civil::DateTime;

pub use error::TollError;
pub use schedule::{CalendarWindow, DiscountSchedule};
pub use vehicle::{RateCoefficients, VehicleClass, VehicleRates};

use crate::calendar::{TimestampError, WeekInstant, parse_datetime};
use crate::{EdgeRecord, LocationId};

/// An edge record extended with one rate per vehicle class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRateRecord<L> {
    /// Location the trip starts at.
    pub id_start: L,
    /// Location the trip ends at.
    pub id_end: L,
    /// Base distance.
    pub distance: f64,
    /// Class rates derived from `distance`.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rates: VehicleRates,
}

/// A rate row placed in a calendar window with its discount applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindowRecord<L> {
    /// Location the trip starts at.
    pub id_start: L,
    /// Location the trip ends at.
    pub id_end: L,
    /// Base distance.
    pub distance: f64,
    /// The window and the factor applied.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub window: CalendarWindow,
    /// Discounted class rates.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rates: VehicleRates,
}

/// A single journey between two locations with its own timestamps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip<L> {
    /// Location the trip starts at.
    pub id_start: L,
    /// Location the trip ends at.
    pub id_end: L,
    /// Departure.
    pub start: DateTime,
    /// Arrival.
    pub end: DateTime,
}

impl<L: LocationId> Trip<L> {
    /// Validates and constructs a [`Trip`].
    ///
    /// # Errors
    /// Returns [`TimestampError::EndBeforeStart`] when `end` precedes `start`.
    pub fn new(id_start: L, id_end: L, start: DateTime, end: DateTime) -> Result<Self, TollError> {
        if end < start {
            return Err(TimestampError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            }
            .into());
        }
        Ok(Self {
            id_start,
            id_end,
            start,
            end,
        })
    }

    /// Parse ISO 8601 civil timestamps and construct a [`Trip`].
    ///
    /// # Errors
    /// Returns [`TollError::Timestamp`] when either timestamp is malformed or
    /// the trip ends before it starts.
    pub fn parse(id_start: L, id_end: L, start: &str, end: &str) -> Result<Self, TollError> {
        Self::new(id_start, id_end, parse_datetime(start)?, parse_datetime(end)?)
    }
}

/// Stage one: derive class rates from each edge's base distance.
///
/// The output depends only on `id_start`, `id_end` and `distance`, so feeding
/// those columns back in reproduces the same rates.
#[must_use]
pub fn calculate_toll_rates<L: LocationId>(
    edges: &[EdgeRecord<L>],
    coefficients: &RateCoefficients,
) -> Vec<VehicleRateRecord<L>> {
    edges
        .iter()
        .map(|edge| VehicleRateRecord {
            id_start: edge.id_start.clone(),
            id_end: edge.id_end.clone(),
            distance: edge.distance,
            rates: coefficients.rates_for(edge.distance),
        })
        .collect()
}

/// Stage two over the fixed calendar: one output row per rate row and window.
///
/// Rows keep the order of `rates`; windows follow
/// [`DiscountSchedule::windows`].
///
/// # Errors
/// Schedule validation errors from [`DiscountSchedule::validate`].
pub fn expand_time_windows<L: LocationId>(
    rates: &[VehicleRateRecord<L>],
    schedule: &DiscountSchedule,
) -> Result<Vec<TimeWindowRecord<L>>, TollError> {
    let windows = schedule.validate()?.windows();
    Ok(rates
        .iter()
        .flat_map(|record| {
            windows
                .iter()
                .map(move |window| discounted(record, *window))
        })
        .collect())
}

/// Stage two for individual trips.
///
/// Day names come from each trip's own timestamps and the discount factor is
/// chosen by its departure instant.
///
/// # Errors
/// - [`TollError::NotFound`] when a trip's pair has no rate record.
/// - [`TollError::Timestamp`] when a trip ends before it starts.
/// - Schedule validation errors from [`DiscountSchedule::validate`].
pub fn price_trips<L: LocationId>(
    rates: &[VehicleRateRecord<L>],
    trips: &[Trip<L>],
    schedule: &DiscountSchedule,
) -> Result<Vec<TimeWindowRecord<L>>, TollError> {
    let schedule = schedule.validate()?;
    let by_pair: BTreeMap<(&L, &L), &VehicleRateRecord<L>> = rates
        .iter()
        .map(|record| ((&record.id_start, &record.id_end), record))
        .collect();

    trips
        .iter()
        .map(|trip| -> Result<TimeWindowRecord<L>, TollError> {
            if trip.end < trip.start {
                return Err(TimestampError::EndBeforeStart {
                    start: trip.start.to_string(),
                    end: trip.end.to_string(),
                }
                .into());
            }
            let record = by_pair
                .get(&(&trip.id_start, &trip.id_end))
                .ok_or_else(|| TollError::NotFound {
                    id_start: trip.id_start.to_string(),
                    id_end: trip.id_end.to_string(),
                })?;
            let departure = WeekInstant::from(trip.start);
            let arrival = WeekInstant::from(trip.end);
            let window = CalendarWindow {
                start_day: departure.day,
                start_time: departure.time,
                end_day: arrival.day,
                end_time: arrival.time,
                discount_factor: schedule.factor_for(departure),
            };
            Ok(discounted(record, window))
        })
        .collect()
}

fn discounted<L: LocationId>(
    record: &VehicleRateRecord<L>,
    window: CalendarWindow,
) -> TimeWindowRecord<L> {
    TimeWindowRecord {
        id_start: record.id_start.clone(),
        id_end: record.id_end.clone(),
        distance: record.distance,
        window,
        rates: record.rates.scaled(window.discount_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;
    use jiff::civil::{date, time};
    use rstest::{fixture, rstest};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[fixture]
    fn rates() -> Vec<VehicleRateRecord<u64>> {
        let edges = vec![EdgeRecord::new(1, 2, 10.0), EdgeRecord::new(2, 1, 10.0)];
        calculate_toll_rates(&edges, &RateCoefficients::default())
    }

    #[rstest]
    fn stage_one_multiplies_distance(rates: Vec<VehicleRateRecord<u64>>) {
        let first = &rates[0];
        assert_close(first.rates.moto, 8.0);
        assert_close(first.rates.car, 12.0);
        assert_close(first.rates.rv, 15.0);
        assert_close(first.rates.bus, 22.0);
        assert_close(first.rates.truck, 36.0);
    }

    #[rstest]
    fn stage_one_is_idempotent_over_base_columns(rates: Vec<VehicleRateRecord<u64>>) {
        let base: Vec<EdgeRecord<u64>> = rates
            .iter()
            .map(|r| EdgeRecord::new(r.id_start, r.id_end, r.distance))
            .collect();
        let again = calculate_toll_rates(&base, &RateCoefficients::default());
        assert_eq!(again, rates);
    }

    #[rstest]
    fn expands_every_row_across_the_week(rates: Vec<VehicleRateRecord<u64>>) {
        let schedule = DiscountSchedule::default();
        let expanded = expand_time_windows(&rates, &schedule).expect("valid schedule");
        assert_eq!(expanded.len(), rates.len() * 17);
        let peak = expanded
            .iter()
            .find(|r| r.window.start_day == Day::Tuesday && r.window.start_time == time(10, 0, 0, 0))
            .expect("tuesday peak window");
        assert_close(peak.window.discount_factor, 1.2);
        assert_close(peak.rates.truck, 43.2);
        let weekend = expanded
            .iter()
            .find(|r| r.window.start_day == Day::Sunday)
            .expect("sunday window");
        assert_close(weekend.rates.moto, 8.0 * 0.7);
    }

    #[rstest]
    fn expansion_rejects_negative_factor(rates: Vec<VehicleRateRecord<u64>>) {
        let schedule = DiscountSchedule {
            weekend: -0.7,
            ..DiscountSchedule::default()
        };
        let err = expand_time_windows(&rates, &schedule).expect_err("negative factor");
        assert_eq!(
            err,
            TollError::InvalidFactor {
                name: "weekend",
                value: -0.7
            }
        );
    }

    #[rstest]
    fn expansion_rejects_inverted_peak(rates: Vec<VehicleRateRecord<u64>>) {
        let schedule = DiscountSchedule {
            peak_start: time(18, 0, 0, 0),
            peak_end: time(10, 0, 0, 0),
            ..DiscountSchedule::default()
        };
        let err = expand_time_windows(&rates, &schedule).expect_err("inverted peak");
        assert!(matches!(err, TollError::InvalidSchedule { .. }));
    }

    #[rstest]
    #[case(time(12, 0, 0, 0), 1.2)]
    #[case(time(10, 0, 0, 0), 0.8)]
    #[case(time(18, 0, 0, 0), 1.2)]
    #[case(time(21, 0, 0, 0), 0.8)]
    fn trip_factor_follows_departure_time(
        rates: Vec<VehicleRateRecord<u64>>,
        #[case] departure: jiff::civil::Time,
        #[case] factor: f64,
    ) {
        // 2024-04-03 is a Wednesday.
        let start = date(2024, 4, 3).to_datetime(departure);
        let end = date(2024, 4, 4).at(1, 0, 0, 0);
        let trip = Trip::new(1_u64, 2, start, end).expect("valid trip");
        let priced =
            price_trips(&rates, &[trip], &DiscountSchedule::default()).expect("priced trip");
        assert_eq!(priced[0].window.start_day, Day::Wednesday);
        assert_eq!(priced[0].window.end_day, Day::Thursday);
        assert_close(priced[0].window.discount_factor, factor);
        assert_close(priced[0].rates.truck, 36.0 * factor);
    }

    #[rstest]
    fn weekend_trip_uses_weekend_factor(rates: Vec<VehicleRateRecord<u64>>) {
        let trip = Trip::parse(2_u64, 1, "2024-04-07T09:00:00", "2024-04-07T10:00:00")
            .expect("valid trip");
        let priced =
            price_trips(&rates, &[trip], &DiscountSchedule::default()).expect("priced trip");
        assert_eq!(priced[0].window.start_day, Day::Sunday);
        assert_close(priced[0].rates.car, 12.0 * 0.7);
    }

    #[rstest]
    fn unknown_pair_is_not_found(rates: Vec<VehicleRateRecord<u64>>) {
        let trip = Trip::parse(1_u64, 9, "2024-04-03T12:00:00", "2024-04-03T13:00:00")
            .expect("valid trip");
        let err = price_trips(&rates, &[trip], &DiscountSchedule::default())
            .expect_err("unknown pair");
        assert_eq!(
            err,
            TollError::NotFound {
                id_start: "1".into(),
                id_end: "9".into()
            }
        );
    }

    #[rstest]
    fn trip_ending_before_start_is_rejected() {
        let err = Trip::parse(1_u64, 2, "2024-04-03T12:00:00", "2024-04-03T11:00:00")
            .expect_err("inverted trip");
        assert!(matches!(
            err,
            TollError::Timestamp(TimestampError::EndBeforeStart { .. })
        ));
    }

    #[rstest]
    fn malformed_trip_timestamp_is_rejected() {
        let err = Trip::parse(1_u64, 2, "Wednesday noon", "2024-04-03T11:00:00")
            .expect_err("malformed timestamp");
        assert!(matches!(
            err,
            TollError::Timestamp(TimestampError::MalformedDateTime { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn window_records_serialise_flat(rates: Vec<VehicleRateRecord<u64>>) {
        let records =
            expand_time_windows(&rates, &DiscountSchedule::default()).expect("valid schedule");
        let first = records.first().expect("monday morning window");
        let json = serde_json::to_value(first).expect("serialise record");
        assert_eq!(json["id_start"], 1);
        assert_eq!(json["start_day"], "Monday");
        assert_eq!(json["end_time"], "10:00:00");
        assert_eq!(json["discount_factor"], 0.8);
        assert!(json.get("rates").is_none());
        assert!(json.get("window").is_none());
    }
}
