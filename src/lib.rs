//! Facade crate for the Waymark road-segment analytics.
//!
//! This crate re-exports the distance, toll and coverage types from
//! `waymark-core` together with the vehicle-count statistics.

#![forbid(unsafe_code)]

pub use waymark_core::{
    CalendarWindow, Day, DiscountSchedule, DistanceMatrix, DistanceMatrixError, EdgeRecord,
    IntervalRecord, LocationId, ProximityError, RateCoefficients, SchemaError, Segment,
    TimeWindowRecord, TimestampError, TollError, Trip, VehicleClass, VehicleRateRecord,
    VehicleRates, build_distance_matrix, calculate_toll_rates, check_full_week_coverage,
    expand_time_windows, find_within_tolerance, price_trips, roll, unroll,
};

pub use waymark_stats::{
    CarBand, CountMatrix, StatsError, VehicleCountRecord, VehicleCountSummary, summarise,
};
