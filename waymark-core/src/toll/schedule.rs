//! Calendar discount schedule.
//!
//! Weekdays are split into a morning off-peak bracket `[00:00:00, peak_start]`,
//! a peak bracket `(peak_start, peak_end]` and an evening off-peak bracket
//! `(peak_end, 24:00:00)`. At the exact boundary instants the earlier bracket
//! wins. Saturday and Sunday carry a single weekend factor.

use jiff::civil::{Time, time};

use crate::calendar::{Day, WeekInstant};

use super::TollError;

/// Discount factors and peak boundaries applied on top of class rates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiscountSchedule {
    /// Last instant of the weekday morning off-peak bracket.
    pub peak_start: Time,
    /// Last instant of the weekday peak bracket.
    pub peak_end: Time,
    /// Factor for weekday off-peak brackets.
    pub weekday_off_peak: f64,
    /// Factor for the weekday peak bracket.
    pub weekday_peak: f64,
    /// Factor for any time on Saturday or Sunday.
    pub weekend: f64,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self {
            peak_start: time(10, 0, 0, 0),
            peak_end: time(18, 0, 0, 0),
            weekday_off_peak: 0.8,
            weekday_peak: 1.2,
            weekend: 0.7,
        }
    }
}

/// A calendar window tagged with its discount factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarWindow {
    /// Day the window opens.
    pub start_day: Day,
    /// Time the window opens.
    pub start_time: Time,
    /// Day the window closes.
    pub end_day: Day,
    /// Time the window closes.
    pub end_time: Time,
    /// Multiplier applied to class rates inside the window.
    pub discount_factor: f64,
}

impl DiscountSchedule {
    /// Check factors and boundaries.
    ///
    /// # Errors
    /// - [`TollError::InvalidFactor`] for a negative or non-finite factor.
    /// - [`TollError::InvalidSchedule`] when the peak ends before it starts.
    pub fn validate(self) -> Result<Self, TollError> {
        for (name, value) in [
            ("weekday_off_peak", self.weekday_off_peak),
            ("weekday_peak", self.weekday_peak),
            ("weekend", self.weekend),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TollError::InvalidFactor { name, value });
            }
        }
        if self.peak_end < self.peak_start {
            return Err(TollError::InvalidSchedule {
                peak_start: self.peak_start,
                peak_end: self.peak_end,
            });
        }
        Ok(self)
    }

    /// Discount factor for a trip starting at `day` and `at`.
    ///
    /// # Examples
    /// ```
    /// use jiff::civil::time;
    /// use waymark_core::{Day, DiscountSchedule};
    ///
    /// let schedule = DiscountSchedule::default();
    /// assert_eq!(schedule.factor_at(Day::Monday, time(10, 0, 0, 0)), 0.8);
    /// assert_eq!(schedule.factor_at(Day::Monday, time(10, 0, 1, 0)), 1.2);
    /// assert_eq!(schedule.factor_at(Day::Sunday, time(12, 0, 0, 0)), 0.7);
    /// ```
    #[must_use]
    pub fn factor_at(&self, day: Day, at: Time) -> f64 {
        if day.is_weekend() {
            self.weekend
        } else if at <= self.peak_start {
            self.weekday_off_peak
        } else if at <= self.peak_end {
            self.weekday_peak
        } else {
            self.weekday_off_peak
        }
    }

    /// Discount factor for a position within the week.
    #[must_use]
    pub fn factor_for(&self, instant: WeekInstant) -> f64 {
        self.factor_at(instant.day, instant.time)
    }

    /// The fixed set of windows covering a whole week.
    ///
    /// Monday to Friday contribute three windows each, Saturday and Sunday
    /// one each.
    #[must_use]
    pub fn windows(&self) -> Vec<CalendarWindow> {
        let midnight = Time::MIN;
        let last_second = time(23, 59, 59, 0);
        let mut windows = Vec::with_capacity(17);
        for day in Day::ALL {
            if day.is_weekend() {
                windows.push(window(day, midnight, last_second, self.weekend));
                continue;
            }
            windows.push(window(
                day,
                midnight,
                self.peak_start,
                self.weekday_off_peak,
            ));
            windows.push(window(
                day,
                self.peak_start,
                self.peak_end,
                self.weekday_peak,
            ));
            windows.push(window(
                day,
                self.peak_end,
                last_second,
                self.weekday_off_peak,
            ));
        }
        windows
    }
}

const fn window(day: Day, start: Time, end: Time, discount_factor: f64) -> CalendarWindow {
    CalendarWindow {
        start_day: day,
        start_time: start,
        end_day: day,
        end_time: end,
        discount_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn schedule() -> DiscountSchedule {
        DiscountSchedule::default()
    }

    #[rstest]
    #[case(Day::Monday, time(0, 0, 0, 0), 0.8)]
    #[case(Day::Tuesday, time(9, 59, 59, 0), 0.8)]
    #[case(Day::Wednesday, time(10, 0, 0, 0), 0.8)]
    #[case(Day::Wednesday, time(10, 0, 0, 1), 1.2)]
    #[case(Day::Thursday, time(14, 30, 0, 0), 1.2)]
    #[case(Day::Thursday, time(18, 0, 0, 0), 1.2)]
    #[case(Day::Friday, time(18, 0, 1, 0), 0.8)]
    #[case(Day::Friday, time(23, 59, 59, 0), 0.8)]
    #[case(Day::Saturday, time(0, 0, 0, 0), 0.7)]
    #[case(Day::Sunday, time(14, 0, 0, 0), 0.7)]
    fn selects_bracket_by_day_and_time(
        schedule: DiscountSchedule,
        #[case] day: Day,
        #[case] at: Time,
        #[case] expected: f64,
    ) {
        assert_eq!(schedule.factor_at(day, at), expected);
    }

    #[rstest]
    fn windows_cover_every_day(schedule: DiscountSchedule) {
        let windows = schedule.windows();
        assert_eq!(windows.len(), 17);
        for day in Day::ALL {
            let count = windows.iter().filter(|w| w.start_day == day).count();
            let expected = if day.is_weekend() { 1 } else { 3 };
            assert_eq!(count, expected, "windows for {day}");
        }
    }

    #[rstest]
    fn window_factors_agree_with_interior_instants(schedule: DiscountSchedule) {
        for window in schedule.windows() {
            let probe = window
                .end_time
                .checked_sub(jiff::SignedDuration::from_secs(1))
                .expect("window longer than a second");
            assert_eq!(
                schedule.factor_at(window.start_day, probe),
                window.discount_factor,
                "window {window:?}"
            );
        }
    }

    #[rstest]
    fn rejects_negative_factor(schedule: DiscountSchedule) {
        let broken = DiscountSchedule {
            weekend: -0.7,
            ..schedule
        };
        assert!(matches!(
            broken.validate(),
            Err(TollError::InvalidFactor {
                name: "weekend",
                ..
            })
        ));
    }

    #[rstest]
    fn rejects_inverted_peak(schedule: DiscountSchedule) {
        let broken = DiscountSchedule {
            peak_start: time(19, 0, 0, 0),
            ..schedule
        };
        assert!(matches!(
            broken.validate(),
            Err(TollError::InvalidSchedule { .. })
        ));
    }
}
