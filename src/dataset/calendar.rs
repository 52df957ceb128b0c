//! Hour-of-year calendar stamps backed by `chrono`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of calendar months in a data year.
pub const MONTHS: usize = 12;

/// Calendar position of one hourly record in a regional dataset.
///
/// Months are 1-based (January = 1), hours run 0–23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourStamp {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl HourStamp {
    /// Zero-based month index used to bucket monthly series.
    pub fn month_index(&self) -> usize {
        self.month.saturating_sub(1) as usize
    }

    /// Returns `true` when the stamp names a real hour in `year`.
    pub fn is_valid_in(&self, year: i32) -> bool {
        self.hour < 24 && NaiveDate::from_ymd_opt(year, self.month, self.day).is_some()
    }
}

/// Number of hours in the given calendar year (8760, or 8784 for leap years).
pub fn hours_in_year(year: i32) -> usize {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal() as usize * 24)
        .unwrap_or(8760)
}

/// Generates the full ordered list of hour stamps for `year`.
///
/// Useful for building datasets whose hours are not stamped explicitly.
pub fn year_stamps(year: i32) -> Vec<HourStamp> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.year() == year)
        .flat_map(|d| {
            (0..24).map(move |hour| HourStamp {
                month: d.month(),
                day: d.day(),
                hour,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_have_8784_hours() {
        assert_eq!(hours_in_year(2019), 8760);
        assert_eq!(hours_in_year(2020), 8784);
        assert_eq!(year_stamps(2020).len(), 8784);
    }

    #[test]
    fn stamps_cover_every_month_in_order() {
        let stamps = year_stamps(2019);
        assert_eq!(stamps[0], HourStamp { month: 1, day: 1, hour: 0 });
        assert_eq!(stamps[8759], HourStamp { month: 12, day: 31, hour: 23 });
        // January has 31 days
        assert_eq!(stamps[31 * 24].month, 2);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let feb_30 = HourStamp { month: 2, day: 30, hour: 0 };
        assert!(!feb_30.is_valid_in(2020));
        let late = HourStamp { month: 1, day: 1, hour: 24 };
        assert!(!late.is_valid_in(2020));
        assert!(HourStamp { month: 2, day: 29, hour: 5 }.is_valid_in(2020));
    }

    #[test]
    fn month_index_is_zero_based() {
        assert_eq!(HourStamp { month: 1, day: 1, hour: 0 }.month_index(), 0);
        assert_eq!(HourStamp { month: 12, day: 1, hour: 0 }.month_index(), 11);
    }
}
