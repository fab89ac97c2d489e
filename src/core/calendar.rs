//! # Calendar Math
//!
//! Pure month-grid arithmetic, kept free of any UI types so the invariants
//! are testable on their own. The interactive state (focus, bounds,
//! selection events) lives in `tui::components::calendar`.

use chrono::{Datelike, NaiveDate};

/// The displayed year/month, independent of any selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// 1-based, matching chrono.
    pub month: u32,
}

impl MonthCursor {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Move by exactly `delta` months in either direction. Deliberately
    /// unbounded: navigation past any min/max date is allowed, only day
    /// selection is restricted.
    pub fn advanced(self, delta: i32) -> Self {
        let zero_based = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: zero_based.div_euclid(12),
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

/// Number of days in the given month (the day number of its last day).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Weekday column of day 1, with Sunday in column 0.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// The month grid: `first_weekday_offset` leading blanks (None) followed by
/// one cell per day. Weekdays therefore align to fixed columns when the
/// cells are laid out in rows of seven.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let offset = first_weekday_offset(year, month) as usize;
    let days = days_in_month(year, month);
    let mut cells: Vec<Option<u32>> = vec![None; offset];
    cells.extend((1..=days).map(Some));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_count_invariant() {
        // Every month of a leap year and a common year.
        for year in [2023, 2024] {
            for month in 1..=12 {
                let grid = month_grid(year, month);
                let expected =
                    first_weekday_offset(year, month) + days_in_month(year, month);
                assert_eq!(grid.len(), expected as usize, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_grid_known_month() {
        // September 2026 starts on a Tuesday and has 30 days.
        assert_eq!(first_weekday_offset(2026, 9), 2);
        assert_eq!(days_in_month(2026, 9), 30);
        let grid = month_grid(2026, 9);
        assert_eq!(grid.len(), 32);
        assert_eq!(grid[0], None);
        assert_eq!(grid[1], None);
        assert_eq!(grid[2], Some(1));
        assert_eq!(grid[31], Some(30));
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
    }

    #[test]
    fn test_month_navigation_wraps_year() {
        let cursor = MonthCursor { year: 2026, month: 1 };
        assert_eq!(cursor.advanced(-1), MonthCursor { year: 2025, month: 12 });
        let cursor = MonthCursor { year: 2026, month: 12 };
        assert_eq!(cursor.advanced(1), MonthCursor { year: 2027, month: 1 });
        // Long jumps stay consistent
        let cursor = MonthCursor { year: 2026, month: 6 };
        assert_eq!(cursor.advanced(-18), MonthCursor { year: 2024, month: 12 });
    }
}
