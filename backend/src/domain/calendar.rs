//! Calendar domain logic for the sales tracker.
//!
//! Builds the Monday-first week grid for a month and the per-week revenue
//! subtotals. The grid is derived fresh from the month's data on every call;
//! nothing here is cached or persisted.

use chrono::{Datelike, Month};
use tracing::debug;

use crate::domain::error::DomainResult;
use crate::domain::models::{period, MonthData, MonthPeriod};

/// Column headers, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One calendar row: seven slots, `None` for padding
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub slots: [Option<u32>; 7],
    /// Sum of recorded current-year values for the days in this row
    pub total: f64,
}

impl Week {
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().flatten().copied()
    }
}

/// Week-by-week layout of a month
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Leading padding slots in the first week (Monday = 0)
    pub offset: u32,
    pub weeks: Vec<Week>,
}

impl CalendarGrid {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// All day numbers in row-major order
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flat_map(|w| w.days())
    }
}

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Number of days in the given month
    pub fn days_in_month(&self, year: i32, month: u32) -> DomainResult<u32> {
        Ok(MonthPeriod::new(year, month)?.days_in_month())
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        period::is_leap_year(year)
    }

    /// Weekday of day 1 counted from Monday (Monday = 0 .. Sunday = 6)
    pub fn first_weekday_offset(&self, year: i32, month: u32) -> DomainResult<u32> {
        let first = MonthPeriod::new(year, month)?.first_day()?;
        Ok(first.weekday().num_days_from_monday())
    }

    /// Lay the month out in Monday-first weeks with per-week totals.
    ///
    /// Padding slots and days without a current-year value both contribute
    /// 0 to a week's total.
    pub fn build_grid(&self, year: i32, month: u32, data: &MonthData) -> DomainResult<CalendarGrid> {
        let period = MonthPeriod::new(year, month)?;
        let days_in_month = period.days_in_month();
        let offset = self.first_weekday_offset(year, month)?;

        debug!(year, month, days_in_month, offset, "building calendar grid");

        let week_count = (offset + days_in_month).div_ceil(7);
        let mut weeks = Vec::with_capacity(week_count as usize);

        for week_index in 0..week_count {
            let mut slots = [None; 7];
            for (column, slot) in slots.iter_mut().enumerate() {
                let position = week_index * 7 + column as u32;
                if position >= offset && position - offset < days_in_month {
                    *slot = Some(position - offset + 1);
                }
            }

            let total = slots
                .iter()
                .flatten()
                .filter_map(|day| data.value(*day))
                .sum();

            weeks.push(Week { slots, total });
        }

        Ok(CalendarGrid {
            year,
            month,
            days_in_month,
            offset,
            weeks,
        })
    }

    /// Human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Invalid Month")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::models::DayRecord;

    fn data_with_values(values: &[(u32, f64)]) -> MonthData {
        let mut data = MonthData::new();
        for (day, value) in values {
            data.set(*day, DayRecord::new(Some(*value), None));
        }
        data
    }

    #[test]
    fn test_days_in_month() {
        let service = CalendarService::new();

        assert_eq!(service.days_in_month(2025, 1).unwrap(), 31);
        assert_eq!(service.days_in_month(2025, 4).unwrap(), 30);
        assert_eq!(service.days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(service.days_in_month(2024, 2).unwrap(), 29);
    }

    #[test]
    fn test_is_leap_year() {
        let service = CalendarService::new();

        assert!(!service.is_leap_year(2025));
        assert!(service.is_leap_year(2024));
        assert!(!service.is_leap_year(1900));
        assert!(service.is_leap_year(2000));
    }

    #[test]
    fn test_month_name() {
        let service = CalendarService::new();

        assert_eq!(service.month_name(1), "January");
        assert_eq!(service.month_name(6), "June");
        assert_eq!(service.month_name(12), "December");
        assert_eq!(service.month_name(0), "Invalid Month");
        assert_eq!(service.month_name(13), "Invalid Month");
        assert_eq!(service.month_name(257), "Invalid Month");
    }

    #[test]
    fn test_february_2024_layout() {
        let service = CalendarService::new();
        let grid = service.build_grid(2024, 2, &MonthData::new()).unwrap();

        assert_eq!(grid.days_in_month, 29);
        // 1 February 2024 was a Thursday
        assert_eq!(grid.offset, 3);
        assert_eq!(grid.week_count(), 5);
        assert_eq!(
            grid.weeks[0].slots,
            [None, None, None, Some(1), Some(2), Some(3), Some(4)]
        );
        assert_eq!(
            grid.weeks[4].slots,
            [Some(26), Some(27), Some(28), Some(29), None, None, None]
        );
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_padding() {
        let service = CalendarService::new();
        // 1 September 2025 was a Monday
        let grid = service.build_grid(2025, 9, &MonthData::new()).unwrap();

        assert_eq!(grid.offset, 0);
        assert_eq!(grid.weeks[0].slots[0], Some(1));
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn test_month_starting_on_sunday_uses_six_weeks() {
        let service = CalendarService::new();
        // 1 June 2025 was a Sunday
        let grid = service.build_grid(2025, 6, &MonthData::new()).unwrap();

        assert_eq!(grid.offset, 6);
        assert_eq!(grid.week_count(), 6);
        assert_eq!(grid.weeks[0].slots[6], Some(1));
    }

    #[test]
    fn test_grid_shape_holds_for_every_month() {
        let service = CalendarService::new();

        for year in 1999..=2032 {
            for month in 1..=12 {
                let grid = service.build_grid(year, month, &MonthData::new()).unwrap();
                let days_in_month = grid.days_in_month;

                assert!(grid.offset <= 6);
                assert_eq!(
                    grid.week_count() as u32,
                    (grid.offset + days_in_month).div_ceil(7)
                );

                let filled = grid.days().count() as u32;
                let empty: u32 = grid
                    .weeks
                    .iter()
                    .map(|w| w.slots.iter().filter(|s| s.is_none()).count() as u32)
                    .sum();
                assert_eq!(filled, days_in_month);
                assert_eq!(empty, 7 * grid.week_count() as u32 - days_in_month);
                assert!(empty - grid.offset < 7, "{}-{}: trailing padding fills a whole week", year, month);

                let days: Vec<u32> = grid.days().collect();
                let expected: Vec<u32> = (1..=days_in_month).collect();
                assert_eq!(days, expected, "{}-{}: days out of order", year, month);
            }
        }
    }

    #[test]
    fn test_week_totals() {
        let service = CalendarService::new();
        // February 2024: week 1 holds days 1-4, week 2 holds 5-11
        let data = data_with_values(&[(1, 100.0), (4, 50.5), (5, 10.0), (11, 20.0), (29, 7.0)]);
        let grid = service.build_grid(2024, 2, &data).unwrap();

        assert_eq!(grid.weeks[0].total, 150.5);
        assert_eq!(grid.weeks[1].total, 30.0);
        assert_eq!(grid.weeks[2].total, 0.0);
        assert_eq!(grid.weeks[3].total, 0.0);
        assert_eq!(grid.weeks[4].total, 7.0);
    }

    #[test]
    fn test_padding_and_absent_values_contribute_zero() {
        let service = CalendarService::new();
        let mut data = MonthData::new();
        // Prior-year figures never count towards a week total
        data.set(1, DayRecord::new(None, Some(500.0)));
        data.set(2, DayRecord::new(None, None));
        data.set(3, DayRecord::new(Some(-20.0), Some(10.0)));

        let grid = service.build_grid(2024, 2, &data).unwrap();

        assert_eq!(grid.weeks[0].total, -20.0);
        for week in &grid.weeks[1..] {
            assert_eq!(week.total, 0.0);
        }
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let service = CalendarService::new();

        assert!(matches!(
            service.build_grid(2025, 0, &MonthData::new()),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.build_grid(2025, 13, &MonthData::new()),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(service.days_in_month(2025, 13).is_err());
        assert!(service.first_weekday_offset(2025, 13).is_err());
    }
}
