//! A validated calendar month.

use chrono::{Datelike, NaiveDate};

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Fails for a month outside 1..=12 or a year chrono cannot represent
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidArgument(format!(
                "year {} is out of range",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> DomainResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            DomainError::InvalidArgument(format!("{}-{:02} is not a valid month", self.year, self.month))
        })
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(matches!(
            MonthPeriod::new(2025, 0),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            MonthPeriod::new(2025, 13),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(MonthPeriod::new(2025, 12).is_ok());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthPeriod::new(2025, 1).unwrap().days_in_month(), 31);
        assert_eq!(MonthPeriod::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthPeriod::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthPeriod::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthPeriod::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthPeriod::new(2000, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_from_date_and_contains_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        let period = MonthPeriod::from_date(date);
        assert_eq!(period, MonthPeriod { year: 2024, month: 2 });
        assert!(period.contains_day(29));
        assert!(!period.contains_day(30));
        assert!(!period.contains_day(0));
    }
}
