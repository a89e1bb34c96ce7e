//! Per-day revenue records and the month mapping built from them.

use std::collections::BTreeMap;

use shared::{Comparison, DayEntry};

/// Revenue recorded for one calendar day.
///
/// Both figures are independently optional; a record with both absent is
/// indistinguishable from a day that was never entered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayRecord {
    pub value: Option<f64>,
    pub prior_year_value: Option<f64>,
}

impl DayRecord {
    pub fn new(value: Option<f64>, prior_year_value: Option<f64>) -> Self {
        Self {
            value,
            prior_year_value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.prior_year_value.is_none()
    }

    /// Current year vs prior year, only when both figures are present
    pub fn comparison(&self) -> Option<Comparison> {
        let (value, prior) = (self.value?, self.prior_year_value?);
        Some(if value > prior {
            Comparison::Up
        } else if value < prior {
            Comparison::Down
        } else {
            Comparison::Flat
        })
    }
}

/// Day-of-month to [`DayRecord`] mapping for the active month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthData {
    days: BTreeMap<u32, DayRecord>,
}

impl MonthData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reshape loaded rows into a mapping. A later row for the same day wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DayEntry>,
    {
        let days = entries
            .into_iter()
            .map(|entry| {
                (
                    entry.day,
                    DayRecord::new(entry.value, entry.prior_year_value),
                )
            })
            .collect();
        Self { days }
    }

    /// The record for `day`, or an empty record when nothing was stored
    pub fn record(&self, day: u32) -> DayRecord {
        self.days.get(&day).copied().unwrap_or_default()
    }

    pub fn value(&self, day: u32) -> Option<f64> {
        self.days.get(&day).and_then(|r| r.value)
    }

    /// Create or overwrite the entry for `day`
    pub fn set(&mut self, day: u32, record: DayRecord) {
        self.days.insert(day, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &DayRecord)> {
        self.days.iter().map(|(day, record)| (*day, record))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
