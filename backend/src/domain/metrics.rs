//! Month-to-date aggregations: sum, average, projection and the
//! year-over-year comparison.

use shared::Comparison;

use crate::domain::error::DomainResult;
use crate::domain::models::{MonthData, MonthPeriod};

/// Per-day floor used for projections unless configured otherwise
pub const DEFAULT_DAILY_TARGET: f64 = 1000.0;

/// Derived month figures. Values are unrounded; rounding is a display concern.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthMetrics {
    pub days_in_month: u32,
    pub sum: f64,
    pub recorded_day_count: u32,
    pub average: f64,
    pub projected_total: f64,
    pub prior_year_sum: f64,
    pub delta: f64,
    /// `None` when the prior-year sum is not positive
    pub delta_percent: Option<f64>,
    pub daily_target_floor: f64,
}

impl MonthMetrics {
    /// Month-level direction of the year-over-year delta
    pub fn delta_direction(&self) -> Comparison {
        if self.delta > 0.0 {
            Comparison::Up
        } else if self.delta < 0.0 {
            Comparison::Down
        } else {
            Comparison::Flat
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsService {
    daily_target_floor: f64,
}

impl MetricsService {
    pub fn new(daily_target_floor: f64) -> Self {
        Self { daily_target_floor }
    }

    pub fn daily_target_floor(&self) -> f64 {
        self.daily_target_floor
    }

    /// Compute with the configured floor
    pub fn compute_with_configured_floor(
        &self,
        year: i32,
        month: u32,
        data: &MonthData,
    ) -> DomainResult<MonthMetrics> {
        self.compute(year, month, data, self.daily_target_floor)
    }

    /// Single pass over `data`.
    ///
    /// Remaining days are projected at `max(average, daily_target_floor)`.
    /// Prior-year figures are summed independently of whether the same day
    /// has a current-year value.
    pub fn compute(
        &self,
        year: i32,
        month: u32,
        data: &MonthData,
        daily_target_floor: f64,
    ) -> DomainResult<MonthMetrics> {
        let days_in_month = MonthPeriod::new(year, month)?.days_in_month();

        let mut sum = 0.0;
        let mut recorded_day_count = 0u32;
        let mut prior_year_sum = 0.0;

        for (_, record) in data.iter() {
            if let Some(value) = record.value {
                sum += value;
                recorded_day_count += 1;
            }
            if let Some(prior) = record.prior_year_value {
                prior_year_sum += prior;
            }
        }

        let average = if recorded_day_count > 0 {
            sum / recorded_day_count as f64
        } else {
            0.0
        };

        // Saturates when the data holds more recorded days than the month has
        let remaining_days = days_in_month.saturating_sub(recorded_day_count);
        let projected_total = sum + remaining_days as f64 * average.max(daily_target_floor);

        let delta = sum - prior_year_sum;
        let delta_percent = if prior_year_sum > 0.0 {
            Some(delta / prior_year_sum * 100.0)
        } else {
            None
        };

        Ok(MonthMetrics {
            days_in_month,
            sum,
            recorded_day_count,
            average,
            projected_total,
            prior_year_sum,
            delta,
            delta_percent,
            daily_target_floor,
        })
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_TARGET)
    }
}
