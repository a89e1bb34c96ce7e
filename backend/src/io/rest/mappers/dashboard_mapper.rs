//! Mappers for converting the dashboard view to shared DTOs.

use shared::{
    CalendarDayType, CalendarGridResponse, CalendarSlot, CalendarWeek, DashboardResponse,
    MonthMetricsResponse,
};

use crate::domain::calendar::{CalendarGrid, CalendarService, WEEKDAY_LABELS};
use crate::domain::dashboard::DashboardView;
use crate::domain::metrics::MonthMetrics;
use crate::domain::models::MonthData;

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(view: &DashboardView, calendar_service: &CalendarService) -> DashboardResponse {
        DashboardResponse {
            year: view.period.year,
            month: view.period.month,
            calendar: Self::grid_to_dto(&view.grid, &view.data, calendar_service),
            metrics: Self::metrics_to_dto(&view.metrics),
        }
    }

    pub fn grid_to_dto(
        grid: &CalendarGrid,
        data: &MonthData,
        calendar_service: &CalendarService,
    ) -> CalendarGridResponse {
        let mut seen_first_day = false;
        let weeks = grid
            .weeks
            .iter()
            .map(|week| CalendarWeek {
                slots: week
                    .slots
                    .iter()
                    .map(|slot| match slot {
                        Some(day) => {
                            seen_first_day = true;
                            let record = data.record(*day);
                            CalendarSlot {
                                day: Some(*day),
                                day_type: CalendarDayType::MonthDay,
                                value: record.value,
                                prior_year_value: record.prior_year_value,
                                comparison: record.comparison(),
                            }
                        }
                        None => CalendarSlot {
                            day: None,
                            day_type: if seen_first_day {
                                CalendarDayType::PaddingAfter
                            } else {
                                CalendarDayType::PaddingBefore
                            },
                            value: None,
                            prior_year_value: None,
                            comparison: None,
                        },
                    })
                    .collect(),
                week_total: week.total,
            })
            .collect();

        CalendarGridResponse {
            year: grid.year,
            month: grid.month,
            month_name: calendar_service.month_name(grid.month).to_string(),
            days_in_month: grid.days_in_month,
            first_weekday_offset: grid.offset,
            weekday_labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
            weeks,
        }
    }

    pub fn metrics_to_dto(metrics: &MonthMetrics) -> MonthMetricsResponse {
        MonthMetricsResponse {
            sum: metrics.sum,
            recorded_day_count: metrics.recorded_day_count,
            average: metrics.average,
            projected_total: metrics.projected_total,
            prior_year_sum: metrics.prior_year_sum,
            delta: metrics.delta,
            delta_percent: metrics.delta_percent,
            formatted_delta_percent: metrics.delta_percent.map(format_percent),
            delta_direction: metrics.delta_direction(),
            daily_target_floor: metrics.daily_target_floor,
        }
    }
}

/// One decimal with an explicit sign for gains, e.g. "+25.0%"
pub fn format_percent(percent: f64) -> String {
    if percent > 0.0 {
        format!("+{:.1}%", percent)
    } else {
        format!("{:.1}%", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DayRecord;
    use shared::Comparison;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(25.0), "+25.0%");
        assert_eq!(format_percent(-12.345), "-12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_grid_slots_are_typed() {
        let service = CalendarService::new();
        let mut data = MonthData::new();
        data.set(1, DayRecord::new(Some(120.0), Some(100.0)));
        data.set(2, DayRecord::new(Some(80.0), None));
        let grid = service.build_grid(2024, 2, &data).unwrap();

        let dto = DashboardMapper::grid_to_dto(&grid, &data, &service);

        assert_eq!(dto.month_name, "February");
        assert_eq!(dto.weekday_labels.first().map(String::as_str), Some("Mon"));
        assert_eq!(dto.weekday_labels.len(), 7);
        assert_eq!(dto.weeks.len(), 5);
        assert!(dto.weeks.iter().all(|w| w.slots.len() == 7));

        let first = &dto.weeks[0].slots;
        assert_eq!(first[0].day_type, CalendarDayType::PaddingBefore);
        assert_eq!(first[3].day, Some(1));
        assert_eq!(first[3].comparison, Some(Comparison::Up));
        assert_eq!(first[4].comparison, None);
        assert_eq!(dto.weeks[0].week_total, 200.0);

        let last = &dto.weeks[4].slots;
        assert_eq!(last[3].day, Some(29));
        assert_eq!(last[4].day_type, CalendarDayType::PaddingAfter);
    }
}
