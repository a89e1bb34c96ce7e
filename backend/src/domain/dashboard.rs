//! Month dashboard: loads the active month for a session, applies per-day
//! edits and recomputes the calendar grid and metrics after every change.

use std::sync::Arc;

use shared::DayEntry;
use tracing::{error, info, warn};

use crate::domain::calendar::{CalendarGrid, CalendarService};
use crate::domain::commands::sales::SaveDayCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::metrics::{MetricsService, MonthMetrics};
use crate::domain::models::{DayRecord, MonthData, MonthPeriod, SessionContext};
use crate::storage::SalesStorage;

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub period: MonthPeriod,
    pub data: MonthData,
    pub grid: CalendarGrid,
    pub metrics: MonthMetrics,
}

/// Opens per-session month dashboards
#[derive(Clone)]
pub struct DashboardService {
    storage: Arc<dyn SalesStorage>,
    calendar_service: CalendarService,
    metrics_service: MetricsService,
}

impl DashboardService {
    pub fn new(
        storage: Arc<dyn SalesStorage>,
        calendar_service: CalendarService,
        metrics_service: MetricsService,
    ) -> Self {
        Self {
            storage,
            calendar_service,
            metrics_service,
        }
    }

    /// Load `period` for the session's user
    pub async fn open(&self, session: &SessionContext, period: MonthPeriod) -> DomainResult<MonthDashboard> {
        let rows = self
            .storage
            .list_month(&session.user_id, period.year, period.month)
            .await
            .map_err(|e| {
                error!("Error loading {}-{:02} for {}: {:?}", period.year, period.month, session.user_id, e);
                DomainError::Storage(e)
            })?;

        info!(
            "Opened dashboard {}-{:02} for {} with {} stored days",
            period.year,
            period.month,
            session.email,
            rows.len()
        );

        Ok(MonthDashboard {
            session: session.clone(),
            period,
            data: MonthData::from_entries(rows),
            service: self.clone(),
        })
    }

    /// Pure recomputation of grid and metrics
    pub fn build_view(&self, period: MonthPeriod, data: &MonthData) -> DomainResult<DashboardView> {
        let grid = self.calendar_service.build_grid(period.year, period.month, data)?;
        let metrics = self
            .metrics_service
            .compute_with_configured_floor(period.year, period.month, data)?;

        Ok(DashboardView {
            period,
            data: data.clone(),
            grid,
            metrics,
        })
    }
}

/// One session's view of one month.
///
/// Owns the in-memory [`MonthData`]; the store holds the durable copy.
pub struct MonthDashboard {
    session: SessionContext,
    period: MonthPeriod,
    data: MonthData,
    service: DashboardService,
}

impl MonthDashboard {
    pub fn period(&self) -> MonthPeriod {
        self.period
    }

    pub fn data(&self) -> &MonthData {
        &self.data
    }

    pub fn view(&self) -> DomainResult<DashboardView> {
        self.service.build_view(self.period, &self.data)
    }

    /// Apply an edit locally, then persist it.
    ///
    /// A failed save is returned to the caller; the local edit stays applied.
    pub async fn update_day(&mut self, command: SaveDayCommand) -> DomainResult<DashboardView> {
        let SaveDayCommand { day, record } = command;
        if !self.period.contains_day(day) {
            warn!(
                "Rejected edit for day {} of {}-{:02}",
                day, self.period.year, self.period.month
            );
            return Err(DomainError::InvalidArgument(format!(
                "day must be between 1 and {}, got {}",
                self.period.days_in_month(),
                day
            )));
        }

        self.data.set(day, record);

        let entry = to_entry(day, record);
        if let Err(e) = self
            .service
            .storage
            .upsert_day(&self.session.user_id, self.period.year, self.period.month, &entry)
            .await
        {
            error!("Error saving day {} for {}: {:?}", day, self.session.user_id, e);
            return Err(DomainError::Storage(e));
        }

        info!(
            "Saved {}-{:02}-{:02} for {}",
            self.period.year, self.period.month, day, self.session.email
        );
        self.view()
    }

    /// Teardown hook
    pub fn close(self) {
        info!(
            "Closed dashboard {}-{:02} for {}",
            self.period.year, self.period.month, self.session.email
        );
    }
}

fn to_entry(day: u32, record: DayRecord) -> DayEntry {
    DayEntry {
        day,
        value: record.value,
        prior_year_value: record.prior_year_value,
    }
}
