use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Extension, Router,
};
use chrono::Local;
use shared::SaveDayRequest;
use tracing::info;

use crate::domain::commands::sales::SaveDayCommand;
use crate::domain::models::{DayRecord, MonthPeriod, SessionContext};
use crate::io::rest::extract::{ApiJson, ApiPath};
use crate::io::rest::mappers::DashboardMapper;
use crate::io::rest::ApiError;
use crate::AppState;

/// Create a router for dashboard related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/days/:day", put(save_day))
}

/// Only the month containing today's local date is served
fn current_period() -> MonthPeriod {
    MonthPeriod::from_date(Local::now().date_naive())
}

/// Grid and metrics for the current month
async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, ApiError> {
    let period = current_period();
    info!("GET /api/dashboard - user: {} period: {}-{:02}", session.user_id, period.year, period.month);

    let dashboard = state.dashboard_service.open(&session, period).await?;
    let view = dashboard.view()?;
    dashboard.close();

    Ok((
        StatusCode::OK,
        Json(DashboardMapper::to_dto(&view, &state.calendar_service)),
    ))
}

/// Save one day of the current month and return the recomputed dashboard
async fn save_day(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    ApiPath(day): ApiPath<u32>,
    ApiJson(request): ApiJson<SaveDayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let period = current_period();
    info!(
        "PUT /api/dashboard/days/{} - user: {} request: {:?}",
        day, session.user_id, request
    );

    let mut dashboard = state.dashboard_service.open(&session, period).await?;
    let view = dashboard
        .update_day(SaveDayCommand {
            day,
            record: DayRecord::new(request.value, request.prior_year_value),
        })
        .await?;
    dashboard.close();

    Ok((
        StatusCode::OK,
        Json(DashboardMapper::to_dto(&view, &state.calendar_service)),
    ))
}
