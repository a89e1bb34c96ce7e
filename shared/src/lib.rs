use serde::{Deserialize, Serialize};

/// One stored day row as returned by the month load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Day of month (1-based)
    pub day: u32,
    /// Current-year revenue, absent when not entered yet
    pub value: Option<f64>,
    /// Same metric one year prior
    pub prior_year_value: Option<f64>,
}

/// Request body for saving a single day (the day itself comes from the path)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDayRequest {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub prior_year_value: Option<f64>,
}

/// Direction of a current-year vs prior-year comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Current year is ahead
    Up,
    /// Current year is behind
    Down,
    /// Both figures are equal
    Flat,
}

/// Type of calendar slot for explicit rendering logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding slot before day 1
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding slot after the last day
    PaddingAfter,
}

/// A single slot of a calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSlot {
    /// Day of month, `None` for padding slots
    pub day: Option<u32>,
    pub day_type: CalendarDayType,
    pub value: Option<f64>,
    pub prior_year_value: Option<f64>,
    /// Only present when both figures are recorded
    pub comparison: Option<Comparison>,
}

/// One Monday-first calendar row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWeek {
    /// Always seven slots
    pub slots: Vec<CalendarSlot>,
    pub week_total: f64,
}

/// Week-by-week grid for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarGridResponse {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days_in_month: u32,
    /// Number of leading padding slots (Monday = 0)
    pub first_weekday_offset: u32,
    pub weekday_labels: Vec<String>,
    pub weeks: Vec<CalendarWeek>,
}

/// Month-to-date figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthMetricsResponse {
    pub sum: f64,
    pub recorded_day_count: u32,
    pub average: f64,
    pub projected_total: f64,
    pub prior_year_sum: f64,
    pub delta: f64,
    /// `None` when there is no prior-year figure to compare against
    pub delta_percent: Option<f64>,
    /// Signed percentage with one decimal, e.g. "+25.0%"
    pub formatted_delta_percent: Option<String>,
    pub delta_direction: Comparison,
    /// Per-day floor used when projecting the remaining days
    pub daily_target_floor: f64,
}

/// Everything the dashboard needs for the active month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub year: i32,
    pub month: u32,
    pub calendar: CalendarGridResponse,
    pub metrics: MonthMetricsResponse,
}

/// Request for a magic-link sign in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Response after a magic link has been issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Only populated when the server runs with exposed login tokens
    pub login_token: Option<String>,
}

/// Request to exchange a login token for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyLoginRequest {
    pub token: String,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub user_id: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub expires_at: String,
}

/// Response after signing out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignOutResponse {
    pub success_message: String,
}

/// Client-side log line forwarded to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
