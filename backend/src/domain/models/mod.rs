//! Domain models for the sales tracker.

pub mod day_record;
pub mod period;
pub mod session;

pub use day_record::{DayRecord, MonthData};
pub use period::MonthPeriod;
pub use session::{LoginToken, SessionContext, UserAccount};
