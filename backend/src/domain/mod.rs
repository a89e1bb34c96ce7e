//! # Domain Module
//!
//! Business logic for the sales tracker.
//!
//! - **calendar**: Monday-first week grid and per-week totals
//! - **metrics**: month-to-date sum, average, projection, year-over-year delta
//! - **dashboard**: per-session month state, edits and recomputation
//! - **session_service**: magic-link sign in and session lifecycle
//! - **email_service**: delivery of the magic links
//!
//! Grid and metrics are pure functions of (year, month, data). Services that
//! need persistence depend on the traits in `crate::storage`, never on
//! SQLite directly.

pub mod calendar;
pub mod commands;
pub mod dashboard;
pub mod email_service;
pub mod error;
pub mod metrics;
pub mod models;
pub mod session_service;

pub use calendar::*;
pub use dashboard::*;
pub use error::{DomainError, DomainResult};
pub use metrics::*;
pub use session_service::*;
