//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on, so the SQLite
//! implementation can be swapped without touching business logic.

use anyhow::Result;
use async_trait::async_trait;
use shared::DayEntry;

use crate::domain::models::{LoginToken, SessionContext, UserAccount};

/// Load/save of day records, scoped by user
#[async_trait]
pub trait SalesStorage: Send + Sync {
    /// All stored rows for the month, ordered by day ascending
    async fn list_month(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<DayEntry>>;

    /// Idempotent upsert keyed by (user, year, month, day). Last write wins.
    async fn upsert_day(&self, user_id: &str, year: i32, month: u32, entry: &DayEntry) -> Result<()>;
}

/// Users, one-time login tokens and sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Return the user registered under `email`, creating it if needed
    async fn find_or_create_user(&self, email: &str) -> Result<UserAccount>;

    async fn user_email(&self, user_id: &str) -> Result<Option<String>>;

    async fn store_login_token(&self, token: &LoginToken) -> Result<()>;

    /// Remove and return a login token; a token can be taken only once
    async fn take_login_token(&self, token: &str) -> Result<Option<LoginToken>>;

    async fn store_session(&self, session: &SessionContext) -> Result<()>;

    async fn get_session(&self, token: &str) -> Result<Option<SessionContext>>;

    /// Returns true if a session was deleted
    async fn delete_session(&self, token: &str) -> Result<bool>;
}
