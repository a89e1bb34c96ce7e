//! Identity types for the sign-in flow.

use chrono::{DateTime, Utc};

/// A registered user, created on first sign-in request
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One-time token sent in the magic link
#[derive(Debug, Clone, PartialEq)]
pub struct LoginToken {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl LoginToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Explicit identity handed to every operation that touches user data.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub session_token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
