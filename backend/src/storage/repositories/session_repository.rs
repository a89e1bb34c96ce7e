use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::info;

use crate::domain::models::{LoginToken, SessionContext, UserAccount};
use crate::storage::connection::DbConnection;
use crate::storage::traits::SessionStorage;

/// Repository for users, login tokens and sessions
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid stored timestamp: {}", raw))?
        .with_timezone(&Utc))
}

#[async_trait]
impl SessionStorage for SessionRepository {
    async fn find_or_create_user(&self, email: &str) -> Result<UserAccount> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(email)
        .bind(now.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let row = sqlx::query(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_one(self.db.pool())
        .await?;

        let created_at: String = row.get("created_at");
        Ok(UserAccount {
            id: row.get("id"),
            email: row.get("email"),
            created_at: parse_timestamp(&created_at)?,
        })
    }

    async fn user_email(&self, user_id: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT email FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.map(|r| r.get("email")))
    }

    async fn store_login_token(&self, token: &LoginToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO login_tokens (token, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&token.token)
        .bind(&token.user_id)
        .bind(token.expires_at.to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn take_login_token(&self, token: &str) -> Result<Option<LoginToken>> {
        let row = sqlx::query(
            r#"
            DELETE FROM login_tokens
            WHERE token = ?
            RETURNING token, user_id, expires_at
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let expires_at: String = r.get("expires_at");
                Ok(Some(LoginToken {
                    token: r.get("token"),
                    user_id: r.get("user_id"),
                    expires_at: parse_timestamp(&expires_at)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn store_session(&self, session: &SessionContext) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.session_token)
        .bind(&session.user_id)
        .bind(session.expires_at.to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;
        info!("Stored session for user {}", session.user_id);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<SessionContext>> {
        let row = sqlx::query(
            r#"
            SELECT s.token, s.user_id, s.expires_at, u.email
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let expires_at: String = r.get("expires_at");
                Ok(Some(SessionContext {
                    session_token: r.get("token"),
                    user_id: r.get("user_id"),
                    email: r.get("email"),
                    expires_at: parse_timestamp(&expires_at)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn setup_test() -> SessionRepository {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        SessionRepository::new(db)
    }

    #[tokio::test]
    async fn test_find_or_create_user_is_stable() {
        let repo = setup_test().await;

        let first = repo.find_or_create_user("carol@example.com").await.unwrap();
        let second = repo.find_or_create_user("carol@example.com").await.unwrap();
        let other = repo.find_or_create_user("dave@example.com").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first.id, other.id);
        assert_eq!(other.email, "dave@example.com");
        assert_eq!(repo.user_email(&first.id).await.unwrap().as_deref(), Some("carol@example.com"));
        assert!(repo.user_email("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_token_can_be_taken_once() {
        let repo = setup_test().await;
        let user = repo.find_or_create_user("erin@example.com").await.unwrap();
        let token = LoginToken {
            token: "login-123".to_string(),
            user_id: user.id.clone(),
            expires_at: Utc::now() + Duration::minutes(15),
        };

        repo.store_login_token(&token).await.unwrap();

        let taken = repo.take_login_token("login-123").await.unwrap().expect("token should exist");
        assert_eq!(taken.user_id, user.id);
        assert_eq!(taken.expires_at.timestamp(), token.expires_at.timestamp());

        assert!(repo.take_login_token("login-123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = setup_test().await;
        let user = repo.find_or_create_user("frank@example.com").await.unwrap();
        let session = SessionContext {
            session_token: "session-abc".to_string(),
            user_id: user.id.clone(),
            email: user.email.clone(),
            expires_at: Utc::now() + Duration::hours(24),
        };

        repo.store_session(&session).await.unwrap();

        let loaded = repo.get_session("session-abc").await.unwrap().expect("session should exist");
        assert_eq!(loaded.user_id, user.id);
        assert_eq!(loaded.email, "frank@example.com");

        assert!(repo.delete_session("session-abc").await.unwrap());
        assert!(!repo.delete_session("session-abc").await.unwrap());
        assert!(repo.get_session("session-abc").await.unwrap().is_none());
    }
}
