use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::commands::session::{
    LoginChallenge, RequestLoginCommand, VerifiedSession, VerifyLoginCommand,
};
use crate::domain::email_service::{magic_link_url, MagicLinkSender};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{LoginToken, SessionContext};
use crate::storage::SessionStorage;

pub const LOGIN_SENT_MESSAGE: &str = "Check your email for the magic login link.";

/// Magic-link sign in and session lifecycle.
#[derive(Clone)]
pub struct SessionService {
    storage: Arc<dyn SessionStorage>,
    sender: Arc<dyn MagicLinkSender>,
    link_base_url: String,
    login_token_ttl: Duration,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        sender: Arc<dyn MagicLinkSender>,
        link_base_url: impl Into<String>,
        login_token_ttl: Duration,
        session_ttl: Duration,
    ) -> Self {
        Self {
            storage,
            sender,
            link_base_url: link_base_url.into(),
            login_token_ttl,
            session_ttl,
        }
    }

    /// Issue a one-time login token for `email`, registering the user on
    /// first use, and send the link carrying it.
    pub async fn request_login(&self, command: RequestLoginCommand) -> DomainResult<LoginChallenge> {
        let email = normalize_email(&command.email)?;
        let user = self.storage.find_or_create_user(&email).await?;

        let token = LoginToken {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            expires_at: Utc::now() + self.login_token_ttl,
        };
        self.storage.store_login_token(&token).await?;

        let link = magic_link_url(&self.link_base_url, &token.token);
        if let Err(e) = self.sender.send_magic_link(&email, &link).await {
            error!("Error sending magic link to {}: {:?}", email, e);
            return Err(DomainError::Delivery(e));
        }

        info!("Magic link issued for {} (expires {})", email, token.expires_at.to_rfc3339());

        Ok(LoginChallenge {
            email,
            login_token: token.token,
            message: LOGIN_SENT_MESSAGE.to_string(),
        })
    }

    /// Exchange a login token for a session. Tokens are single use.
    pub async fn verify_login(&self, command: VerifyLoginCommand) -> DomainResult<VerifiedSession> {
        let token = self
            .storage
            .take_login_token(command.token.trim())
            .await?
            .ok_or_else(|| DomainError::Unauthorized("unknown or already used login token".to_string()))?;

        let now = Utc::now();
        if token.is_expired(now) {
            warn!("Expired login token presented for user {}", token.user_id);
            return Err(DomainError::Unauthorized("login token has expired".to_string()));
        }

        let session = self.open_session(&token.user_id).await?;
        info!("User {} signed in", session.email);
        Ok(VerifiedSession { session })
    }

    /// Resolve a bearer token to a live session. Expired sessions are removed.
    pub async fn resolve_session(&self, session_token: &str) -> DomainResult<SessionContext> {
        let session = self
            .storage
            .get_session(session_token)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("unknown session".to_string()))?;

        if session.is_expired(Utc::now()) {
            self.storage.delete_session(session_token).await?;
            return Err(DomainError::Unauthorized("session has expired".to_string()));
        }

        Ok(session)
    }

    /// Tear down a session
    pub async fn sign_out(&self, session: &SessionContext) -> DomainResult<bool> {
        let removed = self.storage.delete_session(&session.session_token).await?;
        info!("User {} signed out", session.email);
        Ok(removed)
    }

    async fn open_session(&self, user_id: &str) -> DomainResult<SessionContext> {
        let email = self.email_for(user_id).await?;
        let session = SessionContext {
            session_token: Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            email,
            expires_at: Utc::now() + self.session_ttl,
        };
        self.storage.store_session(&session).await?;
        Ok(session)
    }

    async fn email_for(&self, user_id: &str) -> DomainResult<String> {
        self.storage
            .user_email(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized(format!("user {} no longer exists", user_id)))
    }
}

/// Lowercase and trim, requiring one `@` with text on both sides
fn normalize_email(raw: &str) -> DomainResult<String> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(DomainError::InvalidArgument(format!("invalid email address: {:?}", raw)));
    }
    Ok(email)
}
