//! Mappers for converting session domain models to shared DTOs.

use shared::{LoginResponse, SessionResponse};

use crate::domain::commands::session::LoginChallenge;
use crate::domain::models::SessionContext;

pub struct SessionMapper;

impl SessionMapper {
    pub fn to_dto(session: &SessionContext) -> SessionResponse {
        SessionResponse {
            session_token: session.session_token.clone(),
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            expires_at: session.expires_at.to_rfc3339(),
        }
    }

    /// The login token only leaves the server when explicitly exposed
    pub fn to_login_response(challenge: LoginChallenge, expose_token: bool) -> LoginResponse {
        LoginResponse {
            message: challenge.message,
            login_token: expose_token.then_some(challenge.login_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge() -> LoginChallenge {
        LoginChallenge {
            email: "rupert@example.com".to_string(),
            login_token: "secret".to_string(),
            message: "Check your email for the magic login link.".to_string(),
        }
    }

    #[test]
    fn test_login_token_hidden_by_default() {
        assert_eq!(SessionMapper::to_login_response(challenge(), false).login_token, None);
        assert_eq!(
            SessionMapper::to_login_response(challenge(), true).login_token.as_deref(),
            Some("secret")
        );
    }
}
