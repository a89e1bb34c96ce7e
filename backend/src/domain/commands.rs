//! Domain-level command and query types.
//!
//! Used by services inside the domain layer and not exposed over the public
//! API. The REST layer maps the `shared` DTOs to these internal types.

pub mod sales {
    use crate::domain::models::DayRecord;

    /// Input for saving one day of the active month
    #[derive(Debug, Clone, PartialEq)]
    pub struct SaveDayCommand {
        pub day: u32,
        pub record: DayRecord,
    }
}

pub mod session {
    use crate::domain::models::SessionContext;

    /// Input for requesting a magic link
    #[derive(Debug, Clone)]
    pub struct RequestLoginCommand {
        pub email: String,
    }

    /// Result of requesting a magic link
    #[derive(Debug, Clone)]
    pub struct LoginChallenge {
        pub email: String,
        /// One-time token that would be embedded in the emailed link
        pub login_token: String,
        pub message: String,
    }

    /// Input for exchanging a login token
    #[derive(Debug, Clone)]
    pub struct VerifyLoginCommand {
        pub token: String,
    }

    /// Result of a successful verification
    #[derive(Debug, Clone)]
    pub struct VerifiedSession {
        pub session: SessionContext,
    }
}
