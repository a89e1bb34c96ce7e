//! # Storage Module
//!
//! Persistence for day records, users, login tokens and sessions.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`repositories`] are the production implementation.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{SalesRepository, SessionRepository};
pub use traits::{SalesStorage, SessionStorage};
