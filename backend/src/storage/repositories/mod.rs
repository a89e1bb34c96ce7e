// Repository modules
pub mod sales_repository;
pub mod session_repository;

// Re-export repository types
pub use sales_repository::SalesRepository;
pub use session_repository::SessionRepository;
