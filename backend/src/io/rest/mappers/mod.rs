//! Mappers between domain types and `shared` DTOs.

pub mod dashboard_mapper;
pub mod session_mapper;

pub use dashboard_mapper::DashboardMapper;
pub use session_mapper::SessionMapper;
