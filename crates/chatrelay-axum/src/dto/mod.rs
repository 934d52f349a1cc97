//! Data transfer objects for API responses.

pub mod system;

pub use system::{HealthResponse, StatusResponse};
