//! API request handlers for the reconciliation service.

pub mod health; // Service and database health
pub mod upload; // Report upload and comparison

// Re-export handlers for easier access
pub(crate) use health::health_check;
pub(crate) use upload::handle_upload;
