//! Database models and response types.
//! The CSV row model lives in `record`, API payloads in `responses`.

mod record; // Company record loaded from the CSV database
mod responses; // API response models

// Re-export all models for easier access
pub use record::*;
pub use responses::*;
