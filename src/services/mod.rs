pub mod assets;
pub mod auth;
pub mod comparison;
pub mod extraction;
pub mod reconciliation;

pub use auth::AuthService;
pub use extraction::{PdfExtractor, TextPdfExtractor};
pub use reconciliation::{ReconciliationService, UploadedFile};
