use crate::db::DatabaseService;
use crate::services::{AuthService, PdfExtractor, ReconciliationService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub auth: AuthService,
    pub reconciler: ReconciliationService,
}

impl AppState {
    pub fn new(
        db: DatabaseService,
        auth: AuthService,
        extractor: Arc<dyn PdfExtractor>,
        assets_path: PathBuf,
    ) -> Self {
        let reconciler = ReconciliationService::new(db.clone(), extractor, assets_path);
        Self {
            db,
            auth,
            reconciler,
        }
    }
}
