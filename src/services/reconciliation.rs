use crate::db::models::{UploadResponse, COMPANY_NAME};
use crate::db::DatabaseService;
use crate::errors::{ApiError, ErrorMessages};
use crate::services::{assets, comparison::compare_data, PdfExtractor};
use crate::Result;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// A report received from a client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Runs an uploaded report through storage, extraction, lookup and comparison
#[derive(Clone)]
pub struct ReconciliationService {
    db: DatabaseService,
    extractor: Arc<dyn PdfExtractor>,
    assets_path: PathBuf,
}

impl ReconciliationService {
    pub fn new(db: DatabaseService, extractor: Arc<dyn PdfExtractor>, assets_path: PathBuf) -> Self {
        Self {
            db,
            extractor,
            assets_path,
        }
    }

    pub async fn reconcile(&self, upload_id: &str, upload: UploadedFile) -> Result<UploadResponse> {
        let filename = assets::sanitize_filename(upload.filename.as_deref());
        let location =
            assets::store_upload(&self.assets_path, upload_id, &filename, &upload.bytes).await?;

        // pdf parsing is CPU bound and may panic on malformed input
        let extractor = Arc::clone(&self.extractor);
        let path = location.clone();
        let extracted = match tokio::task::spawn_blocking(move || extractor.extract(&path)).await {
            Ok(Ok(data)) => data,
            Ok(Err(err)) => {
                tracing::warn!("Extraction failed for {}: {}", filename, err);
                assets::discard_upload(&location).await;
                return Err(ApiError::BadRequest(ErrorMessages::InvalidFile.to_string()));
            }
            Err(err) => {
                tracing::error!("Extraction task for {} aborted: {}", filename, err);
                assets::discard_upload(&location).await;
                return Err(ApiError::BadRequest(ErrorMessages::InvalidFile.to_string()));
            }
        };

        // only reports that yielded data are kept under the assets directory
        if extracted.is_empty() {
            assets::discard_upload(&location).await;
            return Err(ApiError::BadRequest(
                ErrorMessages::EmptyExtraction.to_string(),
            ));
        }

        let company_name = extracted
            .get(COMPANY_NAME)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::BadRequest(ErrorMessages::MissingCompanyName.to_string()))?;

        let stored = self.db.query(&company_name).await?.ok_or_else(|| {
            ApiError::NotFound(ErrorMessages::CompanyNotFound(company_name.clone()).to_string())
        })?;

        let discrepancies = compare_data(&extracted, &stored);

        Ok(UploadResponse {
            company_name,
            extracted_data: extracted,
            stored_data: stored.to_map(),
            discrepancies,
        })
    }
}
