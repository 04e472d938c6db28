use crate::api::AppState;
use crate::db::models::UploadResponse;
use crate::errors::ApiError;
use crate::logging::log_to_file;
use crate::services::UploadedFile;
use crate::Result;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tracing::info;

/// Fields of the upload form; anything else is ignored
#[derive(Default)]
struct UploadForm {
    api_key: Option<String>,
    file: Option<UploadedFile>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Failed to read multipart field", e))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "api_key" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("Failed to read api_key", e))?;
                    // a non-UTF-8 key is treated as missing
                    form.api_key = String::from_utf8(bytes.to_vec()).ok();
                }
                "file" => {
                    let filename = field.file_name().map(str::to_owned);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("Failed to read file content", e))?;
                    form.file = Some(UploadedFile {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Keeps the rejection status axum assigns, e.g. 413 once the body limit is hit
fn multipart_error(context: &str, err: MultipartError) -> ApiError {
    let message = format!("{}: {}", context, err.body_text());
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(message),
        _ => ApiError::BadRequest(message),
    }
}

/// Handler for uploading a financial report
///
/// # Endpoint: POST /upload
///
/// # Arguments
/// * `state` - Application state
/// * `multipart` - Form with `file` (the PDF report) and `api_key`
///
/// # Returns
/// * `Json<UploadResponse>` - Extracted data, stored record and per-field discrepancies
///
/// # Security
/// Requires an `api_key` form field matching the configured key
pub(crate) async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let form = UploadForm::read(&mut multipart).await?;

    state.auth.authorize(form.api_key.as_deref())?;

    let file = form.file.ok_or(ApiError::MissingField("file"))?;

    let upload_id = uuid::Uuid::new_v4().to_string();
    let filename = file.filename.clone();
    let size = file.bytes.len();
    log_to_file(
        "POST",
        "/upload",
        Some(&json!({ "upload_id": upload_id, "filename": filename, "size": size })),
    );

    match state.reconciler.reconcile(&upload_id, file).await {
        Ok(response) => {
            info!(
                target: "audit",
                "Upload {} matched {} with {} mismatched fields",
                upload_id,
                response.company_name,
                response.mismatch_count()
            );
            Ok(Json(response))
        }
        Err(err) => {
            info!(target: "audit", "Upload {} rejected: {}", upload_id, err);
            Err(err)
        }
    }
}
