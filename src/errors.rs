use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Io(#[from] tokio::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Failed extracting report data: {0}")]
    Extraction(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Field required: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Database not connected. Call connect() first.")]
    DatabaseNotConnected,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::DatabaseNotConnected
            | ApiError::Io(_)
            | ApiError::Csv(_)
            | ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    fn detail(&self) -> String {
        match self {
            ApiError::Io(_)
            | ApiError::Csv(_)
            | ApiError::Extraction(_) => ErrorMessages::Unexpected.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Error messages for the API Responses
pub enum ErrorMessages {
    Unexpected,
    InvalidFile,
    EmptyExtraction,
    MissingCompanyName,
    CompanyNotFound(String),
}

// Use the ErrorMessages enum to display error messages for the API Responses
impl fmt::Display for ErrorMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessages::Unexpected => write!(f, "We encountered an unexpected error while processing the report."),
            ErrorMessages::InvalidFile => write!(f, "Cannot extract data. Invalid file provided."),
            ErrorMessages::EmptyExtraction => write!(f, "Extraction failed. Extracted data is empty."),
            ErrorMessages::MissingCompanyName => write!(f, "Company Name not found in extracted data."),
            ErrorMessages::CompanyNotFound(name) => write!(f, "No data found for company {name}"),
        }
    }
}
