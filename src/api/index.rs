// src/api/index.rs

use axum::Json;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// Static JSON response for the index endpoint
static INDEX_JSON: OnceLock<Value> = OnceLock::new();

/// Handler for the index endpoint that provides API documentation
///
/// # Endpoint: GET /
///
/// # Returns
/// * `Json<Value>` - JSON response containing API endpoint documentation
pub fn index() -> Json<Value> {
    let value = INDEX_JSON.get_or_init(|| {
        json!({
            "endpoints": [
                {
                    "path": "/",
                    "method": "GET",
                    "description": "API endpoint documentation",
                    "params": {}
                },
                {
                    "path": "/health",
                    "method": "GET",
                    "description": "Service health and database status",
                    "params": {}
                },
                {
                    "path": "/upload",
                    "method": "POST",
                    "description": "Upload a financial report (multipart/form-data) and compare it with the stored company record",
                    "params": {
                        "file": {
                            "type": "file",
                            "required": true,
                            "description": "PDF report containing `Label: value` lines such as `Company Name: ExampleCo`"
                        },
                        "api_key": {
                            "type": "string",
                            "required": true,
                            "description": "API key issued for this service"
                        }
                    }
                },
            ]
        })
    });

    Json(value.clone())
}
