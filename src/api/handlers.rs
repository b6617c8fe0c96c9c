//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::TabularError;
use crate::generate::generate;
use crate::mapper::RecordSource;
use crate::read::read_from_stream;
use crate::types::TabularDocument;

use super::server::AppState;
use super::sink::HttpResponseSink;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Tabular API Server".to_string(),
        version: state.version.clone(),
        description: "Records to xlsx/csv downloads and uploads back to rows".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/export?filename=<name.xlsx|name.csv>",
                "POST",
                "Generate a file from a JSON array of records (or a single object)",
            ),
            EndpointInfo::new(
                "/api/v1/import?filename=<name.xlsx|name.csv>",
                "POST",
                "Parse an uploaded file body into rows",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub formats: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        formats: vec!["xlsx".to_string(), "csv".to_string()],
    }))
}

/// Query parameters naming the file being exported or imported
#[derive(Debug, Deserialize)]
pub struct FileParams {
    pub filename: String,
}

/// POST /api/v1/export - Generate a file from JSON records
///
/// On success the body is the file itself, not an `ApiResponse`.
pub async fn export(
    Query(params): Query<FileParams>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let source = match RecordSource::from_json(payload) {
        Ok(source) => source,
        Err(e) => return error_response(&e),
    };

    let mut sink = HttpResponseSink::new();
    match generate(&mut sink, &params.filename, source) {
        // A sink failure has already been written into the sink as a 500
        Ok(()) | Err(TabularError::Sink(_)) => sink.into_response(),
        Err(e) => error_response(&e),
    }
}

/// Import response
#[derive(Serialize, Default)]
pub struct ImportResponse {
    pub filename: String,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub rows: TabularDocument,
}

/// POST /api/v1/import - Parse an uploaded file
pub async fn import(Query(params): Query<FileParams>, body: Bytes) -> Response {
    match read_from_stream(body.as_ref(), &params.filename) {
        Ok(doc) => Json(ApiResponse::ok(ImportResponse {
            filename: params.filename,
            row_count: doc.len(),
            columns: doc.columns().into_iter().map(str::to_string).collect(),
            rows: doc,
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// HTTP status for a failed export/import
pub fn status_for(err: &TabularError) -> StatusCode {
    match err {
        TabularError::Format { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        TabularError::EmptyData | TabularError::Validation(_) | TabularError::Json(_) => {
            StatusCode::BAD_REQUEST
        }
        TabularError::Access { .. } | TabularError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TabularError::Sink(_) | TabularError::Export(_) | TabularError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: &TabularError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        warn!(error = %err, "Request failed");
    }
    (status, Json(ApiResponse::<()>::err(err.to_string()))).into_response()
}
