//! HTTP handlers for the landing page, analysis relay and report download.

use crate::app::SharedState;
use crate::models::{AnalyzeRequestBody, AnalyzeResponse, ErrorBody};
use crate::report::{self, ReportSpec};
use crate::Error;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::Value;

pub const INDEX_HTML: &str = include_str!("../static/index.html");
pub const INVALID_REPORT_REQUEST: &str =
    "유효하지 않은 요청 형식입니다. JSON 데이터를 전송해주세요.";

/// Handler failure rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn analyze(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let body = match payload {
        Ok(Json(value)) => AnalyzeRequestBody::from_value(&value),
        Err(rejection) => {
            tracing::warn!("Unreadable /analyze body, treating as empty: {}", rejection);
            AnalyzeRequestBody::default()
        }
    };

    let analysis = state
        .analysis
        .analyze(body.into_analysis_request())
        .await
        .map_err(|e| {
            tracing::error!("Analysis failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(AnalyzeResponse::from(analysis)))
}

pub async fn create_report(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fields = match payload {
        Ok(Json(Value::Object(fields))) => fields,
        Ok(Json(_)) => {
            tracing::warn!("Rejected report request: top-level JSON is not an object");
            return Err(ApiError::BadRequest(INVALID_REPORT_REQUEST.to_string()));
        }
        Err(rejection) => {
            tracing::warn!("Rejected report request: {}", rejection);
            return Err(ApiError::BadRequest(INVALID_REPORT_REQUEST.to_string()));
        }
    };

    let spec = ReportSpec::from_fields(&fields);
    let filename = report::report_filename(&spec.title);
    tracing::info!(
        groups = spec.analysis_results.len(),
        "Building report {}",
        filename
    );

    let bytes = report::build_report(spec).await.map_err(|e| {
        tracing::error!("Report generation failed: {}", e);
        ApiError::from(e)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, report::DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                report::content_disposition(&filename),
            ),
        ],
        Body::from(bytes),
    )
        .into_response())
}
