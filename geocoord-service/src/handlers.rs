//! HTTP request handlers for the coordinate service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use geocoord::{
    BatchItemOutcome, BatchItemReport, BatchSummary, CoordError, CoordinateFormat, Operation,
    Target, UtmCoordinate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the detect endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetectQuery {
    /// Coordinate text in any notation.
    pub input: String,
}

/// Detected notation.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetectResponse {
    pub input: String,
    /// One of DMS, DecimalDegrees, UTM, MGRS, Unknown.
    #[schema(value_type = String)]
    pub format: CoordinateFormat,
}

/// Query parameters for the convert endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Coordinate text (DMS or decimal degrees).
    pub input: String,
    /// Target notation: decimal, dms or utm. Default is decimal.
    #[param(value_type = Option<String>)]
    pub to: Option<Target>,
}

/// UTM projection result.
#[derive(Debug, Serialize, ToSchema)]
pub struct UtmResponse {
    pub zone: u8,
    /// N or S.
    pub hemisphere: String,
    pub easting: f64,
    pub northing: f64,
}

impl From<UtmCoordinate> for UtmResponse {
    fn from(utm: UtmCoordinate) -> Self {
        Self {
            zone: utm.zone,
            hemisphere: utm.hemisphere.to_string(),
            easting: utm.easting,
            northing: utm.northing,
        }
    }
}

/// Successful conversion.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConvertResponse {
    pub input: String,
    #[schema(value_type = String)]
    pub format: CoordinateFormat,
    /// decimal, dms or utm.
    #[schema(value_type = String)]
    pub target: Target,
    /// Rendered result, e.g. `45.504166667 -122.675000000`.
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm: Option<UtmResponse>,
}

/// Query parameters for the distance endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistanceQuery {
    /// Start coordinate (DMS or decimal degrees).
    pub from: String,
    /// End coordinate (DMS or decimal degrees).
    pub to: String,
}

/// Great-circle distance and bearings.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    pub distance_meters: f64,
    pub distance_km: f64,
    /// Degrees clockwise from north, in [0, 360).
    pub forward_bearing_deg: f64,
    pub reverse_bearing_deg: f64,
}

/// Batch request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    /// validate, decimal, utm or dms. Default is decimal.
    #[serde(default)]
    #[schema(value_type = String)]
    pub operation: Operation,
    /// One coordinate per entry.
    pub lines: Vec<String>,
}

/// Batch results in input order.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<BatchItemReport>,
    #[schema(value_type = Object)]
    pub summary: BatchSummary,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Stable error code, e.g. `out_of_range`.
    pub code: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Detect the notation of a coordinate string.
#[utoipa::path(
    get,
    path = "/detect",
    tag = "coordinates",
    params(DetectQuery),
    responses(
        (status = 200, description = "Detected format", body = DetectResponse)
    )
)]
pub async fn detect(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DetectQuery>,
) -> Json<DetectResponse> {
    let format = state.converter.detect(&query.input);
    Json(DetectResponse {
        input: query.input,
        format,
    })
}

/// Convert a coordinate string.
///
/// # Returns
///
/// - `200 OK` with the converted value
/// - `400 Bad Request` if the input cannot be parsed
/// - `422 Unprocessable Entity` if the input notation cannot be converted
#[utoipa::path(
    get,
    path = "/convert",
    tag = "coordinates",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted coordinate", body = ConvertResponse),
        (status = 400, description = "Invalid coordinate", body = ErrorResponse),
        (status = 422, description = "Unsupported conversion", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConvertQuery>,
) -> impl IntoResponse {
    let target = query.to.unwrap_or(Target::Decimal);
    tracing::debug!(input = %query.input, target = %target, "Convert query");

    match state.converter.convert(&query.input, target) {
        Ok(record) => {
            let response = ConvertResponse {
                input: record.input,
                format: record.format,
                target,
                output: record.output,
                latitude: record.coordinate.map(|c| c.latitude()),
                longitude: record.coordinate.map(|c| c.longitude()),
                utm: record.utm.map(UtmResponse::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&query.input, e),
    }
}

/// Distance and bearings between two coordinates.
#[utoipa::path(
    get,
    path = "/distance",
    tag = "coordinates",
    params(DistanceQuery),
    responses(
        (status = 200, description = "Distance and bearings", body = DistanceResponse),
        (status = 400, description = "Invalid coordinate", body = ErrorResponse),
        (status = 422, description = "Unsupported coordinate notation", body = ErrorResponse)
    )
)]
pub async fn distance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DistanceQuery>,
) -> impl IntoResponse {
    match state.converter.distance(&query.from, &query.to) {
        Ok(result) => (
            StatusCode::OK,
            Json(DistanceResponse {
                distance_meters: result.distance_meters,
                distance_km: result.distance_km(),
                forward_bearing_deg: result.forward_bearing_deg,
                reverse_bearing_deg: result.reverse_bearing_deg,
            }),
        )
            .into_response(),
        Err(e) => error_response(&format!("{} -> {}", query.from, query.to), e),
    }
}

/// Apply one operation to many lines.
///
/// Individual failures are reported per item; the request itself succeeds.
#[utoipa::path(
    post,
    path = "/batch",
    tag = "coordinates",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Per-line results", body = BatchResponse)
    )
)]
pub async fn batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Json<BatchResponse> {
    let outcomes = state
        .converter
        .batch(request.operation)
        .run_async(&request.lines, |_| {})
        .await;

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        operation = %request.operation,
        total = summary.total,
        failed = summary.failed,
        "Batch request processed"
    );

    Json(BatchResponse {
        results: outcomes.iter().map(BatchItemOutcome::report).collect(),
        summary,
    })
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create an error response for a failed conversion.
fn error_response(input: &str, e: CoordError) -> axum::response::Response {
    let status = match e {
        CoordError::UnsupportedOperation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    };

    tracing::warn!(input, error = %e, "Coordinate request failed");

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: e.code().to_string(),
        }),
    )
        .into_response()
}
