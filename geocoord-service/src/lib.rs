//! geocoord Service Library
//!
//! HTTP handlers, router and OpenAPI document for the coordinate service.
//! This library is used by both the geocoord-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use geocoord::Converter;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Converter configured at startup.
    pub converter: Converter,
}

/// OpenAPI documentation for the geocoord service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geocoord Coordinate Service",
        version = "0.1.0",
        description = "REST API for detecting, converting and measuring geographic coordinates.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Pedro Sanz Martinez", url = "https://github.com/pedrosanzmtz/geocoord")
    ),
    paths(
        handlers::detect,
        handlers::convert,
        handlers::distance,
        handlers::batch,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::DetectResponse,
            handlers::ConvertResponse,
            handlers::UtmResponse,
            handlers::DistanceResponse,
            handlers::BatchRequest,
            handlers::BatchResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "coordinates", description = "Coordinate detection and conversion endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the service router with docs, tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/detect", get(handlers::detect))
        .route("/convert", get(handlers::convert))
        .route("/distance", get(handlers::distance))
        .route("/batch", post(handlers::batch))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    BatchRequest, BatchResponse, ConvertQuery, ConvertResponse, DetectQuery, DetectResponse,
    DistanceQuery, DistanceResponse, ErrorResponse, HealthResponse,
};

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_serves_health() {
        let router = app(Arc::new(AppState {
            converter: Converter::default(),
        }));

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[test]
    fn test_openapi_lists_endpoints() {
        let doc = ApiDoc::openapi();
        for path in ["/detect", "/convert", "/distance", "/batch", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
