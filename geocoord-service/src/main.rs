//! geocoord Service - HTTP microservice for coordinate conversion.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOCOORD_PORT` | HTTP server port | 8080 |
//! | `GEOCOORD_DECIMAL_PRECISION` | Fraction digits for decimal output | 9 |
//! | `GEOCOORD_DMS_PRECISION` | Fraction digits for DMS seconds | 2 |
//! | `GEOCOORD_SPLIT` | DMS pair split: "midpoint" or "direction" | midpoint |
//! | `GEOCOORD_YIELD_INTERVAL` | Batch items between scheduler yields | 100 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /detect?input=...` - Detect coordinate notation
//! - `GET /convert?input=...&to=decimal|dms|utm` - Convert a coordinate
//! - `GET /distance?from=...&to=...` - Great-circle distance and bearings
//! - `POST /batch` - Convert many lines at once
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use geocoord::ConverterBuilder;
use geocoord_service::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocoord_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("GEOCOORD_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // The library reads the GEOCOORD_* conversion settings
    let converter = ConverterBuilder::from_env().build();
    let options = converter.options();

    tracing::info!(
        decimal_precision = options.decimal_precision,
        dms_precision = options.dms_precision,
        split = ?options.split_strategy,
        yield_interval = options.yield_interval,
        port = port,
        "Starting geocoord service"
    );

    let state = Arc::new(AppState { converter });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
