//! Integration tests for the HTTP API.

use axum::http::StatusCode;
use axum_test::TestServer;
use geocoord::{Converter, ConverterBuilder, SplitStrategy};
use geocoord_service::{app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

fn create_test_server(converter: Converter) -> TestServer {
    TestServer::new(app(Arc::new(AppState { converter }))).unwrap()
}

fn default_server() -> TestServer {
    create_test_server(Converter::default())
}

#[tokio::test]
async fn test_detect_endpoint() {
    let server = default_server();

    let response = server
        .get("/detect")
        .add_query_param("input", "N45°30'15\" W122°40'30\"")
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["format"], "DMS");

    let response = server
        .get("/detect")
        .add_query_param("input", "18TWL8395907350")
        .await;
    let json: Value = response.json();
    assert_eq!(json["format"], "MGRS");

    let response = server.get("/detect").add_query_param("input", "").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["format"], "Unknown");
}

#[tokio::test]
async fn test_convert_to_decimal() {
    let server = create_test_server(ConverterBuilder::new().decimal_precision(6).build());

    let response = server
        .get("/convert")
        .add_query_param("input", "N45°30'15\" W122°40'30\"")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["output"], "45.504167 -122.675000");
    assert_eq!(json["format"], "DMS");
    assert_eq!(json["target"], "decimal");
    assert!(json.get("utm").is_none());
}

#[tokio::test]
async fn test_convert_to_utm() {
    let server = default_server();

    let response = server
        .get("/convert")
        .add_query_param("input", "40.7128, -74.0060")
        .add_query_param("to", "utm")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["utm"]["zone"], 18);
    assert_eq!(json["utm"]["hemisphere"], "N");
    assert_eq!(json["utm"]["easting"], 583959.0);
    assert_eq!(json["output"], "18N 583959 4507351");
}

#[tokio::test]
async fn test_convert_to_dms() {
    let server = default_server();

    let response = server
        .get("/convert")
        .add_query_param("input", "45.504167, -122.675")
        .add_query_param("to", "dms")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["output"], "N45°30'15.00\" W122°40'30.00\"");
    assert_eq!(json["latitude"], 45.504167);
}

#[tokio::test]
async fn test_convert_out_of_range() {
    let server = default_server();

    let response = server
        .get("/convert")
        .add_query_param("input", "95°00'00\"N 10°00'00\"E")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: Value = response.json();
    assert_eq!(json["code"], "out_of_range");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Latitude out of range"));
}

#[tokio::test]
async fn test_convert_unsupported_source() {
    let server = default_server();

    let response = server
        .get("/convert")
        .add_query_param("input", "18T 583959 4507351")
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json: Value = response.json();
    assert_eq!(json["code"], "unsupported_operation");
}

#[tokio::test]
async fn test_convert_missing_params() {
    let server = default_server();

    let response = server.get("/convert").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/convert")
        .add_query_param("input", "1, 2")
        .add_query_param("to", "kml")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_split_strategy_configuration() {
    let input = "N45 30 15 W122 40";

    let response = default_server()
        .get("/convert")
        .add_query_param("input", input)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let anchored = create_test_server(
        ConverterBuilder::new()
            .split_strategy(SplitStrategy::DirectionAnchored)
            .build(),
    );
    let response = anchored.get("/convert").add_query_param("input", input).await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_distance_endpoint() {
    let server = default_server();

    let response = server
        .get("/distance")
        .add_query_param("from", "40.7128, -74.0060")
        .add_query_param("to", "34.0522, -118.2437")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    let km = json["distance_km"].as_f64().unwrap();
    assert!((3930.0..3950.0).contains(&km));
    let bearing = json["forward_bearing_deg"].as_f64().unwrap();
    assert!((273.0..274.0).contains(&bearing));
}

#[tokio::test]
async fn test_distance_invalid_input() {
    let server = default_server();

    let response = server
        .get("/distance")
        .add_query_param("from", "bogus")
        .add_query_param("to", "1, 2")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: Value = response.json();
    assert_eq!(json["code"], "unrecognized_format");
}

#[tokio::test]
async fn test_batch_endpoint() {
    let server = default_server();

    let response = server
        .post("/batch")
        .json(&json!({
            "operation": "decimal",
            "lines": ["", "40.7,-74.0", "bogus"]
        }))
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["error"], "Empty input");
    assert_eq!(results[1]["success"], true);
    assert_eq!(results[1]["data"]["output"], "40.700000000 -74.000000000");
    assert_eq!(results[2]["code"], "unrecognized_format");

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["index"], i);
    }

    assert_eq!(json["summary"]["total"], 3);
    assert_eq!(json["summary"]["succeeded"], 1);
    assert_eq!(json["summary"]["failed"], 2);
}

#[tokio::test]
async fn test_batch_large_input_yields() {
    let server = create_test_server(ConverterBuilder::new().yield_interval(7).build());
    let lines: Vec<String> = (0..500).map(|i| format!("{}, {}", i % 90, i % 180)).collect();

    let response = server
        .post("/batch")
        .json(&json!({ "operation": "utm", "lines": lines }))
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["summary"]["total"], 500);
    assert_eq!(json["summary"]["failed"], 0);
    assert_eq!(json["results"][499]["index"], 499);
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = default_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_openapi_document() {
    let server = default_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert!(json["paths"]["/convert"].is_object());
    assert!(json["paths"]["/batch"].is_object());
}
