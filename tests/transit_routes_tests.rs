// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bus route and bus endpoint tests.

use axum::http::{Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;

use common::{create_test_app, mock_signed_in_user, send, TEST_TOKEN};

#[tokio::test]
async fn test_list_routes_is_public_and_paginated() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("select", "*"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "r-1", "route_number": "138" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(app, Method::GET, "/api/routes", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["route_number"], "138");
}

#[tokio::test]
async fn test_list_routes_with_buses() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("select", "*, buses(*)"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "r-1", "buses": [{ "id": "b-1" }] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app,
        Method::GET,
        "/api/routes?with_buses=true&limit=5&offset=10",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["buses"][0]["id"], "b-1");
}

#[tokio::test]
async fn test_search_routes_by_endpoints() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("start_location", "ilike.*colombo*"))
        .and(query_param("end_location", "ilike.*kandy*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "r-1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app,
        Method::GET,
        "/api/routes/search?start=colombo&end=kandy",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_routes_by_stop() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("stops", r#"cs.[{"name":"Fort"}]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "r-2" }])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) =
        send(app, Method::GET, "/api/routes/search?stop=Fort", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "r-2");
}

#[tokio::test]
async fn test_popular_routes_default_limit() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("order", "usage_count.desc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, _) = send(app, Method::GET, "/api/routes/popular", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_route_lookups_not_found() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, _, body) = send(app.clone(), Method::GET, "/api/routes/r-404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Route not found");

    let (status, _, _) = send(app, Method::GET, "/api/routes/number/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_by_number() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("route_number", "eq.138"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "r-1", "route_number": "138" }
        ])))
        .mount(&server)
        .await;

    let (status, _, body) = send(app, Method::GET, "/api/routes/number/138", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "r-1");
}

#[tokio::test]
async fn test_bad_query_string_is_json_error() {
    let (app, _state, _server) = create_test_app().await;

    let (status, headers, body) =
        send(app, Method::GET, "/api/routes?limit=abc", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert!(body["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn test_search_routes_is_paginated() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("stops", r#"cs.[{"name":"Fort"}]"#))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/routes"))
        .and(query_param("start_location", "ilike.*galle*"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, _) = send(
        app.clone(),
        Method::GET,
        "/api/routes/search?stop=Fort&limit=1000&offset=100",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) =
        send(app, Method::GET, "/api/routes/search?start=galle", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

// ─── Buses ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_active_buses() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("status", "eq.active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b-1", "status": "active" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(app, Method::GET, "/api/buses?status=active", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "b-1");
}

#[tokio::test]
async fn test_list_buses_unknown_status() {
    let (app, _state, _server) = create_test_app().await;

    let (status, _, body) = send(app, Method::GET, "/api/buses?status=parked", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unsupported status filter 'parked'");
}

#[tokio::test]
async fn test_list_buses_for_route() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("route_id", "eq.r-1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b-1" },
            { "id": "b-2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(app, Method::GET, "/api/buses?route_id=r-1", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_filtered_bus_lists_honor_limit() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("route_id", "eq.r-1"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "b-1" }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("status", "eq.active"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("bus_number", "ilike.*nb*"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    for uri in [
        "/api/buses?route_id=r-1&limit=5&offset=10",
        "/api/buses?status=active&limit=500",
        "/api/buses?q=nb",
    ] {
        let (status, _, _) = send(app.clone(), Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_bus_by_number() {
    let (app, _state, server) = create_test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/buses"))
        .and(query_param("bus_number", "eq.NB-1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b-1", "bus_number": "NB-1234" }
        ])))
        .mount(&server)
        .await;

    let (status, _, body) =
        send(app, Method::GET, "/api/buses/number/NB-1234", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "b-1");
}

#[tokio::test]
async fn test_update_location_requires_token() {
    let (app, _state, _server) = create_test_app().await;

    let (status, _, _) = send(
        app,
        Method::PUT,
        "/api/buses/b-1/location",
        None,
        Some(json!({ "latitude": 6.9, "longitude": 79.8 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_location() {
    let (app, _state, server) = create_test_app().await;
    mock_signed_in_user(&server, "u-1").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/buses"))
        .and(query_param("id", "eq.b-1"))
        .and(body_partial_json(json!({ "current_location": "POINT(79.8612 6.9271)" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b-1", "current_location": "POINT(79.8612 6.9271)" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app,
        Method::PUT,
        "/api/buses/b-1/location",
        Some(TEST_TOKEN),
        Some(json!({ "latitude": 6.9271, "longitude": 79.8612 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "b-1");
}

#[tokio::test]
async fn test_update_location_out_of_range() {
    let (app, _state, server) = create_test_app().await;
    mock_signed_in_user(&server, "u-1").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/buses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app,
        Method::PUT,
        "/api/buses/b-1/location",
        Some(TEST_TOKEN),
        Some(json!({ "latitude": 120.0, "longitude": 79.8 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "latitude must be between -90 and 90");
}

#[tokio::test]
async fn test_update_location_unknown_bus() {
    let (app, _state, server) = create_test_app().await;
    mock_signed_in_user(&server, "u-1").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/buses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app,
        Method::PUT,
        "/api/buses/b-404/location",
        Some(TEST_TOKEN),
        Some(json!({ "latitude": 6.9, "longitude": 79.8 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Bus not found");
}
