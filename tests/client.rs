mod common;

use anvil_examples::AnvilError;
use anvil_examples::client::VERSION_LATEST;
use anvil_examples::commands::fill_pdf::fill_data;
use anvil_examples::graphql::GraphqlUpload;
use anvil_examples::payload::{CreateCastRequest, GeneratePdfPayload};
use axum::http::{Method, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use common::{Canned, MockServer, TEST_API_KEY};
use serde_json::json;

#[tokio::test]
async fn fill_pdf_posts_payload_and_returns_raw_bytes() {
    let pdf = b"%PDF-1.7\n\x00\xff binary";
    let server = MockServer::start(vec![Canned::pdf(pdf)]).await;

    let bytes = server.client().fill_pdf("tmpl123", &fill_data()).await.unwrap();
    assert_eq!(bytes, pdf);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/v1/fill/tmpl123.pdf");
    assert_eq!(request.query, None);
    assert_eq!(request.header("content-type"), Some("application/json"));

    let expected_auth = format!("Basic {}", BASE64.encode(format!("{TEST_API_KEY}:")));
    assert_eq!(request.header("authorization"), Some(expected_auth.as_str()));

    let body = request.json();
    assert_eq!(body["title"], "My PDF Title");
    assert_eq!(body["fontSize"], 10);
    assert_eq!(body["textColor"], "#333333");
    let payload = fill_data();
    let sent_keys: Vec<&String> = body["data"].as_object().unwrap().keys().collect();
    let expected_keys: Vec<&String> = payload.data.keys().collect();
    assert_eq!(sent_keys, expected_keys);
    assert_eq!(body["data"]["name"]["firstName"], "Robin");
}

#[tokio::test]
async fn fill_request_body_is_identical_across_runs() {
    let server = MockServer::start(vec![Canned::pdf(b"a"), Canned::pdf(b"b")]).await;
    let client = server.client();

    client.fill_pdf("tmpl", &fill_data()).await.unwrap();
    client.fill_pdf("tmpl", &fill_data()).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn fill_pdf_version_adds_query_parameter() {
    let server = MockServer::start(vec![Canned::pdf(b"%PDF")]).await;

    server
        .client()
        .fill_pdf_version("tmpl", &fill_data(), VERSION_LATEST)
        .await
        .unwrap();

    let request = &server.requests()[0];
    assert_eq!(request.path, "/api/v1/fill/tmpl.pdf");
    assert_eq!(request.query.as_deref(), Some("versionNumber=-1"));
}

#[tokio::test]
async fn rest_error_status_carries_body() {
    let server = MockServer::start(vec![Canned::text(StatusCode::UNAUTHORIZED, "Bad API key")]).await;

    let err = server
        .client()
        .generate_pdf(&GeneratePdfPayload::html("t", "<p/>", ""))
        .await
        .unwrap_err();

    match err {
        AnvilError::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Bad API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.requests()[0].path, "/api/v1/generate-pdf");
}

#[tokio::test]
async fn graphql_query_sends_query_and_variables() {
    let server = MockServer::start(vec![common::graphql_data("weld", json!({ "eid": "w1" }))]).await;

    let response = server
        .client()
        .query("query { weld { eid } }", Some(json!({ "eid": "w1" })))
        .await
        .unwrap();

    assert!(response.errors().is_none());
    assert_eq!(response.operation("weld").unwrap()["eid"], "w1");

    let request = &server.requests()[0];
    assert_eq!(request.path, "/graphql");
    assert_eq!(
        request.json(),
        json!({ "query": "query { weld { eid } }", "variables": { "eid": "w1" } })
    );
}

#[tokio::test]
async fn graphql_errors_are_returned_not_raised() {
    let server = MockServer::start(vec![Canned::json(
        StatusCode::BAD_REQUEST,
        json!({ "errors": [{ "message": "Variable \"$eid\" got invalid value" }] }),
    )])
    .await;

    let response = server.client().query("query { x }", None).await.unwrap();

    assert_eq!(
        response.errors().unwrap()[0]["message"],
        "Variable \"$eid\" got invalid value"
    );
    assert_eq!(server.requests()[0].json()["variables"], json!(null));
}

#[tokio::test]
async fn graphql_non_json_failure_is_an_api_error() {
    let server = MockServer::start(vec![Canned::text(StatusCode::BAD_GATEWAY, "upstream down")]).await;

    let err = server.client().query("query { x }", None).await.unwrap_err();
    assert!(matches!(err, AnvilError::Api { status: 502, .. }));
}

#[tokio::test]
async fn download_documents_gets_zip() {
    let server = MockServer::start(vec![Canned::pdf(b"PK\x03\x04")]).await;

    let archive = server.client().download_documents("grp1").await.unwrap();
    assert_eq!(archive, b"PK\x03\x04");

    let request = &server.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/document-group/grp1.zip");
    assert!(request.header("authorization").unwrap().starts_with("Basic "));
}

#[tokio::test]
async fn create_cast_sends_graphql_multipart_upload() {
    let server = MockServer::start(vec![common::graphql_data(
        "createCast",
        json!({ "eid": "cast1", "title": "Uploaded", "isTemplate": true }),
    )])
    .await;

    let request = CreateCastRequest {
        title: Some("Uploaded".to_string()),
        is_template: Some(true),
        ..Default::default()
    };
    let file = GraphqlUpload::new(b"%PDF-1.4 upload".to_vec(), "upload.pdf", "application/pdf");
    let response = server.client().create_cast(&request, file).await.unwrap();
    assert_eq!(response.operation("createCast").unwrap()["eid"], "cast1");

    let recorded = &server.requests()[0];
    assert_eq!(recorded.path, "/graphql");
    assert!(recorded.header("content-type").unwrap().starts_with("multipart/form-data"));
    assert!(recorded.header("authorization").unwrap().starts_with("Basic "));

    let parts = recorded.multipart_parts();
    assert_eq!(parts.len(), 3);

    let (_, operations) = recorded.multipart_part("operations").unwrap();
    let operations: serde_json::Value = serde_json::from_str(&operations).unwrap();
    assert!(operations["query"].as_str().unwrap().contains("createCast"));
    assert_eq!(
        operations["variables"],
        json!({ "title": "Uploaded", "isTemplate": true, "file": null })
    );

    let (_, map) = recorded.multipart_part("map").unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&map).unwrap(), json!({ "0": ["variables.file"] }));

    let (headers, content) = recorded.multipart_part("0").unwrap();
    assert!(headers.contains("filename=\"upload.pdf\""));
    assert!(headers.to_ascii_lowercase().contains("content-type: application/pdf"));
    assert_eq!(content, "%PDF-1.4 upload");
}
