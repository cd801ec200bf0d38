//! In-process stand-in for the hosted API. Records every request and answers
//! with queued canned responses, in order.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anvil_examples::{AnvilClient, ClientConfig};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "test-key";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// `multipart/form-data` parts as (part headers, content), in order.
    /// Bodies are decoded lossily, so keep test files ASCII.
    pub fn multipart_parts(&self) -> Vec<(String, String)> {
        let boundary = self
            .header("content-type")
            .and_then(|content_type| content_type.split("boundary=").nth(1))
            .expect("multipart boundary");
        let body = String::from_utf8_lossy(&self.body);
        body.split(&format!("--{boundary}"))
            .filter_map(|part| {
                let (headers, content) = part.split_once("\r\n\r\n")?;
                Some((headers.trim().to_string(), content.trim_end_matches("\r\n").to_string()))
            })
            .collect()
    }

    /// The multipart part whose `Content-Disposition` names `name`.
    pub fn multipart_part(&self, name: &str) -> Option<(String, String)> {
        let needle = format!("name=\"{name}\"");
        self.multipart_parts().into_iter().find(|(headers, _)| headers.contains(&needle))
    }
}

#[derive(Clone, Debug)]
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn pdf(bytes: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/pdf",
            body: bytes.to_vec(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }
}

struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<Canned>>,
}

pub struct MockServer {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl MockServer {
    pub async fn start(responses: Vec<Canned>) -> Self {
        let shared = Arc::new(Shared {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        });

        let app = Router::new().fallback(record).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }

    pub fn client(&self) -> AnvilClient {
        AnvilClient::new(ClientConfig::new(TEST_API_KEY).with_base_url(self.base_url.clone())).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    shared.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let canned = shared.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
        Canned::json(
            StatusCode::NOT_FOUND,
            json!({ "errors": [{ "message": "no canned response" }] }),
        )
    });
    (canned.status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

pub fn graphql_data(operation: &str, value: Value) -> Canned {
    let mut data = serde_json::Map::new();
    data.insert(operation.to_string(), value);
    Canned::json(StatusCode::OK, json!({ "data": data }))
}
