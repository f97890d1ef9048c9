//! In-process HTTP backends for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Clone)]
struct RecordedCall {
    line: String,
    content_type: Option<String>,
    body: Value,
}

/// Fake analysis service that records every call it receives.
///
/// POSTs answer `201` with the body echoed back; GETs answer `200` with the
/// configured advice body. `fail_on` overrides the response for one path.
#[derive(Clone)]
pub struct RecordingBackend {
    log: Arc<Mutex<Vec<RecordedCall>>>,
    advice: String,
    failures: HashMap<&'static str, (StatusCode, String)>,
}

impl RecordingBackend {
    pub fn ok(advice: Value) -> Self {
        Self::raw(&advice.to_string())
    }

    pub fn raw(advice: &str) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            advice: advice.to_string(),
            failures: HashMap::new(),
        }
    }

    pub fn fail_on(mut self, path: &'static str, status: StatusCode, body: Value) -> Self {
        self.failures.insert(path, (status, body.to_string()));
        self
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(record).with_state(self.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|c| c.line.clone()).collect()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.log.lock().unwrap().iter().map(|c| c.body.clone()).collect()
    }

    pub fn content_types(&self) -> Vec<Option<String>> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.content_type.clone())
            .collect()
    }
}

async fn record(
    State(backend): State<RecordingBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    backend.log.lock().unwrap().push(RecordedCall {
        line: format!("{method} {path}"),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let json = [(CONTENT_TYPE, "application/json")];
    if let Some((status, body)) = backend.failures.get(path.as_str()) {
        return (*status, json, body.clone()).into_response();
    }
    if method == Method::GET {
        (StatusCode::OK, json, backend.advice.clone()).into_response()
    } else {
        (StatusCode::CREATED, json, body).into_response()
    }
}
