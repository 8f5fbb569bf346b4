// Mock booking API for integration tests, bound to an ephemeral port.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct MockApi {
    pub base_url: String,
    log: Log,
}

impl MockApi {
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().expect("log mutex poisoned").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

// Spawn the mock on the current runtime and return its base URL.
pub async fn spawn_mock_api() -> MockApi {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/bookings/available", get(available))
        .route("/bookings/create", post(create))
        .route("/bookings", get(list))
        .route("/bookings/user", get(lookup))
        .route("/bookings/delete", post(delete))
        .with_state(log.clone());

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock api failed");
    });

    MockApi {
        base_url: format!("http://{addr}"),
        log,
    }
}

fn record(log: &Log, path: &'static str, query: HashMap<String, String>, body: Option<Value>) {
    log.lock()
        .expect("log mutex poisoned")
        .push(Recorded { path, query, body });
}

async fn available(
    State(log): State<Log>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&log, "/bookings/available", query, None);
    Json(json!([{ "start": 540, "end": 570 }, { "start": 600, "end": 660 }]))
}

async fn create(State(log): State<Log>, Json(body): Json<Value>) -> StatusCode {
    record(&log, "/bookings/create", HashMap::new(), Some(body));
    StatusCode::OK
}

async fn list(
    State(log): State<Log>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let user_id = query.get("userId").cloned().unwrap_or_default();
    record(&log, "/bookings", query, None);
    Json(json!([{
        "date": "2024-12-03",
        "serviceId": "listed-service",
        "bookingId": "listed-booking",
        "userId": user_id
    }]))
}

async fn lookup(
    State(log): State<Log>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    record(&log, "/bookings/user", query, None);
    StatusCode::NOT_FOUND
}

async fn delete(State(log): State<Log>, Json(body): Json<Value>) -> StatusCode {
    record(&log, "/bookings/delete", HashMap::new(), Some(body));
    StatusCode::BAD_REQUEST
}
