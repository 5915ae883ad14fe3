//! Fake CRM Test Utilities
//!
//! `FakeCrmServer` serves the CRM's custom-object endpoints from memory on an
//! ephemeral local port, so adapters and routes can be exercised over real
//! HTTP without network access:
//!
//! - `GET  /crm/v3/objects/:object_type` honours `limit`, `properties`, `archived`
//! - `POST /crm/v3/objects/:object_type` assigns numeric ids starting at 1001
//! - `GET  /crm/v3/objects/:object_type/:id` answers 404 for unknown ids
//!
//! Every request is recorded and must carry `Authorization: Bearer <token>`.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Token the fake accepts unless started with another one
pub const FAKE_ACCESS_TOKEN: &str = "pat-test-token";

/// Properties the store adds to every record it returns
const SYSTEM_PROPERTIES: [&str; 3] = ["hs_createdate", "hs_lastmodifieddate", "hs_object_id"];

const FIRST_RECORD_ID: u64 = 1001;
const DEFAULT_PAGE_SIZE: usize = 10;

/// A request as the fake received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    properties: BTreeMap<String, String>,
    archived: bool,
    created_at: String,
}

impl StoredRecord {
    /// Renders the record, restricted to the requested properties when given
    fn to_json(&self, requested: Option<&[String]>) -> Value {
        let mut properties = Map::new();
        for name in SYSTEM_PROPERTIES {
            if let Some(value) = self.properties.get(name) {
                properties.insert(name.to_string(), json!(value));
            }
        }
        match requested {
            Some(names) => {
                for name in names {
                    let value = self.properties.get(name).map_or(Value::Null, |v| json!(v));
                    properties.insert(name.clone(), value);
                }
            }
            None => {
                for (name, value) in &self.properties {
                    properties.insert(name.clone(), json!(value));
                }
            }
        }

        json!({
            "id": self.id,
            "properties": properties,
            "createdAt": self.created_at,
            "updatedAt": self.created_at,
            "archived": self.archived,
        })
    }
}

#[derive(Debug, Default)]
struct Store {
    records: Vec<StoredRecord>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
    canned_response: Option<(StatusCode, Value)>,
}

impl Store {
    fn insert(&mut self, properties: BTreeMap<String, String>, archived: bool) -> StoredRecord {
        if self.next_id == 0 {
            self.next_id = FIRST_RECORD_ID;
        }
        let id = self.next_id.to_string();
        self.next_id += 1;

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut properties = properties;
        properties.insert("hs_object_id".to_string(), id.clone());
        properties.insert("hs_createdate".to_string(), created_at.clone());
        properties.insert("hs_lastmodifieddate".to_string(), created_at.clone());

        let record = StoredRecord {
            id,
            properties,
            archived,
            created_at,
        };
        self.records.push(record.clone());
        record
    }
}

#[derive(Clone)]
struct FakeState {
    store: Arc<Mutex<Store>>,
    token: String,
}

impl FakeState {
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("fake CRM store poisoned")
    }

    /// Records the request and returns the response it must get instead of
    /// normal handling, if any
    fn intercept(
        &self,
        method: Method,
        path: String,
        query: &HashMap<String, String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) -> Option<Response> {
        let authorization = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        let mut store = self.lock();
        store.requests.push(RecordedRequest {
            method,
            path,
            query: query.clone(),
            authorization: authorization.clone(),
            body,
        });

        if authorization.as_deref() != Some(format!("Bearer {}", self.token).as_str()) {
            return Some(error_response(
                StatusCode::UNAUTHORIZED,
                "Authentication credentials not found.",
                "INVALID_AUTHENTICATION",
            ));
        }

        store
            .canned_response
            .take()
            .map(|(status, body)| (status, Json(body)).into_response())
    }
}

fn error_response(status: StatusCode, message: &str, category: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "message": message,
            "category": category,
        })),
    )
        .into_response()
}

fn requested_properties(query: &HashMap<String, String>) -> Option<Vec<String>> {
    query
        .get("properties")
        .map(|joined| joined.split(',').filter(|p| !p.is_empty()).map(str::to_string).collect())
}

fn wants_archived(query: &HashMap<String, String>) -> bool {
    query.get("archived").map(|a| a == "true").unwrap_or(false)
}

async fn list_objects(
    State(state): State<FakeState>,
    Path(object_type): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let path = format!("/crm/v3/objects/{}", object_type);
    if let Some(response) = state.intercept(Method::GET, path, &query, &headers, None) {
        return response;
    }

    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let archived = wants_archived(&query);
    let requested = requested_properties(&query);

    let store = state.lock();
    let results: Vec<Value> = store
        .records
        .iter()
        .filter(|r| r.archived == archived)
        .take(limit)
        .map(|r| r.to_json(requested.as_deref()))
        .collect();

    Json(json!({ "results": results })).into_response()
}

async fn create_object(
    State(state): State<FakeState>,
    Path(object_type): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/crm/v3/objects/{}", object_type);
    let no_query = HashMap::new();
    if let Some(response) =
        state.intercept(Method::POST, path, &no_query, &headers, Some(body.clone()))
    {
        return response;
    }

    let Some(input) = body.get("properties").and_then(Value::as_object) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid input JSON", "VALIDATION_ERROR");
    };

    let mut properties = BTreeMap::new();
    for (name, value) in input {
        match value {
            Value::String(s) => {
                properties.insert(name.clone(), s.clone());
            }
            _ => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Property values were not valid: {}", name),
                    "VALIDATION_ERROR",
                )
            }
        }
    }

    let record = state.lock().insert(properties, false);
    (StatusCode::CREATED, Json(record.to_json(None))).into_response()
}

async fn get_object(
    State(state): State<FakeState>,
    Path((object_type, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let path = format!("/crm/v3/objects/{}/{}", object_type, id);
    if let Some(response) = state.intercept(Method::GET, path, &query, &headers, None) {
        return response;
    }

    let archived = wants_archived(&query);
    let requested = requested_properties(&query);

    let store = state.lock();
    match store.records.iter().find(|r| r.id == id && r.archived == archived) {
        Some(record) => Json(record.to_json(requested.as_deref())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Object not found.  objectId are usually numeric.",
            "OBJECT_NOT_FOUND",
        ),
    }
}

/// An in-memory stand-in for the CRM object API
pub struct FakeCrmServer {
    base_url: String,
    state: FakeState,
    task: JoinHandle<()>,
}

impl FakeCrmServer {
    /// Starts a fake accepting [`FAKE_ACCESS_TOKEN`]
    pub async fn start() -> Self {
        Self::start_with_token(FAKE_ACCESS_TOKEN).await
    }

    /// Starts a fake accepting the given bearer token
    pub async fn start_with_token(token: impl Into<String>) -> Self {
        let state = FakeState {
            store: Arc::new(Mutex::new(Store::default())),
            token: token.into(),
        };

        let router = Router::new()
            .route("/crm/v3/objects/:object_type", get(list_objects).post(create_object))
            .route("/crm/v3/objects/:object_type/:id", get(get_object))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake CRM listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read fake CRM address");

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            task,
        }
    }

    /// Base URL to hand to an adapter
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token the fake accepts
    pub fn token(&self) -> &str {
        &self.state.token
    }

    /// Stores an active record directly and returns its id
    pub fn seed(&self, properties: &[(&str, &str)]) -> String {
        self.seed_with_archived(properties, false)
    }

    /// Stores an archived record directly and returns its id
    pub fn seed_archived(&self, properties: &[(&str, &str)]) -> String {
        self.seed_with_archived(properties, true)
    }

    fn seed_with_archived(&self, properties: &[(&str, &str)], archived: bool) -> String {
        let properties = properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.state.lock().insert(properties, archived).id
    }

    /// Full stored properties of a record, including system properties
    pub fn stored_properties(&self, id: &str) -> Option<BTreeMap<String, String>> {
        self.state
            .lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.properties.clone())
    }

    /// Number of records held, archived or not
    pub fn record_count(&self) -> usize {
        self.state.lock().records.len()
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Makes the next authenticated request fail with the given status and body
    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.respond_next(status, body);
    }

    /// Answers the next authenticated request with the given status and body
    /// instead of the stored records
    pub fn respond_next(&self, status: StatusCode, body: Value) {
        self.state.lock().canned_response = Some((status, body));
    }
}

impl Drop for FakeCrmServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Returns a base URL on which nothing is listening
///
/// Binds an ephemeral port and releases it, so a connect attempt is refused.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");
    drop(listener);
    format!("http://{}", addr)
}
