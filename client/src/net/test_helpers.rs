//! Scripted transport and client fixtures shared by unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::http::{ApiClient, TOKEN_REFRESH_PATH};
use super::transport::{AUTHORIZATION, HttpRequest, HttpResponse, Transport};
use crate::error::ApiError;
use crate::state::session::{MemoryTokenStore, Session};

pub const BASE_URL: &str = "http://backend.test/api";

type Route = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync>;

// =========================================================================
// MockTransport
// =========================================================================

/// Records every request and answers through a routing closure.
///
/// Refresh calls yield once before answering so concurrent callers get a
/// chance to pile up behind an in-flight refresh.
pub struct MockTransport {
    route: Route,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new<F>(route: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self { route: Box::new(route), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests whose URL ends with `path`.
    pub fn calls_to(&self, path: &str) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|r| r.url.ends_with(path))
            .collect()
    }

    pub fn refresh_calls(&self) -> Vec<HttpRequest> {
        self.calls_to(TOKEN_REFRESH_PATH)
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.lock().unwrap().push(request.clone());
        if request.url.ends_with(TOKEN_REFRESH_PATH) {
            tokio::task::yield_now().await;
        }
        (self.route)(&request)
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub struct Fixture {
    pub client: ApiClient,
    pub transport: Arc<MockTransport>,
    pub store: Arc<MemoryTokenStore>,
}

pub fn fixture<F>(session: Session, route: F) -> Fixture
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
{
    let transport = Arc::new(MockTransport::new(route));
    let store = Arc::new(MemoryTokenStore::new(session));
    let client = ApiClient::new(BASE_URL, transport.clone(), store.clone());
    Fixture { client, transport, store }
}

pub fn json(status: u16, value: Value) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::new(status, value.to_string()))
}

pub fn bearer(request: &HttpRequest) -> Option<&str> {
    request.header(AUTHORIZATION)
}

pub fn body(request: &HttpRequest) -> Value {
    request.body.clone().unwrap_or(Value::Null)
}

/// Route that answers every call with `200 []`.
pub fn empty_list(_: &HttpRequest) -> Result<HttpResponse, ApiError> {
    json(200, Value::Array(Vec::new()))
}
