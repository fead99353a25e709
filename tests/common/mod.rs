//Shared helpers for the router tests. Each test file is its own crate, so not every helper is used everywhere.
#![allow(dead_code)]
#![allow(non_snake_case)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::{header, Method, Request, StatusCode}, Router};
use serde_json::Value;
use tower::ServiceExt;

use loanOffice::error::HandlerError;
use loanOffice::models::session::SessionClaims;
use loanOffice::routes::buildRouter;
use loanOffice::services::{appState::AppState, mediator::{Mediator, Request as MediatorRequest, RequestHandler}, sessions::MemorySessionStore};

pub const TEST_SESSION: &str = "5E55I0N";
pub const TEST_USER_ID: i64 = 7;

type Responder<R> = Box<dyn Fn(&R) -> Result<<R as MediatorRequest>::Response, HandlerError> + Send + Sync>;

//Records every request it receives and answers with the given closure
pub struct RecordingHandler<R: MediatorRequest> {
    calls: Arc<Mutex<Vec<R>>>,
    respond: Responder<R>
}

#[async_trait]
impl<R> RequestHandler<R> for RecordingHandler<R>
where
    R: MediatorRequest + Clone
{
    async fn handle(&self, request: R) -> Result<R::Response, HandlerError> {
        self.calls.lock().unwrap().push(request.clone());
        return (self.respond)(&request);
    }
}

//Registers a recording handler for R and returns the list of requests it will see
pub fn record<R, F>(mediator: &mut Mediator, respond: F) -> Arc<Mutex<Vec<R>>>
where
    R: MediatorRequest + Clone,
    F: Fn(&R) -> Result<R::Response, HandlerError> + Send + Sync + 'static
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    mediator.register::<R, _>(RecordingHandler { calls: calls.clone(), respond: Box::new(respond) });
    return calls;
}

pub fn calls<R: Clone>(calls: &Arc<Mutex<Vec<R>>>) -> Vec<R> {
    return calls.lock().unwrap().clone();
}

pub fn testApp(mediator: Mediator) -> Router {
    let sessions = MemorySessionStore::new();
    sessions.insert(TEST_SESSION, SessionClaims { UserId: TEST_USER_ID, Username: "clerk".to_string() });

    return buildRouter(AppState::new(mediator, Arc::new(sessions)));
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: String
}

//Sends one request through the router with an optional raw Authorization header
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>, authorization: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap()
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    let body = serde_json::from_str(&raw).unwrap_or(Value::Null);

    return TestResponse { status, body, raw };
}

fn testBearer(authorized: bool) -> Option<String> {
    return authorized.then(|| format!("Bearer {}", TEST_SESSION));
}

//`authorized` attaches the test session as a bearer token
pub async fn get(app: Router, uri: &str, authorized: bool) -> TestResponse {
    return send(app, Method::GET, uri, None, testBearer(authorized).as_deref()).await;
}

pub async fn post(app: Router, uri: &str, body: Value, authorized: bool) -> TestResponse {
    return send(app, Method::POST, uri, Some(body), testBearer(authorized).as_deref()).await;
}
