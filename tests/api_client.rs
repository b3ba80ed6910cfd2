//! ApiClient against a local stub backend

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use zodiac_oracle::client::{ChatRequest, LoginRequest, RegisterRequest};
use zodiac_oracle::config::ApiConfig;
use zodiac_oracle::view::Region;
use zodiac_oracle::{ApiClient, ApiError, App, FortuneBackend, MemoryStorage, ZodiacSign, ZodiacTable};

const TOKEN: &str = "stub-token";

/// One request as the stub saw it
#[derive(Debug, Clone)]
struct Seen {
    path: &'static str,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Stub {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Stub {
    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push(Seen {
            path,
            authorization,
            body,
        });
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn user_json(username: &str) -> Value {
    json!({
        "id": 1,
        "username": username,
        "email": format!("{}@stars.io", username),
        "is_verified": false,
        "created_at": "2026-10-14T09:00:00"
    })
}

fn token_json(username: &str) -> Value {
    json!({ "access_token": TOKEN, "token_type": "bearer", "user": user_json(username) })
}

fn detail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer stub-token")
}

async fn login(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record("/auth/login", &headers, body.clone());
    if body["username"] == "luna" && body["password"] == "secret" {
        Json(token_json("luna")).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Incorrect username or password")
    }
}

async fn register(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record("/auth/register", &headers, body.clone());
    if body["username"] == "taken" {
        return detail(StatusCode::BAD_REQUEST, "Username already registered");
    }
    let username = body["username"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(token_json(&username))).into_response()
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record("/auth/me", &headers, Value::Null);
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    Json(user_json("luna")).into_response()
}

async fn chat(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record("/chat", &headers, body.clone());
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    if body["message"] == "break" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response();
    }
    Json(json!({
        "response": format!("The stars hear you.\n\nYou asked: {}", body["message"].as_str().unwrap_or_default()),
        "sessionId": "srv-session"
    }))
    .into_response()
}

async fn clear_history(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record("/clear-history", &headers, body);
    Json(json!({ "message": "Chat history cleared" })).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Fortune Teller API is running",
        "hasApiKey": true,
        "database_connected": false
    }))
}

async fn spawn_stub() -> (ApiConfig, Stub) {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/chat", post(chat))
        .route("/api/clear-history", post(clear_history))
        .route("/api/health", get(health))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ApiConfig {
        base_url: format!("http://{}/api/", addr),
        request_timeout_secs: Some(5),
    };
    (config, stub)
}

fn login_request(password: &str) -> LoginRequest {
    LoginRequest {
        username: "luna".to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login() {
    let (config, stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    let auth = client.login(&login_request("secret")).await.unwrap();
    assert_eq!(auth.access_token, TOKEN);
    assert_eq!(auth.user.username, "luna");
    assert_eq!(auth.user.id, Some(1));

    let err = client.login(&login_request("wrong")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.detail(), Some("Incorrect username or password"));

    let seen = stub.seen();
    assert_eq!(seen[0].path, "/auth/login");
    assert_eq!(seen[0].authorization, None);
    assert_eq!(seen[0].body, json!({ "username": "luna", "password": "secret" }));
}

#[tokio::test]
async fn test_register() {
    let (config, _stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    let request = RegisterRequest {
        username: "orion".to_string(),
        email: "orion@stars.io".to_string(),
        password: "hunter22".to_string(),
    };
    let auth = client.register(&request).await.unwrap();
    assert_eq!(auth.user.username, "orion");
    assert_eq!(auth.user.email.as_deref(), Some("orion@stars.io"));

    let taken = RegisterRequest {
        username: "taken".to_string(),
        ..request
    };
    let err = client.register(&taken).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), Some("Username already registered"));
}

#[tokio::test]
async fn test_chat_sends_bearer_and_camel_case_body() {
    let (config, stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    let request = ChatRequest {
        message: "Will I travel?".to_string(),
        session_id: Some("session_1_abcdefghi".to_string()),
        zodiac_sign: None,
    };
    let reply = client.chat(Some(TOKEN), &request).await.unwrap();
    assert_eq!(reply.session_id, "srv-session");
    assert!(reply.response.ends_with("You asked: Will I travel?"));

    let seen = stub.seen();
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer stub-token"));
    assert_eq!(
        seen[0].body,
        json!({
            "message": "Will I travel?",
            "sessionId": "session_1_abcdefghi",
            "zodiacSign": null
        })
    );

    let err = client.chat(None, &request).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_non_json_error_body_has_no_detail() {
    let (config, _stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    let request = ChatRequest {
        message: "break".to_string(),
        session_id: None,
        zodiac_sign: None,
    };
    let err = client.chat(Some(TOKEN), &request).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_clear_history_and_profile() {
    let (config, stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    client.clear_history(Some(TOKEN), "srv-session").await.unwrap();
    let user = client.current_user(TOKEN).await.unwrap();
    assert_eq!(user.username, "luna");
    assert_eq!(client.current_user("bogus").await.unwrap_err().status(), Some(401));

    let seen = stub.seen();
    assert_eq!(seen[0].path, "/clear-history");
    assert_eq!(seen[0].body, json!({ "sessionId": "srv-session" }));
    assert_eq!(seen[1].authorization.as_deref(), Some("Bearer stub-token"));
}

#[tokio::test]
async fn test_health() {
    let (config, _stub) = spawn_stub().await;
    let client = ApiClient::new(&config).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.has_api_key, Some(true));
    assert_eq!(health.database_connected, Some(false));
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig {
        base_url: format!("http://{}/api", addr),
        request_timeout_secs: Some(5),
    };
    let client = ApiClient::new(&config).unwrap();

    let err = client.login(&login_request("secret")).await.unwrap_err();
    assert!(matches!(err, ApiError::Unavailable), "got {:?}", err);
    assert!(err.is_network());
}

#[tokio::test]
async fn test_app_session_over_http() {
    let (config, stub) = spawn_stub().await;
    let backend = Arc::new(ApiClient::new(&config).unwrap());
    let mut app = App::new(backend, MemoryStorage::new(), ZodiacTable::builtin().unwrap());

    assert!(!app.start());
    assert!(!app.submit_login("luna", "wrong").await);
    assert_eq!(app.view().login_error.as_deref(), Some("Incorrect username or password"));

    assert!(app.submit_login("luna", "secret").await);
    assert!(app.view().is_visible(Region::MainApp));

    app.select_sign(ZodiacSign::Virgo);
    assert!(app.send_message("Hello?").await);
    assert_eq!(app.chat_session_id(), Some("srv-session"));
    let reply = app.view().chat.messages.last().unwrap();
    assert_eq!(reply.paragraphs, vec!["The stars hear you.", "You asked: Hello?"]);

    app.clear_chat().await;
    assert_eq!(app.chat_session_id(), None);
    assert_eq!(app.view().chat.messages.len(), 1);

    let seen = stub.seen();
    let chat = seen.iter().find(|s| s.path == "/chat").unwrap();
    assert_eq!(chat.body["zodiacSign"], "Virgo");
    assert!(chat.body["sessionId"].as_str().unwrap().starts_with("session_"));
    let clear = seen.iter().find(|s| s.path == "/clear-history").unwrap();
    assert_eq!(clear.body["sessionId"], "srv-session");
}
