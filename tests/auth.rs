use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use todo_api::auth::{AccessToken, AuthState, TokenKind, TokenPair};
use todo_api::store::{MemoryStore, SqliteStore};
use todo_api::AppState;

const SECRET: &str = "integration-test-secret";

fn auth_state() -> AuthState {
    // bcrypt's minimum cost keeps the flow fast
    AuthState::new(SECRET, 900, 86_400, 4)
}

async fn sqlite_state() -> AppState {
    let store = Arc::new(
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database"),
    );
    AppState::new(store.clone(), store, auth_state())
}

fn memory_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(store.clone(), store, auth_state())
}

async fn read_msg(resp: actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) -> String {
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["msg"].as_str().unwrap_or_default().to_string()
}

async fn check_signup_and_login_flow(state: AppState) {
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    // First signup succeeds with two distinct, non-empty tokens
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "username": "alice", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let tokens: TokenPair = test::read_body_json(resp).await;
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());
    assert!(tokens.access_token != tokens.refresh_token);

    let issued = state
        .auth
        .tokens
        .verify(&tokens.access_token, TokenKind::Access)
        .expect("signup access token should verify");
    assert_eq!(issued.sub, "alice");

    // Same username again is rejected
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "username": "alice", "password": "p2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_msg(resp).await, "Username already exists");

    // The original password still works
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: TokenPair = test::read_body_json(resp).await;
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    // The rejected signup did not overwrite it
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "p2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_msg(resp).await, "Bad username or password");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "nobody", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_signup_and_login_flow_sqlite() {
    check_signup_and_login_flow(sqlite_state().await).await;
}

#[actix_rt::test]
async fn test_signup_and_login_flow_memory() {
    check_signup_and_login_flow(memory_state()).await;
}

#[actix_rt::test]
async fn test_missing_fields_and_json() {
    let state = sqlite_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let cases = [
        (json!({ "password": "p1" }), "Missing username parameter"),
        (json!({ "username": "alice" }), "Missing password parameter"),
        (json!({ "username": "", "password": "p1" }), "Missing username parameter"),
        (json!({}), "Missing username parameter"),
    ];

    for uri in ["/signup", "/login"] {
        for (payload, expected) in cases.iter() {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{} {}", uri, payload);
            assert_eq!(read_msg(resp).await, *expected);
        }

        // Not JSON at all
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("username=alice&password=p1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_msg(resp).await, "Missing JSON in request");

        // Malformed JSON body
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"username\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_rt::test]
async fn test_signup_rejects_overlong_username() {
    let state = memory_state();
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "username": "a".repeat(81), "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_refresh_flow() {
    let state = sqlite_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "username": "bob", "password": "hunter2" }))
        .to_request();
    let tokens: TokenPair = test::call_and_read_body_json(&app, req).await;

    // A refresh token buys a new access token
    let req = test::TestRequest::post()
        .uri("/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: AccessToken = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri("/todos")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", refreshed.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // An access token cannot be used to refresh
    let req = test::TestRequest::post()
        .uri("/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post().uri("/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_public_endpoints_need_no_token() {
    let state = memory_state();
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    for uri in ["/health", "/apispec.json"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }
}
