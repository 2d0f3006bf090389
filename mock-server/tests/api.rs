use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Session, User};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

const SIGN_UP: &str = r#"{"userId":"u1","email":"a@b.com","password":"password1","name":"Name"}"#;
const LOGIN: &str = r#"{"email":"a@b.com","password":"password1"}"#;

// --- create ---

#[tokio::test]
async fn create_account_returns_201() {
    let resp = app().oneshot(json_request("POST", "/account", SIGN_UP)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.name, "Name");
    assert!(user.status);
}

#[tokio::test]
async fn create_account_generates_unique_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/account",
            r#"{"userId":"unique()","email":"x@y.com","password":"password1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_ne!(user.id, "unique()");
    assert_eq!(user.id.len(), 32);
    assert_eq!(user.name, "");
}

#[tokio::test]
async fn create_account_missing_email_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/account", r#"{"userId":"u1","password":"password1"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["type"], "general_argument_invalid");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn create_account_short_password_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/account",
            r#"{"userId":"u1","email":"a@b.com","password":"short"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- auth ---

#[tokio::test]
async fn get_account_without_session_returns_401() {
    let resp = app().oneshot(empty_request("GET", "/account")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["type"], "general_unauthorized_scope");
}

#[tokio::test]
async fn login_with_unknown_user_returns_401() {
    let resp = app().oneshot(json_request("POST", "/account/sessions/email", LOGIN)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["type"], "user_invalid_credentials");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid credentials"));
}

// --- diagnostics ---

#[tokio::test]
async fn echo_reflects_request() {
    let req = Request::builder()
        .method("PUT")
        .uri("/_debug/echo?a=1&b=two")
        .header("X-Frontier-Project", "p1")
        .body(r#"{"k":"v"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["query"], "a=1&b=two");
    assert_eq!(body["headers"]["x-frontier-project"], "p1");
    assert_eq!(body["body"]["k"], "v");
}

#[tokio::test]
async fn status_and_bare_replies() {
    let resp = app().oneshot(empty_request("GET", "/_debug/status/418")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "status 418");

    let resp = app().oneshot(empty_request("GET", "/_debug/bare/503")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_bytes(resp).await.is_empty());
}

// --- full account lifecycle ---

#[tokio::test]
async fn account_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // sign up
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/account", SIGN_UP))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // duplicate email — 409
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/account",
            r#"{"userId":"u2","email":"a@b.com","password":"password1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // log in
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/account/sessions/email", LOGIN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: Session = body_json(resp).await;
    assert_eq!(session.user_id, "u1");
    assert!(session.current);

    // current account
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/account"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, "u1");

    // prefs
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PATCH", "/account/prefs", r#"{"prefs":{"theme":"dark"}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.prefs["theme"], "dark");

    // jwt, then authenticate with it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", "/account/jwt"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    let jwt = body["jwt"].as_str().unwrap().to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri("/account")
                .header("X-Frontier-JWT", &jwt)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // sessions
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/account/sessions"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["sessions"][0]["$id"], session.id.as_str());

    // unknown session — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/account/sessions/nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // log out
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/account/sessions/current"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // after logout — 401, and the jwt died with its session
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/account"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri("/account")
                .header("X-Frontier-JWT", &jwt)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
