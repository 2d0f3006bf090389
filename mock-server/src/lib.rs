use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, delete, get, patch, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const JWT_HEADER: &str = "x-frontier-jwt";
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub name: String,
    pub email: String,
    pub email_verification: bool,
    pub status: bool,
    pub prefs: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub user_id: String,
    pub expire: String,
    pub provider: String,
    pub ip: String,
    pub current: bool,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, (User, String)>,
    sessions: HashMap<String, Session>,
    jwts: HashMap<String, String>,
    current: Option<String>,
}

pub type Db = Arc<RwLock<Store>>;

/// Backend-style error body: `{message, code, type}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind,
        }
    }

    fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "general_unauthorized_scope",
            "User (role: guests) missing scope (account)",
        )
    }

    fn invalid_argument(field: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "general_argument_invalid",
            format!("Invalid `{field}` param"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "message": self.message,
            "code": self.status.as_u16(),
            "type": self.kind,
        });
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/account", post(create_account).get(get_account))
        .route("/account/sessions/email", post(create_email_session))
        .route("/account/prefs", patch(update_prefs))
        .route("/account/jwt", post(create_jwt))
        .route("/account/sessions", get(list_sessions))
        .route("/account/sessions/{id}", delete(delete_session))
        .route("/_debug/echo", any(echo))
        .route("/_debug/status/{code}", get(status_reply))
        .route("/_debug/bare/{code}", get(bare_reply))
        .route("/_debug/text", get(text_reply))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn required_str<'a>(body: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_argument(field))
}

/// Resolve the caller to `(user id, session id)`: a known JWT header
/// first, then the current session.
fn authenticate(store: &Store, headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let jwt = headers
        .get(JWT_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let session_id = match jwt {
        Some(jwt) => store.jwts.get(jwt).cloned().ok_or_else(|| {
            ApiError::new(StatusCode::UNAUTHORIZED, "user_jwt_invalid", "Failed to verify JWT. Invalid token")
        })?,
        None => store.current.clone().ok_or_else(ApiError::unauthorized)?,
    };

    let session = store.sessions.get(&session_id).ok_or_else(ApiError::unauthorized)?;
    Ok((session.user_id.clone(), session_id))
}

fn user_of(store: &Store, user_id: &str) -> Result<User, ApiError> {
    store
        .users
        .get(user_id)
        .map(|(user, _)| user.clone())
        .ok_or_else(ApiError::unauthorized)
}

async fn create_account(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user_id = required_str(&body, "userId")?;
    let email = required_str(&body, "email")?;
    let password = required_str(&body, "password")?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_argument("password"));
    }
    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();

    let id = if user_id == "unique()" {
        Uuid::new_v4().simple().to_string()
    } else {
        user_id.to_string()
    };

    let mut store = db.write().await;
    if store.users.contains_key(&id) || store.users.values().any(|(u, _)| u.email == email) {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "user_already_exists",
            "A user with the same id, email, or phone already exists in this project.",
        ));
    }

    let stamp = now();
    let user = User {
        id: id.clone(),
        created_at: stamp.clone(),
        updated_at: stamp,
        name: name.to_string(),
        email: email.to_string(),
        email_verification: false,
        status: true,
        prefs: Map::new(),
    };
    store.users.insert(id, (user.clone(), password.to_string()));
    tracing::info!(user = %user.id, "account created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn create_email_session(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let email = required_str(&body, "email")?;
    let password = required_str(&body, "password")?;

    let mut store = db.write().await;
    let user_id = store
        .users
        .values()
        .find(|(u, p)| u.email == email && p == password)
        .map(|(u, _)| u.id.clone())
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "user_invalid_credentials",
                "Invalid credentials. Please check the email and password.",
            )
        })?;

    let stamp = now();
    let session = Session {
        id: Uuid::new_v4().simple().to_string(),
        created_at: stamp.clone(),
        updated_at: stamp,
        user_id,
        expire: (Utc::now() + Duration::days(365)).to_rfc3339(),
        provider: "email".to_string(),
        ip: "127.0.0.1".to_string(),
        current: true,
    };
    store.sessions.insert(session.id.clone(), session.clone());
    store.current = Some(session.id.clone());
    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_account(State(db): State<Db>, headers: HeaderMap) -> Result<Json<User>, ApiError> {
    let store = db.read().await;
    let (user_id, _) = authenticate(&store, &headers)?;
    user_of(&store, &user_id).map(Json)
}

async fn update_prefs(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<User>, ApiError> {
    let prefs = body
        .get("prefs")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ApiError::invalid_argument("prefs"))?;

    let mut store = db.write().await;
    let (user_id, _) = authenticate(&store, &headers)?;
    let (user, _) = store.users.get_mut(&user_id).ok_or_else(ApiError::unauthorized)?;
    user.prefs = prefs;
    user.updated_at = now();
    Ok(Json(user.clone()))
}

async fn create_jwt(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut store = db.write().await;
    let (_, session_id) = authenticate(&store, &headers)?;
    let jwt = Uuid::new_v4().simple().to_string();
    store.jwts.insert(jwt.clone(), session_id);
    Ok((StatusCode::CREATED, Json(json!({ "jwt": jwt }))))
}

async fn list_sessions(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let (user_id, session_id) = authenticate(&store, &headers)?;
    let mut sessions: Vec<Session> = store
        .sessions
        .values()
        .filter(|s| s.user_id == user_id)
        .cloned()
        .map(|mut s| {
            s.current = s.id == session_id;
            s
        })
        .collect();
    sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(Json(json!({ "total": sessions.len(), "sessions": sessions })))
}

async fn delete_session(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let (user_id, session_id) = authenticate(&store, &headers)?;
    let target = if id == "current" { session_id } else { id };

    let owned = store.sessions.get(&target).is_some_and(|s| s.user_id == user_id);
    if !owned {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "user_session_not_found",
            "The current user session could not be found.",
        ));
    }

    store.sessions.remove(&target);
    store.jwts.retain(|_, s| *s != target);
    if store.current.as_deref() == Some(target.as_str()) {
        store.current = None;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Reflect the request back so clients can assert on what went over the wire.
async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Value> {
    // A repeated header echoes as an array of its values.
    let headers: Map<String, Value> = headers
        .keys()
        .map(|k| {
            let mut values: Vec<Value> = headers
                .get_all(k)
                .iter()
                .filter_map(|v| v.to_str().ok().map(Value::from))
                .collect();
            let value = if values.len() == 1 { values.remove(0) } else { Value::Array(values) };
            (k.to_string(), value)
        })
        .collect();
    let body = serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);
    Json(json!({
        "method": method.as_str(),
        "query": query,
        "headers": headers,
        "body": body,
    }))
}

async fn status_reply(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "message": format!("status {code}") }))).into_response()
}

async fn bare_reply(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn text_reply() -> &'static str {
    "plain text, not json"
}
