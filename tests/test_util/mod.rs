//! A stand-in for the task API which runs in-process on an ephemeral port. Users, sessions and
//! tasks live in memory; ids are sequential and tasks are only visible to their owner.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use validator::Validate;

const SESSION_COOKIE: &str = "token";

#[derive(Clone)]
pub struct StoredUser {
    pub id: u32,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize)]
pub struct StoredTask {
    pub id: u32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub user_id: u32,
}

#[derive(Default)]
pub struct ApiState {
    pub users: Vec<StoredUser>,
    pub tasks: Vec<StoredTask>,
    pub sessions: HashMap<String, u32>,
    pub list_calls: usize,
    next_user_id: u32,
    next_task_id: u32,
}

type SharedState = Arc<Mutex<ApiState>>;

#[derive(Deserialize, Validate)]
struct CredentialBody {
    #[validate(email)]
    email: String,
    #[validate(length(min = 6))]
    password: String,
}

#[derive(Deserialize, Validate)]
struct TaskBody {
    #[validate(length(min = 1))]
    title: String,
}

/// Handle to a running fake API
pub struct FakeApi {
    pub base_url: String,
    pub state: SharedState,
}

impl FakeApi {
    pub fn lock(&self) -> std::sync::MutexGuard<'_, ApiState> {
        self.state.lock().expect("fake api state mutex poisoned")
    }
}

/// Starts the fake API in the background and returns where to reach it
pub async fn spawn_api() -> FakeApi {
    let state: SharedState = Arc::new(Mutex::new(ApiState::default()));
    let router = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/tasks/:task_id", put(update_task).delete(delete_task))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind the fake API listener");
    let address = listener
        .local_addr()
        .expect("could not read the fake API address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("fake API server crashed");
    });

    FakeApi {
        base_url: format!("http://{address}"),
        state,
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// The API reports repository failures as a bare JSON string
fn raw_failure(text: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(text))).into_response()
}

fn session_user(state: &ApiState, headers: &HeaderMap) -> Option<u32> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, token)| state.sessions.get(token).copied())
}

async fn signup(State(state): State<SharedState>, Json(body): Json<CredentialBody>) -> Response {
    if body.validate().is_err() {
        return message(StatusCode::BAD_REQUEST, "email or password is invalid");
    }

    let mut state = state.lock().expect("fake api state mutex poisoned");
    if state.users.iter().any(|user| user.email == body.email) {
        return raw_failure("user already exists");
    }
    state.next_user_id += 1;
    let user = StoredUser {
        id: state.next_user_id,
        email: body.email,
        password: body.password,
    };
    state.users.push(user.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "id": user.id, "email": user.email })),
    )
        .into_response()
}

async fn login(State(state): State<SharedState>, Json(body): Json<CredentialBody>) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = state
        .users
        .iter()
        .find(|user| user.email == body.email && user.password == body.password)
        .map(|user| user.id)
    else {
        return raw_failure("invalid email or password");
    };

    let token = format!("session-{user_id}-{}", state.sessions.len() + 1);
    state.sessions.insert(token.clone(), user_id);

    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly"),
        )],
    )
        .into_response()
}

async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = session_user(&state, &headers) else {
        return message(StatusCode::UNAUTHORIZED, "missing or malformed jwt");
    };
    state.sessions.retain(|_, owner| *owner != user_id);

    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly"),
        )],
    )
        .into_response()
}

async fn list_tasks(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = session_user(&state, &headers) else {
        return message(StatusCode::UNAUTHORIZED, "missing or malformed jwt");
    };
    state.list_calls += 1;

    let tasks: Vec<StoredTask> = state
        .tasks
        .iter()
        .filter(|task| task.user_id == user_id)
        .cloned()
        .collect();
    Json(tasks).into_response()
}

async fn create_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<TaskBody>,
) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = session_user(&state, &headers) else {
        return message(StatusCode::UNAUTHORIZED, "missing or malformed jwt");
    };
    if body.validate().is_err() {
        return message(StatusCode::BAD_REQUEST, "title: cannot be blank");
    }

    state.next_task_id += 1;
    let now = Utc::now();
    let task = StoredTask {
        id: state.next_task_id,
        title: body.title,
        created_at: now,
        updated_at: now,
        user_id,
    };
    state.tasks.push(task.clone());

    (StatusCode::CREATED, Json(task)).into_response()
}

async fn update_task(
    State(state): State<SharedState>,
    Path(task_id): Path<u32>,
    headers: HeaderMap,
    Json(body): Json<TaskBody>,
) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = session_user(&state, &headers) else {
        return message(StatusCode::UNAUTHORIZED, "missing or malformed jwt");
    };
    if body.validate().is_err() {
        return message(StatusCode::BAD_REQUEST, "title: cannot be blank");
    }

    let Some(task) = state
        .tasks
        .iter_mut()
        .find(|task| task.id == task_id && task.user_id == user_id)
    else {
        return raw_failure("task not found");
    };
    task.title = body.title;
    task.updated_at = Utc::now();

    Json(task.clone()).into_response()
}

async fn delete_task(
    State(state): State<SharedState>,
    Path(task_id): Path<u32>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().expect("fake api state mutex poisoned");
    let Some(user_id) = session_user(&state, &headers) else {
        return message(StatusCode::UNAUTHORIZED, "missing or malformed jwt");
    };

    let Some(idx) = state
        .tasks
        .iter()
        .position(|task| task.id == task_id && task.user_id == user_id)
    else {
        return raw_failure("task not found");
    };
    state.tasks.remove(idx);

    StatusCode::NO_CONTENT.into_response()
}
