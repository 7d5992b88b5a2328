#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use kitchen_client::auth::session::SessionStore;
use kitchen_client::config::ClientConfig;
use kitchen_client::AppState;

pub const USER_NO: i64 = 7;
/// Password the mock login rejects with `WRONG_PASSWORD`.
pub const WRONG_PASSWORD: &str = "wrong-pass1!";
/// Email the mock login does not know, answered with 404.
pub const UNKNOWN_EMAIL: &str = "new@kitchen.kr";
/// Search keyword the mock answers only after a delay.
pub const SLOW_KEYWORD: &str = "느림";

/// One multipart field as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content: String,
}

/// In-process stand-in for the backend. Tokens are accepted only while they
/// match `valid_token`; every refresh mints a new one.
#[derive(Default)]
pub struct Backend {
    pub valid_token: Mutex<Option<String>>,
    pub refresh_ok: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub protected_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub meal_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub new_meal_calls: AtomicUsize,
    pub challenge_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub last_signup: Mutex<Option<Value>>,
    pub last_new_meal: Mutex<Option<Value>>,
    pub last_challenge: Mutex<Vec<ReceivedPart>>,
    pub seen_tokens: Mutex<Vec<Option<String>>>,
    pub last_list_query: Mutex<Option<HashMap<String, String>>>,
    pub ingredients: Mutex<Vec<Value>>,
    pub meals: Mutex<Value>,
    pub stats: Mutex<Value>,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        let backend = Backend::default();
        backend.refresh_ok.store(true, Ordering::SeqCst);
        *backend.meals.lock().unwrap() = json!({});
        *backend.stats.lock().unwrap() = json!({});
        Arc::new(backend)
    }

    pub fn set_valid_token(&self, token: &str) {
        *self.valid_token.lock().unwrap() = Some(token.to_string());
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let sent = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        self.seen_tokens.lock().unwrap().push(sent.clone());
        let valid = self.valid_token.lock().unwrap().clone();
        sent.is_some() && sent == valid
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "errorCode": "EXPIRED_TOKEN", "message": "token expired" })),
    )
        .into_response()
}

fn user() -> Value {
    json!({ "userNo": USER_NO, "email": "cook@kitchen.kr", "username": "cook", "roles": ["ROLE_USER"] })
}

async fn login(State(b): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    if body["email"] == UNKNOWN_EMAIL {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "errorCode": "WRONG_EMAIL", "message": "no such account" })),
        )
            .into_response();
    }
    if body["password"] == WRONG_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "errorCode": "WRONG_PASSWORD", "message": "bad credentials" })),
        )
            .into_response();
    }
    b.set_valid_token("login-token");
    Json(json!({ "accessToken": "login-token", "user": user() })).into_response()
}

async fn signup(State(b): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    *b.last_signup.lock().unwrap() = Some(body);
    b.set_valid_token("signup-token");
    Json(json!({ "accessToken": "signup-token", "user": user() })).into_response()
}

async fn refresh(State(b): State<Arc<Backend>>) -> Response {
    let n = b.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
    // long enough for concurrent 401s to pile up behind the refresh lock
    tokio::time::sleep(Duration::from_millis(50)).await;
    if !b.refresh_ok.load(Ordering::SeqCst) {
        return unauthorized();
    }
    let token = format!("fresh-{n}");
    b.set_valid_token(&token);
    Json(json!({ "accessToken": token, "user": user() })).into_response()
}

async fn logout() -> StatusCode {
    StatusCode::OK
}

async fn protected(State(b): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    b.protected_calls.fetch_add(1, Ordering::SeqCst);
    if !b.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "ok": true })).into_response()
}

async fn list_ingredients(
    State(b): State<Arc<Backend>>,
    Path(_user_no): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    b.list_calls.fetch_add(1, Ordering::SeqCst);
    let slow = params.get("keyword").map(String::as_str) == Some(SLOW_KEYWORD);
    *b.last_list_query.lock().unwrap() = Some(params);
    if slow {
        tokio::time::sleep(Duration::from_millis(150)).await;
        return Json(json!([])).into_response();
    }
    Json(Value::Array(b.ingredients.lock().unwrap().clone())).into_response()
}

async fn delete_ingredient(
    State(b): State<Arc<Backend>>,
    Path((ing_no, _user_no)): Path<(i64, i64)>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    b.ingredients
        .lock()
        .unwrap()
        .retain(|i| i["ingNo"].as_i64() != Some(ing_no));
    StatusCode::OK.into_response()
}

async fn day_meals(
    State(b): State<Arc<Backend>>,
    Path(_user_no): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    b.meal_calls.fetch_add(1, Ordering::SeqCst);
    Json(b.meals.lock().unwrap().clone()).into_response()
}

async fn remove_meal(
    State(b): State<Arc<Backend>>,
    Path(meal_no): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    let mut meals = b.meals.lock().unwrap();
    if let Some(slots) = meals.as_object_mut() {
        for entries in slots.values_mut() {
            if let Some(list) = entries.as_array_mut() {
                list.retain(|e| e["mealNo"].as_i64() != Some(meal_no));
            }
        }
    }
    StatusCode::OK.into_response()
}

async fn meal_stats(
    State(b): State<Arc<Backend>>,
    Path(_user_no): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    b.stats_calls.fetch_add(1, Ordering::SeqCst);
    Json(b.stats.lock().unwrap().clone()).into_response()
}

async fn new_meal(
    State(b): State<Arc<Backend>>,
    Path(_user_no): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    b.new_meal_calls.fetch_add(1, Ordering::SeqCst);
    if !b.authorized(&headers) {
        return unauthorized();
    }
    *b.last_new_meal.lock().unwrap() = Some(body);
    StatusCode::OK.into_response()
}

async fn save_challenge(
    State(b): State<Arc<Backend>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    b.challenge_calls.fetch_add(1, Ordering::SeqCst);
    if !b.authorized(&headers) {
        return unauthorized();
    }
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        parts.push(ReceivedPart {
            name,
            file_name,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    *b.last_challenge.lock().unwrap() = parts;
    StatusCode::OK.into_response()
}

async fn slow_if_asked(b: &Backend, keyword: Option<&String>) {
    b.search_calls.fetch_add(1, Ordering::SeqCst);
    if keyword.map(String::as_str) == Some(SLOW_KEYWORD) {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
}

async fn search_foods(
    State(b): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    let query = params.get("query");
    slow_if_asked(&b, query).await;
    let name = query.cloned().unwrap_or_default();
    Json(json!([{ "foodNo": 1, "foodName": name, "energy": 52.0, "carb": null }])).into_response()
}

async fn search_catalog(
    State(b): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !b.authorized(&headers) {
        return unauthorized();
    }
    let keyword = params.get("keyword");
    slow_if_asked(&b, keyword).await;
    let name = keyword.cloned().unwrap_or_default();
    Json(json!({
        "list": [{ "ingNo": 1, "ingName": name, "ingCode": 1, "ingCodeName": "과일" }],
        "pageInfo": {
            "listCount": 1, "currentPage": 1, "pageLimit": 5, "itemLimit": 10,
            "maxPage": 1, "startPage": 1, "endPage": 1
        }
    }))
    .into_response()
}

pub async fn spawn(backend: Arc<Backend>) -> SocketAddr {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/tokens/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/protected", get(protected))
        .route("/api/inglist/:user_no", get(list_ingredients))
        .route("/api/inglist/detail/:ing_no/:user_no", delete(delete_ingredient))
        .route("/mealplan/meals/:user_no", get(day_meals).delete(remove_meal))
        .route("/mealplan/stats/:user_no", get(meal_stats))
        .route("/mealplan/newMeal/:user_no", post(new_meal))
        .route("/mealplan/foods", get(search_foods))
        .route("/ingdata", get(search_catalog))
        .route("/admin/challenges", post(save_challenge))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn state_for(addr: SocketAddr, single_flight: bool) -> AppState {
    let mut config = ClientConfig::for_base_url(format!("http://{addr}").parse().unwrap());
    config.auth.single_flight_refresh = single_flight;
    AppState::from_parts(config, SessionStore::new()).unwrap()
}

pub fn ingredient(ing_no: i64, code: i64, category: &str, name: &str, exp: &str) -> Value {
    json!({
        "userNo": USER_NO,
        "ingNo": ing_no,
        "createdAt": "2025-03-01",
        "expDate": exp,
        "quantity": "1개",
        "ingName": name,
        "ingCode": code,
        "ingCodeName": category
    })
}
