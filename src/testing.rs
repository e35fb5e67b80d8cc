//! Shared fixtures: an in-memory store and a local stand-in for the TMDB API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::ConnectOptions;
use serde_json::{Value, json};

use crate::{AppState, config::Config, store::Store, tmdb::TmdbClient};

pub const TEST_API_KEY: &str = "test-key";

pub async fn memory_store() -> Store {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = crate::db::connect_and_migrate(options).await.expect("in-memory database");
    Store::new(db)
}

pub fn forrest_gump_person() -> Value {
    json!({
        "page": 1,
        "total_results": 1,
        "results": [{
            "name": "Tom Hanks",
            "popularity": 31.6,
            "known_for": [{
                "media_type": "movie",
                "title": "Forrest Gump",
                "release_date": "1994-06-23",
                "overview": "A man with a low IQ has accomplished great things in his life."
            }]
        }]
    })
}

#[derive(Clone, Default)]
struct FakeState {
    people: Arc<HashMap<String, Value>>,
    shows: Arc<HashMap<String, Value>>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
pub struct FakeTmdbBuilder {
    people: HashMap<String, Value>,
    shows: HashMap<String, Value>,
}

impl FakeTmdbBuilder {
    pub fn person(mut self, query: &str, body: Value) -> Self {
        self.people.insert(query.to_string(), body);
        self
    }

    pub fn tv(mut self, query: &str, body: Value) -> Self {
        self.shows.insert(query.to_string(), body);
        self
    }

    pub async fn spawn(self) -> FakeTmdb {
        let state = FakeState {
            people: Arc::new(self.people),
            shows: Arc::new(self.shows),
            calls: Arc::default(),
        };

        let app = Router::new()
            .route("/search/person", get(search_person))
            .route("/search/tv", get(search_tv))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind fake tmdb");
        let addr = listener.local_addr().expect("fake tmdb addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake tmdb server");
        });

        FakeTmdb { base_url: format!("http://{addr}"), state }
    }
}

pub struct FakeTmdb {
    base_url: String,
    state: FakeState,
}

impl FakeTmdb {
    pub fn builder() -> FakeTmdbBuilder {
        FakeTmdbBuilder::default()
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Requests served so far, as `person:<query>` / `tv:<query>`.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().expect("calls lock").clone()
    }
}

async fn search_person(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(&state, "person", &state.people, &params)
}

async fn search_tv(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(&state, "tv", &state.shows, &params)
}

fn respond(
    state: &FakeState,
    kind: &str,
    canned: &HashMap<String, Value>,
    params: &HashMap<String, String>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "status_code": 7 }))).into_response();
    }

    let query = params.get("query").cloned().unwrap_or_default();
    state.calls.lock().expect("calls lock").push(format!("{kind}:{query}"));

    let body = canned
        .get(&query)
        .cloned()
        .unwrap_or_else(|| json!({ "page": 1, "total_results": 0, "results": [] }));
    Json(body).into_response()
}

pub fn test_config(tmdb_base_url: String) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().expect("addr"),
        tmdb_api_key: TEST_API_KEY.to_string(),
        tmdb_base_url,
        database_url: "sqlite::memory:".to_string(),
        tmdb_rps: 1000,
        max_concurrent: 4,
        cookie_secure: false,
    }
}

pub async fn test_state(fake: &FakeTmdb) -> Arc<AppState> {
    let config = Arc::new(test_config(fake.base_url()));
    let tmdb = TmdbClient::new(
        reqwest::Client::new(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    Arc::new(AppState { config, store: memory_store().await, tmdb: Arc::new(tmdb) })
}
