use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    http::header::{AUTHORIZATION, COOKIE},
    middleware::{self, Next},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use client::api::ApiClient;
use client::auth::SessionStore;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;

/// What the stub backend saw for one request.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub cookie: Option<String>,
}

/// Requests received by a stub backend, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
    pub fn all(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }

    /// Last request to `path`.
    pub fn last(&self, path: &str) -> Seen {
        self.all()
            .into_iter()
            .rev()
            .find(|s| s.path == path)
            .unwrap_or_else(|| panic!("no request to {path}"))
    }

    pub fn count(&self, path: &str) -> usize {
        self.all().iter().filter(|s| s.path == path).count()
    }
}

async fn record(State(recorder): State<Recorder>, req: Request, next: Next) -> Response {
    let seen = {
        let header = |name| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Seen {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            authorization: header(AUTHORIZATION),
            cookie: header(COOKIE),
        }
    };
    recorder.0.lock().unwrap().push(seen);
    next.run(req).await
}

/// Serve `router` on an ephemeral local port. Returns the base URL and the
/// request recorder.
pub async fn serve(router: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend");
    });
    (format!("http://{addr}"), recorder)
}

/// Client over a fresh in-memory session.
pub fn client(base_url: &str) -> (ApiClient, SessionStore) {
    let session = SessionStore::in_memory();
    let api = ApiClient::with_http(reqwest::Client::new(), base_url, session.clone());
    (api, session)
}

/// Sign a token with a key the client never sees.
pub fn mint(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("mint token")
}

pub fn in_one_hour() -> i64 {
    (Utc::now() + Duration::hours(1)).timestamp()
}

pub fn an_hour_ago() -> i64 {
    (Utc::now() - Duration::hours(1)).timestamp()
}
