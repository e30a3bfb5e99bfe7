use std::sync::{Arc, Mutex};

use axum::{http::StatusCode, routing::{get, post, put}, Json, Router};
use client::auth::{check_manager, gate, GateDecision};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{AppErrorKind, UpdateProfileRequest};
use uuid::Uuid;

use crate::common;

fn token_body(access: &str, refresh: Option<&str>) -> serde_json::Value {
    json!({ "accessToken": access, "refreshToken": refresh, "grantType": "Bearer" })
}

#[tokio::test]
async fn login_stores_token_and_sends_it_as_bearer_and_cookie() {
    let token = common::mint(json!({ "sub": "u-1", "relationType": "MANAGES", "exp": common::in_one_hour() }));
    let login_token = token.clone();
    let router = Router::new()
        .route("/auth/login", post(move || async move { Json(token_body(&login_token, Some("r-1"))) }))
        .route(
            "/api/me",
            get(|| async { Json(json!({ "id": "6a1f7c0e-93b1-4d5e-9a44-0d3b5a3c2f10", "name": "Kim" })) }),
        );
    let (base, seen) = common::serve(router).await;
    let (api, session) = common::client(&base);

    api.login("kim@example.com", "pw").await.unwrap();
    assert_eq!(session.access_token().as_deref(), Some(token.as_str()));
    assert_eq!(session.refresh_token().as_deref(), Some("r-1"));
    assert!(check_manager(&session));

    let me = api.me().await.unwrap();
    assert_eq!(me.display_name(), "Kim");

    let request = seen.last("/api/me");
    assert_eq!(request.authorization, Some(format!("Bearer {token}")));
    let cookie = request.cookie.unwrap_or_default();
    assert!(cookie.contains(&format!("accessToken={token}")), "{cookie}");
    assert!(cookie.contains("refreshToken=r-1"), "{cookie}");
}

#[tokio::test]
async fn requests_without_a_session_carry_no_credentials() {
    let router = Router::new().route("/api/course/all", get(|| async { Json(json!([])) }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    assert!(api.all_courses().await.unwrap().is_empty());
    let request = seen.last("/api/course/all");
    assert_eq!(request.authorization, None);
    assert_eq!(request.cookie, None);
}

#[tokio::test]
async fn refresh_without_refresh_token_never_hits_the_backend() {
    let router = Router::new().route("/api/token/refresh", post(|| async { StatusCode::OK }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let err = api.refresh_session().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(seen.count("/api/token/refresh"), 0);
}

#[tokio::test]
async fn refresh_replaces_the_token_everyone_reads() {
    let old = common::mint(json!({ "sub": "u-1", "relationType": "CONTAINS", "exp": common::in_one_hour() }));
    let new = common::mint(json!({ "sub": "u-1", "relationType": "MANAGES", "exp": common::in_one_hour() }));
    let (login_token, refreshed) = (old.clone(), new.clone());
    let router = Router::new()
        .route("/auth/login", post(move || async move { Json(token_body(&login_token, Some("r-1"))) }))
        .route("/api/token/refresh", post(move || async move { Json(token_body(&refreshed, Some("r-2"))) }));
    let (base, _seen) = common::serve(router).await;
    let (api, session) = common::client(&base);

    api.login("kim@example.com", "pw").await.unwrap();
    assert!(!check_manager(&session));

    api.refresh_session().await.unwrap();
    assert_eq!(session.access_token().as_deref(), Some(new.as_str()));
    assert_eq!(session.refresh_token().as_deref(), Some("r-2"));
    assert!(check_manager(&session));
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_backend_fails() {
    let token = common::mint(json!({ "sub": "u-1", "exp": common::in_one_hour() }));
    let login_token = token.clone();
    let router = Router::new()
        .route("/auth/login", post(move || async move { Json(token_body(&login_token, Some("r-1"))) }))
        .route(
            "/api/user/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let (base, seen) = common::serve(router).await;
    let (api, session) = common::client(&base);

    api.login("kim@example.com", "pw").await.unwrap();
    api.logout().await;

    assert_eq!(seen.count("/api/user/logout"), 1);
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert_eq!(
        gate::evaluate(&session, Utc::now(), "/lecture"),
        GateDecision::Login
    );
}

#[tokio::test]
async fn oauth_url_points_at_the_backend() {
    let (api, _session) = common::client("http://localhost:8080/");
    assert_eq!(
        api.oauth_authorize_url("google"),
        "http://localhost:8080/oauth2/authorize/google"
    );
}

#[tokio::test]
async fn profile_update_sends_only_the_changed_fields() {
    let body: Arc<Mutex<Option<Value>>> = Arc::default();
    let captured = body.clone();
    let router = Router::new().route(
        "/api/me",
        put(move |Json(payload): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(payload);
                Json(json!({ "id": Uuid::new_v4(), "name": "새이름", "email": "s@x.io" }))
            }
        }),
    );
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let request = UpdateProfileRequest {
        name: Some("새이름".to_string()),
        ..Default::default()
    };
    let user = api.update_me(&request).await.unwrap();

    assert_eq!(user.display_name(), "새이름");
    assert_eq!(seen.last("/api/me").method, "PUT");
    assert_eq!(body.lock().unwrap().clone(), Some(json!({ "name": "새이름" })));
}
