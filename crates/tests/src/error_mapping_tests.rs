use axum::{http::StatusCode, routing::get, Json, Router};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::AppErrorKind;
use uuid::Uuid;

use crate::common;

async fn course_error(status: StatusCode, body: &'static str) -> shared_types::AppError {
    let router = Router::new().route("/api/course/current", get(move || async move { (status, body) }));
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);
    api.current_course().await.unwrap_err()
}

#[tokio::test]
async fn plain_text_error_body_becomes_the_message() {
    let err = course_error(StatusCode::BAD_REQUEST, "선택된 강좌가 없습니다.").await;
    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(err.friendly_message(), "선택된 강좌가 없습니다.");
}

#[tokio::test]
async fn spring_error_document_uses_its_message() {
    let err = course_error(
        StatusCode::NOT_FOUND,
        r#"{"timestamp":"2024-03-01T10:00:00","status":404,"error":"Not Found","message":"Course not found","path":"/api/course/current"}"#,
    )
    .await;
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Course not found");
}

#[tokio::test]
async fn unauthorized_is_an_auth_failure() {
    let err = course_error(StatusCode::UNAUTHORIZED, "").await;
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert!(err.is_auth_failure());
    assert!(!err.friendly_message().is_empty());
}

#[tokio::test]
async fn conflict_and_server_errors_keep_their_kind() {
    assert_eq!(
        course_error(StatusCode::CONFLICT, "이미 신청한 강좌입니다.").await.kind,
        AppErrorKind::Conflict
    );
    assert_eq!(
        course_error(StatusCode::BAD_GATEWAY, "").await.kind,
        AppErrorKind::InternalError
    );
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let router = Router::new().route("/api/course/current", get(|| async { "not json" }));
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let err = api.current_course().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Decode);
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let router = Router::new().route(
        "/api/question/{id}",
        get(|| async { Json(json!({ "title": "no id" })) }),
    );
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let err = api.question(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (api, _session) = common::client(&format!("http://{addr}"));

    let err = api.all_courses().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Network);
}
