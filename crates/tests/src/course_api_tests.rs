use axum::{
    http::{header::SET_COOKIE, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use client::auth::{gate, GateDecision};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::CourseSelection;
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn selecting_a_course_posts_the_id_then_refreshes_the_token() {
    let course_id = Uuid::new_v4();
    let unselected = common::mint(json!({ "sub": "u-1", "courseId": null, "exp": common::in_one_hour() }));
    let selected = common::mint(json!({
        "sub": "u-1",
        "courseId": course_id.to_string(),
        "relationType": "MANAGES",
        "exp": common::in_one_hour(),
    }));
    let (login_token, refreshed) = (unselected.clone(), selected.clone());
    let expected = course_id.to_string();
    let router = Router::new()
        .route(
            "/auth/login",
            post(move || async move {
                Json(json!({ "accessToken": login_token, "refreshToken": "r-1" }))
            }),
        )
        .route(
            "/api/course/select",
            post(move |Json(body): Json<Value>| async move {
                if body["id"] == expected {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        )
        .route(
            "/api/token/refresh",
            post(move |Json(body): Json<Value>| async move {
                assert_eq!(body["refreshToken"], "r-1");
                Json(json!({ "accessToken": refreshed, "refreshToken": "r-2" }))
            }),
        );
    let (base, seen) = common::serve(router).await;
    let (api, session) = common::client(&base);

    api.login("kim@example.com", "pw").await.unwrap();
    assert_eq!(
        gate::evaluate(&session, Utc::now(), "/lecture"),
        GateDecision::SelectCourse
    );
    assert_eq!(
        gate::evaluate(&session, Utc::now(), "/course"),
        GateDecision::Proceed
    );

    api.select_course(course_id).await.unwrap();

    assert_eq!(seen.count("/api/course/select"), 1);
    assert_eq!(seen.count("/api/token/refresh"), 1);
    let claims = session.claims().unwrap();
    assert_eq!(
        claims.course_selection(),
        CourseSelection::Selected(course_id.to_string())
    );
    assert!(claims.is_manager());
    assert_eq!(
        gate::evaluate(&session, Utc::now(), "/lecture"),
        GateDecision::Proceed
    );
}

#[tokio::test]
async fn failed_selection_keeps_the_old_token() {
    let token = common::mint(json!({ "sub": "u-1", "courseId": null, "exp": common::in_one_hour() }));
    let login_token = token.clone();
    let router = Router::new()
        .route(
            "/auth/login",
            post(move || async move { Json(json!({ "accessToken": login_token, "refreshToken": "r-1" })) }),
        )
        .route(
            "/api/course/select",
            post(|| async { (StatusCode::FORBIDDEN, "수강 승인 대기 중입니다.") }),
        );
    let (base, seen) = common::serve(router).await;
    let (api, session) = common::client(&base);

    api.login("kim@example.com", "pw").await.unwrap();
    let err = api.select_course(Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err.message, "수강 승인 대기 중입니다.");
    assert_eq!(seen.count("/api/token/refresh"), 0);
    assert_eq!(session.access_token().as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn cookies_set_by_the_backend_are_sent_back() {
    let router = Router::new()
        .route(
            "/api/course/all",
            get(|| async { ([(SET_COOKIE, "JSESSIONID=abc123; Path=/; HttpOnly")], Json(json!([]))) }),
        )
        .route("/api/course/self", get(|| async { Json(json!([])) }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    api.all_courses().await.unwrap();
    api.my_courses().await.unwrap();

    let cookie = seen.last("/api/course/self").cookie.unwrap_or_default();
    assert!(cookie.contains("JSESSIONID=abc123"), "{cookie}");
}

#[tokio::test]
async fn text_endpoints_return_the_backend_message() {
    let relation = Uuid::new_v4();
    let course = Uuid::new_v4();
    let router = Router::new()
        .route("/api/course/invite/{id}", post(|| async { "수강 신청이 완료되었습니다." }))
        .route("/api/course/students/{id}/approve", post(|| async { "승인되었습니다." }))
        .route("/api/course/students/{id}", delete(|| async { "삭제되었습니다." }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    assert_eq!(api.join_course(course).await.unwrap(), "수강 신청이 완료되었습니다.");
    assert_eq!(api.approve_student(relation).await.unwrap(), "승인되었습니다.");
    assert_eq!(api.remove_student(relation).await.unwrap(), "삭제되었습니다.");

    let removal = seen.last(&format!("/api/course/students/{relation}"));
    assert_eq!(removal.method, "DELETE");
}

#[tokio::test]
async fn course_lists_decode() {
    let id = Uuid::new_v4();
    let router = Router::new().route(
        "/api/course/self",
        get(move || async move {
            Json(json!([{ "id": id, "name": "Rust 입문", "description": "기초", "isActive": true }]))
        }),
    );
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let courses = api.my_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, id);
    assert_eq!(courses[0].name, "Rust 입문");
    assert!(courses[0].active);
}
