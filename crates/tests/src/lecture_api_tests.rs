use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{DebugRequest, LanguageType, MaterialKind, QuestionSearch};
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn empty_detail_body_means_no_such_lecture() {
    let router = Router::new().route("/api/lecture/detail/{id}", get(|| async { "" }));
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    assert_eq!(api.lecture_detail(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn lecture_detail_decodes_materials_and_questions() {
    let lecture = Uuid::new_v4();
    let question = Uuid::new_v4();
    let router = Router::new().route(
        "/api/lecture/detail/{id}",
        get(move || async move {
            Json(json!({
                "lecture": { "id": lecture, "name": "3주차", "active": true, "doAt": "2024-03-05T09:00:00" },
                "pdfUrl": { "id": Uuid::new_v4(), "name": "slides", "active": true, "url": "https://cdn.example.com/w3.pdf", "type": "pdf" },
                "questions": [{ "id": question, "title": "A+B", "language": "PYTHON" }]
            }))
        }),
    );
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let detail = api.lecture_detail(lecture).await.unwrap().unwrap();
    assert_eq!(detail.lecture.name, "3주차");
    assert_eq!(
        detail.pdf_url.map(|u| u.url),
        Some("https://cdn.example.com/w3.pdf".to_string())
    );
    assert_eq!(detail.video_url, None);
    assert_eq!(detail.questions[0].id, question);
    assert_eq!(detail.questions[0].language, Some(LanguageType::Python));
}

#[tokio::test]
async fn lecture_list_filters_by_activation() {
    let router = Router::new().route("/api/lecture/all", get(|| async { Json(json!([])) }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    api.lectures(false).await.unwrap();
    assert_eq!(seen.last("/api/lecture/all").query.as_deref(), Some("activate=false"));
}

#[tokio::test]
async fn activation_toggle_hits_the_matching_action() {
    let id = Uuid::new_v4();
    let body = move |active: bool| {
        json!({ "success": true, "message": "변경되었습니다.", "lecture": { "id": id, "name": "L", "active": active } })
    };
    let router = Router::new()
        .route("/api/lecture/activate/{id}", post(move || async move { Json(body(true)) }))
        .route("/api/lecture/deactivate/{id}", post(move || async move { Json(body(false)) }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let resp = api.set_lecture_active(id, false).await.unwrap();
    assert!(!resp.lecture.active);
    assert_eq!(resp.message, "변경되었습니다.");
    assert_eq!(seen.count(&format!("/api/lecture/deactivate/{id}")), 1);
    assert_eq!(seen.count(&format!("/api/lecture/activate/{id}")), 0);
}

#[tokio::test]
async fn attaching_material_sends_kind_and_url_id() {
    let lecture = Uuid::new_v4();
    let url = Uuid::new_v4();
    let router = Router::new().route("/api/lecture/add/{id}", post(|| async { "등록되었습니다." }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let msg = api.attach_material(lecture, MaterialKind::Video, url).await.unwrap();
    assert_eq!(msg, "등록되었습니다.");
    let query = seen
        .last(&format!("/api/lecture/add/{lecture}"))
        .query
        .unwrap_or_default();
    assert!(query.contains("type=video"), "{query}");
    assert!(query.contains(&format!("urlID={url}")), "{query}");
}

#[tokio::test]
async fn question_search_omits_blank_filters() {
    let router = Router::new().route("/api/questions", get(|| async { Json(json!([])) }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    api.search_questions(&QuestionSearch::default()).await.unwrap();
    assert_eq!(seen.last("/api/questions").query, None);

    api.search_questions(&QuestionSearch {
        language: Some(LanguageType::Rust),
        keyword: Some("  tree ".to_string()),
    })
    .await
    .unwrap();
    assert_eq!(
        seen.last("/api/questions").query.as_deref(),
        Some("language=RUST&keyword=tree")
    );
}

#[tokio::test]
async fn debug_run_sends_camel_case_body() {
    let router = Router::new().route(
        "/api/submissions/debug",
        post(|Json(body): Json<serde_json::Value>| async move {
            Json(json!({
                "output": format!("{}|{}", body["language"], body["initialCode"]),
                "exitCode": 0,
                "executionTime": 12
            }))
        }),
    );
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let resp = api
        .run_code(&DebugRequest {
            code: "SELECT 1;".to_string(),
            language: LanguageType::Sql,
            initial_code: "CREATE TABLE t (id INT);".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(resp.exit_code, Some(0));
    assert_eq!(resp.console_text(), "\"SQL\"|\"CREATE TABLE t (id INT);\"");
}

#[tokio::test]
async fn deleting_material_accepts_an_empty_body() {
    let id = Uuid::new_v4();
    let router = Router::new().route("/api/urls/{id}", delete(|| async { "" }));
    let (base, seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    api.delete_material(id).await.unwrap();
    assert_eq!(seen.last(&format!("/api/urls/{id}")).method, "DELETE");
}

#[tokio::test]
async fn own_submissions_decode_with_missing_fields() {
    let question = Uuid::new_v4();
    let router = Router::new().route(
        "/api/submissions/me",
        get(move || async move {
            Json(json!([
                { "id": Uuid::new_v4(), "questionId": question, "score": 100, "language": "JAVA", "createdAt": "2024-03-02T10:00:00" },
                { "id": Uuid::new_v4() }
            ]))
        }),
    );
    let (base, _seen) = common::serve(router).await;
    let (api, _session) = common::client(&base);

    let subs = api.my_submissions().await.unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].question_id, Some(question));
    assert_eq!(subs[0].language, Some(LanguageType::Java));
    assert_eq!(subs[1].score, None);
    assert_eq!(subs[1].code, "");
}
