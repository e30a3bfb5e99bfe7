use std::time::Duration;

use chrono::Utc;
use client::auth::{callback, check_manager, gate, GateDecision, RoleWatcher, SessionStore};
use client::{nav, search};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::TokenResponse;

use crate::common;

fn login(session: &SessionStore, access: &str) {
    session.store_login_token(&TokenResponse {
        access_token: access.to_string(),
        refresh_token: None,
        grant_type: Some("Bearer".to_string()),
    });
}

#[test]
fn callback_stores_tokens_and_lands_on_lectures() {
    let session = SessionStore::in_memory();
    let token = common::mint(json!({ "sub": "u-1", "courseId": "c-1", "exp": common::in_one_hour() }));

    let next = callback::handle_callback(&session, &format!("?token={token}&refreshToken=r-9"));

    assert_eq!(next, nav::LANDING_PATH);
    assert_eq!(session.access_token().as_deref(), Some(token.as_str()));
    assert_eq!(session.refresh_token().as_deref(), Some("r-9"));
    assert_eq!(gate::evaluate(&session, Utc::now(), next), GateDecision::Proceed);
}

#[test]
fn callback_without_token_still_lands_but_gate_sends_to_login() {
    let session = SessionStore::in_memory();
    let next = callback::handle_callback(&session, "?refreshToken=r-9");
    assert_eq!(next, nav::LANDING_PATH);
    assert_eq!(session.access_token(), None);
    assert_eq!(gate::evaluate(&session, Utc::now(), next), GateDecision::Login);
}

#[test]
fn expired_token_is_sent_to_login_on_every_protected_path() {
    let session = SessionStore::in_memory();
    login(&session, &common::mint(json!({ "sub": "u-1", "courseId": "c-1", "exp": common::an_hour_ago() })));

    for path in ["/lecture", "/dashboard", "/course", "/question-list"] {
        assert_eq!(gate::evaluate(&session, Utc::now(), path), GateDecision::Login, "{path}");
    }
    for path in nav::PUBLIC_PATHS {
        assert_eq!(gate::evaluate(&session, Utc::now(), path), GateDecision::Proceed, "{path}");
    }
}

#[test]
fn token_without_exp_never_expires() {
    let session = SessionStore::in_memory();
    login(&session, &common::mint(json!({ "sub": "u-1", "courseId": "c-1" })));
    assert_eq!(gate::evaluate(&session, Utc::now(), "/lecture"), GateDecision::Proceed);
}

#[test]
fn unreadable_token_is_neither_signed_in_nor_manager() {
    let session = SessionStore::in_memory();
    login(&session, "definitely-not-a-jwt");
    assert!(!check_manager(&session));
    assert_eq!(gate::evaluate(&session, Utc::now(), "/lecture"), GateDecision::Login);
}

#[test]
fn sidebar_follows_the_role_in_the_token() {
    let session = SessionStore::in_memory();
    login(&session, &common::mint(json!({ "relationType": "CONTAINS" })));
    let student: Vec<_> = nav::visible_entries(check_manager(&session))
        .iter()
        .map(|e| e.key)
        .collect();

    login(&session, &common::mint(json!({ "relationType": { "value": "MANAGES_TYPE" } })));
    let manager: Vec<_> = nav::visible_entries(check_manager(&session))
        .iter()
        .map(|e| e.key)
        .collect();

    assert!(manager.len() > student.len());
    assert!(student.iter().all(|key| manager.contains(key)));
}

#[tokio::test]
async fn role_watcher_reports_token_swaps() {
    let session = SessionStore::in_memory();
    login(&session, &common::mint(json!({ "relationType": "CONTAINS" })));

    let (mut rx, _handle) = RoleWatcher::new(session.clone(), Duration::from_millis(10)).spawn();
    assert!(!*rx.borrow());

    login(&session, &common::mint(json!({ "relationType": "MANAGES" })));
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("role change observed")
        .unwrap();
    assert!(*rx.borrow());

    session.clear();
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("sign-out observed")
        .unwrap();
    assert!(!*rx.borrow());
}

#[tokio::test]
async fn debounced_search_only_emits_the_settled_keyword() {
    let (tx, mut rx) = search::debounce::<String>(Duration::from_millis(30));
    for keyword in ["r", "ru", "rus", "rust"] {
        assert!(tx.push(keyword.to_string()));
    }
    let settled = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("debounced value");
    assert_eq!(settled.as_deref(), Some("rust"));

    drop(tx);
    let closed = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("channel closes");
    assert_eq!(closed, None);
}
