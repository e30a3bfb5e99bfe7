use crate::auth::{use_api, use_is_manager};
use crate::components::{ErrorBanner, Loading};
use crate::routes::Route;
use crate::SelectedCourse;
use dioxus::prelude::*;
use shared_types::{AppError, SubmissionResponse, UpdateProfileRequest};

/// Newest first, at most `limit`. Timestamps are ISO-8601 so they sort as text.
pub fn recent_submissions(mut all: Vec<SubmissionResponse>, limit: usize) -> Vec<SubmissionResponse> {
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all.truncate(limit);
    all
}

#[component]
pub fn Dashboard() -> Element {
    let api = use_api();
    let is_manager = use_is_manager();
    let selected = use_context::<SelectedCourse>();

    let mut editing_name = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut profile = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.me().await }
        }
    });
    let problems = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.assigned_questions().await }
        }
    });
    let authored = use_resource({
        let api = api.clone();
        use_reactive!(|is_manager| {
            let api = api.clone();
            async move {
                if !is_manager {
                    return Ok(None);
                }
                api.my_questions().await.map(|list| Some(list.len()))
            }
        })
    });
    let submissions = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.my_submissions().await }
        }
    });

    let save_name = move |_| {
        let api = api.clone();
        async move {
            let Some(name) = editing_name().filter(|n| !n.trim().is_empty()) else {
                return;
            };
            let request = UpdateProfileRequest {
                name: Some(name.trim().to_string()),
                ..Default::default()
            };
            match api.update_me(&request).await {
                Ok(_) => {
                    editing_name.set(None);
                    profile.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, "profile update failed");
                    error.set(Some(e));
                }
            }
        }
    };

    let course_name = selected.course.read().as_ref().map(|c| c.name.clone());

    rsx! {
        div { class: "container",
            div { class: "page-header",
                match (&*profile.read(), editing_name()) {
                    (_, Some(draft)) => rsx! {
                        div { class: "input-with-action",
                            input { value: "{draft}", oninput: move |e: FormEvent| editing_name.set(Some(e.value())) }
                            button { class: "button", onclick: save_name, "저장" }
                            button { class: "button ghost", onclick: move |_| editing_name.set(None), "취소" }
                        }
                    },
                    (Some(Ok(user)), None) => {
                        let current = user.display_name().to_string();
                        rsx! {
                            h1 { class: "page-title", "{current}님, 환영합니다" }
                            button { class: "button ghost",
                                onclick: move |_| editing_name.set(Some(current.clone())),
                                "이름 변경"
                            }
                        }
                    }
                    _ => rsx! { h1 { class: "page-title", "Dashboard" } },
                }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }

            div { class: "stat-grid",
                div { class: "card stat-card",
                    span { class: "stat-label", "현재 강좌" }
                    match course_name {
                        Some(name) => rsx! { span { class: "stat-value", "{name}" } },
                        None => rsx! {
                            Link { to: Route::CourseSelect {}, class: "stat-value", "강좌를 선택하세요" }
                        },
                    }
                }
                div { class: "card stat-card",
                    span { class: "stat-label", "역할" }
                    span { class: "stat-value", if is_manager { "강좌 관리자" } else { "수강생" } }
                }
                match &*problems.read() {
                    Some(Ok(list)) => {
                        let solved = list.iter().filter(|q| q.passed()).count();
                        let total = list.len();
                        rsx! {
                            div { class: "card stat-card",
                                span { class: "stat-label", "해결한 문제" }
                                span { class: "stat-value", "{solved} / {total}" }
                            }
                        }
                    }
                    Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                    None => rsx! { Loading {} },
                }
                if let Some(Ok(Some(count))) = &*authored.read() {
                    div { class: "card stat-card",
                        span { class: "stat-label", "등록한 문제" }
                        Link { to: Route::QuestionList {}, class: "stat-value", "{count}개" }
                    }
                }
            }

            div { class: "card",
                h3 { class: "card-title", "최근 제출" }
                match &*submissions.read() {
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "empty-state", "아직 제출한 코드가 없습니다." }
                    },
                    Some(Ok(list)) => rsx! {
                        div { class: "list",
                            for sub in recent_submissions(list.clone(), 5) {
                                div { key: "{sub.id}", class: "list-row",
                                    div { class: "list-row-main",
                                        if let Some(question_id) = sub.question_id {
                                            Link {
                                                to: Route::Coding { id: question_id.to_string() },
                                                class: "list-row-title",
                                                "문제 보기"
                                            }
                                        }
                                        span { class: "list-row-sub", "{sub.created_at.clone().unwrap_or_default()}" }
                                    }
                                    if let Some(lang) = sub.language {
                                        span { class: "badge", "{lang}" }
                                    }
                                    span { class: if sub.score == Some(100) { "badge success" } else { "badge warning" },
                                        "{sub.score.unwrap_or(0)}점"
                                    }
                                }
                            }
                        }
                    },
                    Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                    None => rsx! { Loading {} },
                }
            }

            div { class: "quick-links",
                Link { to: Route::LectureCalendar {}, class: "button", "강의 일정" }
                Link { to: Route::QuestionProblems {}, class: "button", "코딩 문제" }
                Link { to: Route::DevTool {}, class: "button", "코딩 연습" }
            }
        }
    }
}
