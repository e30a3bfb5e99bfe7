use crate::auth::use_api;
use crate::components::{progress_percent, ErrorBanner, Loading};
use crate::routes::problems::QuestionRows;
use crate::routes::{AdminOnly, Route};
use dioxus::prelude::*;
use shared_types::{AppError, CourseStudent, StatusType};
use uuid::Uuid;

/// Pending requests first, then by name.
pub fn sort_students(mut students: Vec<CourseStudent>) -> Vec<CourseStudent> {
    students.sort_by(|a, b| {
        b.is_waiting()
            .cmp(&a.is_waiting())
            .then_with(|| a.display_name().cmp(&b.display_name()))
    });
    students
}

fn status_label(status: Option<StatusType>) -> (&'static str, &'static str) {
    match status {
        Some(StatusType::Waiting) => ("승인 대기", "badge warning"),
        Some(StatusType::Approved) => ("승인됨", "badge success"),
        Some(StatusType::Rejected) => ("거절됨", "badge error"),
        None => ("-", "badge"),
    }
}

#[component]
pub fn StudentManagement() -> Element {
    rsx! {
        AdminOnly { StudentTable {} }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum StudentAction {
    Approve,
    Remove,
}

#[component]
fn StudentTable() -> Element {
    let api = use_api();
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut students = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.course_students().await }
        }
    });

    let act = move |relation_id: Uuid, action: StudentAction| {
        let api = api.clone();
        spawn(async move {
            error.set(None);
            let outcome = match action {
                StudentAction::Approve => api.approve_student(relation_id).await,
                StudentAction::Remove => api.remove_student(relation_id).await,
            };
            match outcome {
                Ok(msg) => {
                    notice.set(Some(msg));
                    students.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, %relation_id, "student action failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "학생 관리" }
                div { class: "page-actions",
                    Link { to: Route::CourseManage {}, class: "button ghost", "강좌 관리" }
                }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            match &*students.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "수강생이 없습니다." }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "이름" }
                                th { "이메일" }
                                th { "상태" }
                                th { "최근 접속" }
                                th {}
                            }
                        }
                        tbody {
                            for student in sort_students(list.clone()) {
                                {
                                    let (label, badge) = status_label(student.status);
                                    let last_login = student
                                        .last_login_time
                                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                        .unwrap_or_else(|| "-".to_string());
                                    let relation_id = student.relation_id;
                                    let mut act = act.clone();
                                    let mut act_remove = act.clone();
                                    rsx! {
                                        tr { key: "{relation_id}",
                                            td {
                                                Link {
                                                    to: Route::StudentProblems { user_id: student.user_id.to_string() },
                                                    "{student.display_name()}"
                                                }
                                            }
                                            td { "{student.email.clone().unwrap_or_default()}" }
                                            td { span { class: badge, "{label}" } }
                                            td { "{last_login}" }
                                            td { class: "row-actions",
                                                if student.is_waiting() {
                                                    button {
                                                        class: "button",
                                                        onclick: move |_| act(relation_id, StudentAction::Approve),
                                                        "승인"
                                                    }
                                                }
                                                button {
                                                    class: "button danger",
                                                    onclick: move |_| act_remove(relation_id, StudentAction::Remove),
                                                    "제외"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}

/// One student's assigned problems, as the manager sees them.
#[component]
pub fn StudentProblems(user_id: String) -> Element {
    rsx! {
        AdminOnly { StudentProblemList { user_id } }
    }
}

#[component]
fn StudentProblemList(user_id: String) -> Element {
    let api = use_api();
    let questions = use_resource(use_reactive!(|user_id| {
        let api = api.clone();
        async move {
            let id = Uuid::parse_str(&user_id)
                .map_err(|_| AppError::bad_request("학생 ID가 올바르지 않습니다."))?;
            api.student_questions(id).await
        }
    }));

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::StudentManagement {}, class: "button ghost", "← 학생 관리" }
            }
            match &*questions.read() {
                Some(Ok(list)) => {
                    let passed = list.iter().filter(|q| q.passed()).count();
                    let percent = progress_percent(passed, list.len());
                    rsx! {
                        div { class: "card stat-row",
                            span { "총 문제: " strong { "{list.len()}개" } }
                            span { "통과: " strong { class: "text-success", "{passed}개" } }
                            span { "진행률: {percent}%" }
                        }
                        QuestionRows { questions: list.clone() }
                    }
                }
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}
