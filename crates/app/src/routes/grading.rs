use crate::auth::use_api;
use crate::components::{ErrorBanner, Loading};
use crate::routes::{AdminOnly, Route};
use dioxus::prelude::*;
use shared_types::{AppError, LectureGrading as Grading};
use uuid::Uuid;

/// Cell text and class for one score; unsubmitted shows a dash.
fn score_cell(score: Option<i32>) -> (String, &'static str) {
    match score {
        Some(100) => ("100".to_string(), "score full"),
        Some(s) => (s.to_string(), "score partial"),
        None => ("-".to_string(), "score none"),
    }
}

#[component]
pub fn LectureGrading(id: String) -> Element {
    rsx! {
        AdminOnly { GradingBoard { id } }
    }
}

#[component]
fn GradingBoard(id: String) -> Element {
    let api = use_api();

    let lectures = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.lectures(true).await }
        }
    });

    let grading = use_resource(use_reactive!(|id| {
        let api = api.clone();
        async move {
            let id = Uuid::parse_str(&id)
                .map_err(|_| AppError::bad_request("강의 ID가 올바르지 않습니다."))?;
            api.lecture_grading(id).await
        }
    }));

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::LectureAdmin {}, class: "button ghost", "← 강의 관리" }
                h1 { class: "page-title", "채점 현황" }
                div { class: "page-actions",
                    if let Some(Ok(list)) = &*lectures.read() {
                        select {
                            class: "form-select",
                            onchange: move |evt: FormEvent| {
                                navigator().push(Route::LectureGrading { id: evt.value() });
                            },
                            for lecture in list.clone() {
                                option {
                                    value: "{lecture.id}",
                                    selected: lecture.id.to_string() == id,
                                    "{lecture.name}"
                                }
                            }
                        }
                    }
                }
            }
            match &*grading.read() {
                Some(Ok(report)) => rsx! { GradingMatrix { report: report.clone() } },
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}

#[component]
fn GradingMatrix(report: Grading) -> Element {
    if report.student_gradings.is_empty() {
        return rsx! { p { class: "empty-state", "제출한 학생이 없습니다." } };
    }
    let students = report.student_gradings.len();
    let max_total = report.questions.len() as i32 * 100;

    rsx! {
        div { class: "card",
            h3 { class: "card-title", "{report.lecture.name}" }
            table { class: "data-table grading-table",
                thead {
                    tr {
                        th { "학생" }
                        for question in report.questions.iter() {
                            th { key: "{question.id}", title: "{question.title}", "{question.title}" }
                        }
                        th { "합계" }
                    }
                }
                tbody {
                    for row in report.student_gradings.iter() {
                        tr { key: "{row.student.id}",
                            td {
                                Link {
                                    to: Route::StudentProblems { user_id: row.student.id.to_string() },
                                    "{row.student.display_name()}"
                                }
                            }
                            for question in report.questions.iter() {
                                {
                                    let (text, class) = score_cell(row.score_for(&question.id));
                                    rsx! { td { key: "{question.id}", class, "{text}" } }
                                }
                            }
                            td { strong { "{row.total(&report.questions)} / {max_total}" } }
                        }
                    }
                }
                tfoot {
                    tr {
                        td { "해결" }
                        for question in report.questions.iter() {
                            td { key: "{question.id}", "{report.solved_count(&question.id)} / {students}" }
                        }
                        td {}
                    }
                }
            }
        }
    }
}
