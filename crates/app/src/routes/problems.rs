use crate::auth::use_api;
use crate::components::{
    progress_percent, starter_code, CodeEditor, DifficultyBadge, ErrorBanner, LanguageSelect,
    Loading, PassBadge,
};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{
    AppError, DebugRequest, LanguageType, Question, SubmissionRequest, SubmissionResponse,
};
use uuid::Uuid;

/// Problems assigned to the current user, with pass state and progress.
#[component]
pub fn QuestionProblems() -> Element {
    let api = use_api();
    let questions = use_resource(move || {
        let api = api.clone();
        async move { api.assigned_questions().await }
    });

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "코딩 문제" }
            }
            match &*questions.read() {
                Some(Ok(list)) => {
                    let total = list.len();
                    let passed = list.iter().filter(|q| q.passed()).count();
                    let percent = progress_percent(passed, total);
                    rsx! {
                        div { class: "card stat-row",
                            span { "총 문제 개수: " strong { "{total}개" } }
                            span { "통과한 문제: " strong { class: "text-success", "{passed}개" } }
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

#[component]
pub fn QuestionRows(questions: Vec<Question>) -> Element {
    if questions.is_empty() {
        return rsx! { p { class: "empty-state", "배정된 문제가 없습니다." } };
    }
    rsx! {
        div { class: "list",
            for question in questions {
                Link {
                    key: "{question.id}",
                    to: Route::Coding { id: question.id.to_string() },
                    class: "list-row",
                    div { class: "list-row-main",
                        span { class: "list-row-title", "{question.title}" }
                        if let Some(lecture) = &question.lecture_name {
                            span { class: "list-row-sub", "{lecture}" }
                        }
                    }
                    if let Some(lang) = question.language {
                        span { class: "badge", "{lang}" }
                    }
                    DifficultyBadge { level: question.lv }
                    PassBadge { passed: question.passed() }
                }
            }
        }
    }
}

/// Starting code for a problem: its own scaffold, else the language starter.
fn initial_code(question: &Question, language: LanguageType) -> String {
    question
        .initial_code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| starter_code(language).to_string())
}

fn solved(history: &[SubmissionResponse]) -> bool {
    history.iter().any(|s| s.score == Some(100))
}

/// Solve one problem: edit, run against the problem input, submit for grading.
#[component]
pub fn Coding(id: String) -> Element {
    let api = use_api();
    let mut code = use_signal(String::new);
    let mut language = use_signal(|| LanguageType::Python);
    let mut console = use_signal(|| Option::<String>::None);
    let mut result = use_signal(|| Option::<SubmissionResponse>::None);
    let mut error = use_signal(|| Option::<AppError>::None);
    let mut busy = use_signal(|| false);

    let question_id = Uuid::parse_str(&id).ok();

    let question = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let id = question_id.ok_or_else(|| AppError::bad_request("문제 ID가 올바르지 않습니다."))?;
                let question = api.question(id).await?;
                let lang = question.language.unwrap_or(LanguageType::Python);
                language.set(lang);
                code.set(initial_code(&question, lang));
                Ok::<Question, AppError>(question)
            }
        }
    });

    let mut history = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                match question_id {
                    Some(id) => api.my_question_submissions(id).await,
                    None => Ok(Vec::new()),
                }
            }
        }
    });

    let handle_run = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            async move {
                let Some(id) = question_id else { return };
                busy.set(true);
                error.set(None);
                let request = DebugRequest {
                    code: code(),
                    language: language(),
                    initial_code: String::new(),
                };
                match api.run_question_code(id, &request).await {
                    Ok(resp) => console.set(Some(resp.console_text())),
                    Err(e) => {
                        tracing::error!(error = %e, "run failed");
                        error.set(Some(e));
                    }
                }
                busy.set(false);
            }
        }
    };

    let handle_submit = move |_| {
        let api = api.clone();
        async move {
            let Some(id) = question_id else { return };
            let input_data = question
                .read()
                .as_ref()
                .and_then(|r| r.as_ref().ok())
                .and_then(|q| q.input_data.clone())
                .unwrap_or_default();
            busy.set(true);
            error.set(None);
            let request = SubmissionRequest {
                code: code(),
                input_data,
                language: language(),
            };
            match api.submit(id, &request).await {
                Ok(resp) => {
                    tracing::info!(score = ?resp.score, "submission graded");
                    result.set(Some(resp));
                    history.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, "submit failed");
                    error.set(Some(e));
                }
            }
            busy.set(false);
        }
    };

    let is_solved = match &*history.read() {
        Some(Ok(list)) => solved(list),
        _ => false,
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::QuestionProblems {}, class: "button ghost", "← 문제 목록" }
                if is_solved {
                    span { class: "badge success", "해결 완료" }
                }
            }
            match &*question.read() {
                Some(Ok(q)) => rsx! {
                    div { class: "coding-layout",
                        div { class: "card coding-problem",
                            h1 { class: "page-title", "{q.title}" }
                            DifficultyBadge { level: q.lv }
                            if let Some(content) = &q.content {
                                pre { class: "problem-text", "{content}" }
                            }
                            if let Some(input) = q.input_data.as_ref().filter(|i| !i.is_empty()) {
                                h4 { "입력 예시" }
                                pre { class: "problem-io", "{input}" }
                            }
                        }
                        div { class: "card coding-editor",
                            div { class: "editor-toolbar",
                                LanguageSelect { language, disabled: q.language.is_some() }
                                button { class: "button ghost", disabled: busy(), onclick: handle_run, "실행" }
                                button { class: "button", disabled: busy(), onclick: handle_submit, "제출" }
                            }
                            CodeEditor { code }
                            if let Some(err) = error() {
                                ErrorBanner { error: err }
                            }
                            if let Some(text) = console() {
                                pre { class: "console", "{text}" }
                            }
                            if let Some(graded) = result() {
                                SubmissionResult { submission: graded }
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

#[component]
fn SubmissionResult(submission: SubmissionResponse) -> Element {
    let score = submission.score.unwrap_or(0);
    rsx! {
        div { class: if score == 100 { "submission-result pass" } else { "submission-result" },
            strong { "점수: {score}" }
            if let Some(status) = &submission.status {
                span { class: "badge", "{status}" }
            }
            if let Some(ms) = submission.execution_time {
                span { class: "list-row-meta", "{ms} ms" }
            }
            if let Some(out) = &submission.output {
                pre { class: "console", "{out}" }
            }
            if let Some(expected) = submission.expected_output.as_ref().filter(|_| score < 100) {
                h4 { "기대 출력" }
                pre { class: "console", "{expected}" }
            }
            if let Some(err) = &submission.error {
                pre { class: "console error", "{err}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(initial: Option<&str>) -> Question {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "A+B",
            "initialCode": initial,
        }))
        .expect("question json")
    }

    fn submission(score: Option<i32>) -> SubmissionResponse {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "code": "print(1)",
            "score": score,
        }))
        .expect("submission json")
    }

    #[test]
    fn problem_scaffold_wins_over_starter() {
        let q = question(Some("def solve():\n    pass\n"));
        assert_eq!(initial_code(&q, LanguageType::Python), "def solve():\n    pass\n");
    }

    #[test]
    fn blank_scaffold_falls_back_to_starter() {
        let q = question(Some("   "));
        assert_eq!(
            initial_code(&q, LanguageType::Python),
            starter_code(LanguageType::Python)
        );
        assert_eq!(
            initial_code(&question(None), LanguageType::Rust),
            starter_code(LanguageType::Rust)
        );
    }

    #[test]
    fn solved_needs_a_perfect_score() {
        assert!(!solved(&[]));
        assert!(!solved(&[submission(Some(80)), submission(None)]));
        assert!(solved(&[submission(Some(80)), submission(Some(100))]));
    }
}
