use std::time::Duration;

use crate::auth::use_api;
use crate::components::{CodeEditor, DifficultyBadge, ErrorBanner, LanguageSelect, Loading};
use crate::routes::{AdminOnly, Route};
use client::search::{self, Debouncer};
use dioxus::prelude::*;
use shared_types::{AppError, LanguageType, Question, QuestionRequest, QuestionSearch};
use uuid::Uuid;

#[component]
pub fn QuestionList() -> Element {
    rsx! {
        AdminOnly { QuestionTable {} }
    }
}

/// Question bank with language filter and debounced keyword search.
#[component]
fn QuestionTable() -> Element {
    let api = use_api();
    let mut keyword = use_signal(String::new);
    let mut applied_keyword = use_signal(String::new);
    let mut language = use_signal(|| Option::<LanguageType>::None);
    let mut debouncer = use_signal(|| Option::<Debouncer<String>>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    // Keystrokes go through the debouncer; only the settled value triggers a fetch.
    use_future(move || async move {
        let delay = Duration::from_millis(client::config::app_config().search.debounce_ms);
        let (tx, mut rx) = search::debounce(delay);
        debouncer.set(Some(tx));
        while let Some(settled) = rx.recv().await {
            applied_keyword.set(settled);
        }
    });

    let mut questions = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let search = QuestionSearch {
                language: language(),
                keyword: Some(applied_keyword()),
            };
            async move { api.search_questions(&search).await }
        }
    });

    let on_keyword = move |evt: FormEvent| {
        let value = evt.value();
        keyword.set(value.clone());
        let pushed = debouncer
            .peek()
            .as_ref()
            .map(|tx| tx.push(value.clone()))
            .unwrap_or(false);
        if !pushed {
            applied_keyword.set(value);
        }
    };

    let remove = {
        let api = api.clone();
        move |question: Question| {
            let api = api.clone();
            spawn(async move {
                match api.delete_question(question.id).await {
                    Ok(msg) => {
                        notice.set(Some(msg));
                        questions.restart();
                    }
                    Err(e) => {
                        tracing::error!(error = %e, question_id = %question.id, "delete question failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let toggle = move |question: Question| {
        let api = api.clone();
        spawn(async move {
            match api.set_question_active(question.id, !question.active()).await {
                Ok(msg) => {
                    notice.set(Some(msg));
                    questions.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, question_id = %question.id, "toggle question failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "코딩 문제 관리" }
                div { class: "page-actions",
                    Link { to: Route::QuestionCreate {}, class: "button", "문제 추가" }
                }
            }
            div { class: "search-bar",
                input {
                    placeholder: "제목 또는 내용 검색",
                    value: "{keyword}",
                    oninput: on_keyword,
                }
                select {
                    class: "form-select",
                    onchange: move |evt: FormEvent| language.set(LanguageType::parse(&evt.value())),
                    option { value: "", "전체 언어" }
                    for lang in LanguageType::ALL {
                        option { value: "{lang.as_str()}", selected: language() == Some(lang), "{lang}" }
                    }
                }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            match &*questions.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "검색 결과가 없습니다." }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "제목" }
                                th { "언어" }
                                th { "난이도" }
                                th { "상태" }
                                th {}
                            }
                        }
                        tbody {
                            for question in list.clone() {
                                {
                                    let mut remove = remove.clone();
                                    let mut toggle = toggle.clone();
                                    let for_remove = question.clone();
                                    let for_toggle = question.clone();
                                    let active = question.active();
                                    rsx! {
                                        tr { key: "{question.id}",
                                            td {
                                                Link { to: Route::QuestionEdit { id: question.id.to_string() }, "{question.title}" }
                                            }
                                            td {
                                                if let Some(lang) = question.language {
                                                    "{lang}"
                                                }
                                            }
                                            td { DifficultyBadge { level: question.lv } }
                                            td {
                                                span { class: if active { "badge success" } else { "badge" },
                                                    if active { "활성" } else { "비활성" }
                                                }
                                            }
                                            td { class: "row-actions",
                                                Link { to: Route::Coding { id: question.id.to_string() }, class: "button ghost", "풀기" }
                                                button { class: "button ghost",
                                                    onclick: move |_| toggle(for_toggle.clone()),
                                                    if active { "비활성화" } else { "활성화" }
                                                }
                                                button { class: "button danger",
                                                    onclick: move |_| remove(for_remove.clone()),
                                                    "삭제"
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

#[component]
pub fn QuestionCreate() -> Element {
    rsx! {
        AdminOnly { QuestionEditor { id: None } }
    }
}

#[component]
pub fn QuestionEdit(id: String) -> Element {
    let parsed = Uuid::parse_str(&id).ok();
    rsx! {
        AdminOnly {
            match parsed {
                Some(id) => rsx! { QuestionEditor { id: Some(id) } },
                None => rsx! { ErrorBanner { error: AppError::bad_request("문제 ID가 올바르지 않습니다.") } },
            }
        }
    }
}

/// Create or edit form. Existing questions are loaded first.
#[component]
fn QuestionEditor(id: Option<Uuid>) -> Element {
    let api = use_api();
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut language = use_signal(|| LanguageType::Java);
    let mut lv = use_signal(|| 1i32);
    let mut answer = use_signal(String::new);
    let mut initial_code = use_signal(String::new);
    let mut input_data = use_signal(String::new);
    let mut is_compare = use_signal(|| false);
    let mut compare_code = use_signal(String::new);
    let mut is_active = use_signal(|| true);
    let mut error = use_signal(|| Option::<AppError>::None);
    let mut saving = use_signal(|| false);

    let loaded = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let Some(id) = id else {
                    return Ok(());
                };
                let question = api.question(id).await?;
                let request = QuestionRequest::from_question(&question);
                title.set(request.title);
                content.set(request.content);
                language.set(request.language);
                lv.set(request.lv);
                answer.set(request.answer);
                initial_code.set(request.initial_code);
                input_data.set(request.input_data);
                is_compare.set(request.is_compare);
                compare_code.set(request.compare_code);
                is_active.set(request.is_active);
                Ok::<(), AppError>(())
            }
        }
    });

    let handle_save = move |_| {
        let api = api.clone();
        async move {
            let request = QuestionRequest {
                title: title(),
                content: content(),
                language: language(),
                lv: lv(),
                answer: answer(),
                initial_code: initial_code(),
                input_data: input_data(),
                is_compare: is_compare(),
                compare_code: compare_code(),
                is_active: is_active(),
            };
            if let Err(e) = request.validate() {
                error.set(Some(e));
                return;
            }
            saving.set(true);
            error.set(None);
            let saved = match id {
                Some(id) => api.update_question(id, &request).await,
                None => api.create_question(&request).await,
            };
            saving.set(false);
            match saved {
                Ok(question) => {
                    tracing::info!(question_id = %question.id, "question saved");
                    navigator().push(Route::QuestionList {});
                }
                Err(e) => {
                    tracing::error!(error = %e, "save question failed");
                    error.set(Some(e));
                }
            }
        }
    };

    let field_error = move |field: &str| {
        error
            .read()
            .as_ref()
            .and_then(|e| e.field_errors.get(field).cloned())
    };

    if let Some(Err(err)) = &*loaded.read() {
        return rsx! { ErrorBanner { error: err.clone() } };
    }

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::QuestionList {}, class: "button ghost", "← 문제 목록" }
                h1 { class: "page-title", if id.is_some() { "문제 수정" } else { "문제 추가" } }
                div { class: "page-actions",
                    button { class: "button", disabled: saving(), onclick: handle_save,
                        if saving() { "저장 중..." } else { "저장" }
                    }
                }
            }
            if let Some(err) = error().filter(|e| e.field_errors.is_empty()) {
                ErrorBanner { error: err }
            }
            div { class: "card form-grid",
                div { class: "auth-field",
                    label { "제목" }
                    input { value: "{title}", oninput: move |e: FormEvent| title.set(e.value()) }
                    if let Some(msg) = field_error("title") {
                        span { class: "field-error", "{msg}" }
                    }
                }
                div { class: "auth-row",
                    div { class: "auth-field",
                        label { "언어" }
                        LanguageSelect { language }
                    }
                    div { class: "auth-field",
                        label { "난이도" }
                        input {
                            r#type: "number",
                            min: "1",
                            max: "10",
                            value: "{lv}",
                            oninput: move |e: FormEvent| {
                                if let Ok(level) = e.value().parse::<i32>() {
                                    lv.set(level);
                                }
                            },
                        }
                        if let Some(msg) = field_error("lv") {
                            span { class: "field-error", "{msg}" }
                        }
                    }
                    label { class: "switch",
                        input {
                            r#type: "checkbox",
                            checked: is_active(),
                            onchange: move |e: FormEvent| is_active.set(e.checked()),
                        }
                        "활성"
                    }
                }
                div { class: "auth-field",
                    label { "문제 내용" }
                    textarea { rows: "8", value: "{content}", oninput: move |e: FormEvent| content.set(e.value()) }
                    if let Some(msg) = field_error("content") {
                        span { class: "field-error", "{msg}" }
                    }
                }
                div { class: "auth-field",
                    label { "입력 데이터" }
                    textarea { rows: "3", value: "{input_data}", oninput: move |e: FormEvent| input_data.set(e.value()) }
                }
                div { class: "auth-field",
                    label { "정답 (기대 출력)" }
                    textarea { rows: "3", value: "{answer}", oninput: move |e: FormEvent| answer.set(e.value()) }
                }
                div { class: "auth-field",
                    label { "초기 코드" }
                    CodeEditor { code: initial_code, rows: 10 }
                }
                label { class: "switch",
                    input {
                        r#type: "checkbox",
                        checked: is_compare(),
                        onchange: move |e: FormEvent| is_compare.set(e.checked()),
                    }
                    "비교 코드로 채점"
                }
                if is_compare() {
                    div { class: "auth-field",
                        label { "비교 코드" }
                        CodeEditor { code: compare_code, rows: 10 }
                        if let Some(msg) = field_error("compareCode") {
                            span { class: "field-error", "{msg}" }
                        }
                    }
                }
            }
        }
    }
}
