use crate::auth::use_api;
use crate::components::{starter_code, CodeEditor, ErrorBanner, LanguageSelect};
use dioxus::prelude::*;
use shared_types::{AppError, DebugRequest, DebugResponse, LanguageType};

/// Scratch pad: run any snippet without grading.
#[component]
pub fn DevTool() -> Element {
    let api = use_api();
    let language = use_signal(|| LanguageType::Python);
    let mut code = use_signal(|| starter_code(LanguageType::Python).to_string());
    let mut setup = use_signal(String::new);
    let mut output = use_signal(|| Option::<DebugResponse>::None);
    let mut error = use_signal(|| Option::<AppError>::None);
    let mut running = use_signal(|| false);

    // Switching language swaps in that language's starter.
    use_effect(move || {
        let lang = language();
        code.set(starter_code(lang).to_string());
    });

    let handle_run = move |_| {
        let api = api.clone();
        async move {
            running.set(true);
            error.set(None);
            output.set(None);
            let request = DebugRequest {
                code: code(),
                language: language(),
                initial_code: setup(),
            };
            match api.run_code(&request).await {
                Ok(resp) => output.set(Some(resp)),
                Err(e) => {
                    tracing::error!(error = %e, "debug run failed");
                    error.set(Some(e));
                }
            }
            running.set(false);
        }
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "코딩" }
                div { class: "page-actions",
                    LanguageSelect { language }
                    button { class: "button", disabled: running(), onclick: handle_run,
                        if running() { "실행 중..." } else { "실행" }
                    }
                }
            }
            div { class: "card",
                CodeEditor { code, rows: 20 }
            }
            if language() == LanguageType::Sql {
                div { class: "card",
                    h4 { "초기화 코드 (스키마, 데이터)" }
                    textarea {
                        class: "code-editor",
                        rows: "6",
                        value: "{setup}",
                        oninput: move |e: FormEvent| setup.set(e.value()),
                    }
                }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            if let Some(resp) = output() {
                div { class: "card",
                    div { class: "editor-toolbar",
                        h4 { "실행 결과" }
                        if let Some(ms) = resp.execution_time {
                            span { class: "list-row-meta", "{ms} ms" }
                        }
                        if let Some(code) = resp.exit_code {
                            span { class: if code == 0 { "badge success" } else { "badge error" }, "exit {code}" }
                        }
                    }
                    pre { class: "console", "{resp.console_text()}" }
                }
            }
        }
    }
}
