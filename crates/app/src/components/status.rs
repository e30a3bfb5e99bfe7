use dioxus::prelude::*;
use shared_types::AppError;

#[component]
pub fn ErrorBanner(error: AppError) -> Element {
    rsx! {
        div { class: "auth-error", "{error.friendly_message()}" }
    }
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        div { class: "skeleton", "Loading..." }
    }
}
