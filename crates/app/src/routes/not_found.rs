use dioxus::prelude::*;

use crate::routes::Route;

/// Unknown paths bounce to the dashboard; the card shows until the
/// redirect lands.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    use_effect(use_reactive!(|route| {
        tracing::debug!(path = %format!("/{}", route.join("/")), "unknown path, redirecting");
        navigator().replace(Route::Dashboard {});
    }));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "페이지를 찾을 수 없습니다" }
                p { class: "not-found-message",
                    code { "{path}" }
                }
                Link { to: Route::Dashboard {},
                    class: "not-found-link",
                    "Dashboard로 이동"
                }
            }
        }
    }
}
