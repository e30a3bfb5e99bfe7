use client::api::ApiClient;
use client::auth::{check_manager, RoleWatcher, SessionStore};
use dioxus::prelude::*;
use shared_types::Course;

mod auth;
mod components;
mod routes;
use auth::UserRoleState;
use routes::Route;

/// Course the signed-in user is working in. Filled from
/// `GET /api/course/current` and replaced by the course picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectedCourse {
    pub course: Signal<Option<Course>>,
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    client::config::load_config();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = client::config::app_config();
    let session = use_context_provider(|| SessionStore::from_config(&config.session));
    let api = use_hook(|| ApiClient::new(&config.api, session.clone()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        match api {
            Ok(api) => rsx! { Shell { api } },
            Err(err) => rsx! {
                div { class: "startup-error",
                    h1 { "Study With Me" }
                    p { "{err.friendly_message()}" }
                }
            },
        }
    }
}

/// Provides the client and the role flag, then mounts the router.
#[component]
fn Shell(api: ApiClient) -> Element {
    let config = client::config::app_config();
    let session = use_context::<SessionStore>();
    use_context_provider(|| api);

    let role = use_context_provider({
        let session = session.clone();
        move || UserRoleState {
            is_manager: Signal::new(check_manager(&session)),
        }
    });
    use_context_provider(|| SelectedCourse {
        course: Signal::new(None),
    });

    // The token can be replaced by a refresh or a callback at any time, so
    // the flag is re-derived on an interval rather than once at startup.
    use_future(move || {
        let watcher = RoleWatcher::from_config(session.clone(), &config.session);
        let mut is_manager = role.is_manager;
        async move {
            watcher
                .run(move |flag| {
                    if *is_manager.peek() != flag {
                        is_manager.set(flag);
                    }
                })
                .await
        }
    });

    rsx! {
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
