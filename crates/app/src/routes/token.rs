use crate::auth::{use_session, UserRoleState};
use crate::routes::Route;
use client::auth::callback;
use dioxus::prelude::*;

/// OAuth landing page. Stores whatever tokens the backend put in the query
/// and moves on; the protected layout decides what happens next.
#[component]
pub fn TokenHandler(query: String) -> Element {
    let session = use_session();
    let role = use_context::<UserRoleState>();

    use_effect(move || {
        let target = callback::handle_callback(&session, &query);
        crate::auth::sync_role(role, &session);
        navigator().replace(Route::from_path(target));
    });

    rsx! {
        div { class: "auth-guard-loading",
            p { "Signing you in..." }
        }
    }
}
