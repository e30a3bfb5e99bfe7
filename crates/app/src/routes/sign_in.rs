use crate::auth::{use_api, UserRoleState};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::AppError;

/// Email/password sign-in plus the Google OAuth hand-off.
#[component]
pub fn SignIn() -> Element {
    let api = use_api();
    let role = use_context::<UserRoleState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| Option::<AppError>::None);
    let mut loading = use_signal(|| false);

    // The OAuth callback reads this cookie to know where to send the tokens.
    {
        let api = api.clone();
        use_hook(move || api.session().store_redirect_uri());
    }

    let google_url = api.oauth_authorize_url("google");

    let handle_login = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            loading.set(true);
            error.set(None);

            match api.login(&email(), &password()).await {
                Ok(_) => {
                    crate::auth::sync_role(role, api.session());
                    navigator().push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::error!(error = %e, "login failed");
                    error.set(Some(e));
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "card auth-card",
                div { class: "card-header",
                    h3 { class: "card-title", "Sign in" }
                    a {
                        class: "auth-oauth-btn",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            navigator().push(NavigationTarget::<Route>::External(google_url.clone()));
                        },
                        href: "#",
                        "Continue with Google"
                    }
                }
                div { class: "card-content",
                    if let Some(err) = error() {
                        div { class: "auth-error",
                            if err.message.trim().is_empty() {
                                "Login failed. Please check your credentials."
                            } else {
                                "{err.friendly_message()}"
                            }
                        }
                    }
                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            label { r#for: "email", "Email" }
                            input {
                                r#type: "email",
                                id: "email",
                                required: true,
                                value: "{email}",
                                oninput: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            label { r#for: "password", "Password" }
                            div { class: "input-with-action",
                                input {
                                    r#type: if show_password() { "text" } else { "password" },
                                    id: "password",
                                    required: true,
                                    value: "{password}",
                                    oninput: move |e: FormEvent| password.set(e.value()),
                                }
                                button {
                                    r#type: "button",
                                    class: "button ghost",
                                    onclick: move |_| show_password.toggle(),
                                    if show_password() { "Hide" } else { "Show" }
                                }
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
                div { class: "card-footer",
                    p { class: "auth-footer-text",
                        "Don't have an account? "
                        Link { to: Route::SignUp {}, "Sign up" }
                    }
                }
            }
        }
    }
}
