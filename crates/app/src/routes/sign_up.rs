use crate::auth::use_api;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, SignUpRequest};

#[component]
pub fn SignUp() -> Element {
    let api = use_api();
    let mut email = use_signal(String::new);
    let mut firstname = use_signal(String::new);
    let mut lastname = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<AppError>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            loading.set(true);
            error.set(None);

            let request = SignUpRequest::local(email(), firstname(), lastname(), password());
            match api.sign_up(&request).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "account created");
                    navigator().push(Route::SignIn {});
                }
                Err(e) => {
                    tracing::error!(error = %e, "sign up failed");
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
                    h3 { class: "card-title", "Join us today" }
                    p { class: "card-description", "Enter your email and password to register" }
                }
                div { class: "card-content",
                    if let Some(err) = error() {
                        div { class: "auth-error", "{err.friendly_message()}" }
                    }
                    form { onsubmit: handle_submit,
                        div { class: "auth-row",
                            div { class: "auth-field",
                                label { r#for: "lastname", "Last name" }
                                input {
                                    id: "lastname",
                                    required: true,
                                    value: "{lastname}",
                                    oninput: move |e: FormEvent| lastname.set(e.value()),
                                }
                            }
                            div { class: "auth-field",
                                label { r#for: "firstname", "First name" }
                                input {
                                    id: "firstname",
                                    required: true,
                                    value: "{firstname}",
                                    oninput: move |e: FormEvent| firstname.set(e.value()),
                                }
                            }
                        }
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
                            input {
                                r#type: "password",
                                id: "password",
                                required: true,
                                value: "{password}",
                                oninput: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            disabled: loading(),
                            if loading() { "Creating account..." } else { "Sign up" }
                        }
                    }
                }
                div { class: "card-footer",
                    p { class: "auth-footer-text",
                        "Already have an account? "
                        Link { to: Route::SignIn {}, "Sign in" }
                    }
                }
            }
        }
    }
}
