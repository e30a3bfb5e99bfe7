use crate::auth::{use_api, UserRoleState};
use crate::components::{ErrorBanner, Loading};
use crate::routes::{AdminOnly, Route};
use crate::SelectedCourse;
use dioxus::prelude::*;
use shared_types::{AppError, Course, CourseRequest};

/// Case-insensitive match on name or description; a blank query keeps all.
pub fn filter_courses(courses: &[Course], query: &str) -> Vec<Course> {
    let query = query.trim().to_lowercase();
    courses
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Pick the working course among enrolled ones, or ask to join another.
#[component]
pub fn CourseSelect() -> Element {
    let api = use_api();
    let role = use_context::<UserRoleState>();
    let mut selected = use_context::<SelectedCourse>();
    let mut query = use_signal(String::new);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mine = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.my_courses().await }
        }
    });
    let all = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.all_courses().await }
        }
    });

    let select = {
        let api = api.clone();
        move |course: Course| {
            let api = api.clone();
            spawn(async move {
                error.set(None);
                match api.select_course(course.id).await {
                    Ok(_) => {
                        tracing::info!(course_id = %course.id, "course selected");
                        crate::auth::sync_role(role, api.session());
                        selected.course.set(Some(course));
                        navigator().push(Route::LectureCalendar {});
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "course selection failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let join = move |course: Course| {
        let api = api.clone();
        spawn(async move {
            error.set(None);
            match api.join_course(course.id).await {
                Ok(_) => notice.set(Some(format!("{} 강좌에 수강 신청했습니다.", course.name))),
                Err(e) => {
                    tracing::error!(error = %e, "join request failed");
                    error.set(Some(e));
                }
            }
        });
    };

    let current_id = selected.course.read().as_ref().map(|c| c.id);

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "강좌 선택" }
            }
            div { class: "search-bar",
                input {
                    placeholder: "Search here",
                    value: "{query}",
                    oninput: move |e: FormEvent| query.set(e.value()),
                }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }

            h3 { class: "section-title", "내 강좌" }
            match &*mine.read() {
                Some(Ok(list)) => {
                    let list = filter_courses(list, &query());
                    let empty = list.is_empty();
                    rsx! {
                        if empty {
                            p { class: "empty-state", "수강 중인 강좌가 없습니다." }
                        }
                        div { class: "list",
                            for course in list {
                                div { key: "{course.id}", class: "list-row",
                                    div { class: "list-row-main",
                                        span { class: "list-row-title", "{course.name}" }
                                        if let Some(desc) = &course.description {
                                            span { class: "list-row-sub", "{desc}" }
                                        }
                                    }
                                    if current_id == Some(course.id) {
                                        span { class: "badge success", "선택됨" }
                                    } else {
                                        button {
                                            class: "button",
                                            onclick: {
                                                let mut select = select.clone();
                                                let course = course.clone();
                                                move |_| select(course.clone())
                                            },
                                            "선택"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }

            h3 { class: "section-title", "전체 강좌" }
            match &*all.read() {
                Some(Ok(list)) => {
                    let list = filter_courses(list, &query());
                    rsx! {
                        div { class: "list",
                            for course in list {
                                div { key: "{course.id}", class: "list-row",
                                    div { class: "list-row-main",
                                        span { class: "list-row-title", "{course.name}" }
                                        if let Some(desc) = &course.description {
                                            span { class: "list-row-sub", "{desc}" }
                                        }
                                    }
                                    button {
                                        class: "button ghost",
                                        onclick: {
                                            let mut join = join.clone();
                                            let course = course.clone();
                                            move |_| join(course.clone())
                                        },
                                        "수강 신청"
                                    }
                                }
                            }
                        }
                    }
                }
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}

/// Courses the current user manages: create, rename, delete.
#[component]
pub fn CourseManage() -> Element {
    rsx! {
        AdminOnly { CourseManageInner {} }
    }
}

#[component]
fn CourseManageInner() -> Element {
    let api = use_api();
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| Option::<Course>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut courses = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.managed_courses().await }
        }
    });

    let delete = move |course: Course| {
        let api = api.clone();
        spawn(async move {
            match api.delete_course(course.id).await {
                Ok(msg) => {
                    tracing::info!(course_id = %course.id, "course deleted");
                    notice.set(Some(msg));
                    courses.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, "delete course failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "강좌 관리" }
                div { class: "page-actions",
                    Link { to: Route::StudentManagement {}, class: "button ghost", "학생 관리" }
                    button { class: "button", onclick: move |_| show_form.set(true), "강좌 생성" }
                }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            match &*courses.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "관리 중인 강좌가 없습니다." }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "list",
                        for course in list.clone() {
                            div { key: "{course.id}", class: "list-row",
                                div { class: "list-row-main",
                                    span { class: "list-row-title", "{course.name}" }
                                    if let Some(desc) = &course.description {
                                        span { class: "list-row-sub", "{desc}" }
                                    }
                                }
                                button {
                                    class: "button ghost",
                                    onclick: {
                                        let course = course.clone();
                                        move |_| editing.set(Some(course.clone()))
                                    },
                                    "수정"
                                }
                                button {
                                    class: "button danger",
                                    onclick: {
                                        let mut delete = delete.clone();
                                        let course = course.clone();
                                        move |_| delete(course.clone())
                                    },
                                    "삭제"
                                }
                            }
                        }
                    }
                },
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }

            if show_form() {
                CourseForm {
                    course: None,
                    on_close: move |saved: Option<String>| {
                        show_form.set(false);
                        if let Some(msg) = saved {
                            notice.set(Some(msg));
                            courses.restart();
                        }
                    },
                }
            }
            if let Some(course) = editing() {
                CourseForm {
                    course: Some(course),
                    on_close: move |saved: Option<String>| {
                        editing.set(None);
                        if let Some(msg) = saved {
                            notice.set(Some(msg));
                            courses.restart();
                        }
                    },
                }
            }
        }
    }
}

/// Create (no `course`) or edit dialog. `on_close` carries the backend
/// message when something was saved.
#[component]
fn CourseForm(course: Option<Course>, on_close: EventHandler<Option<String>>) -> Element {
    let api = use_api();
    let editing_id = course.as_ref().map(|c| c.id);
    let mut name = use_signal({
        let course = course.clone();
        move || course.map(|c| c.name).unwrap_or_default()
    });
    let mut description = use_signal(move || {
        course
            .and_then(|c| c.description)
            .unwrap_or_default()
    });
    let mut error = use_signal(|| Option::<AppError>::None);

    let handle_submit = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            if name().trim().is_empty() {
                error.set(Some(AppError::bad_request("강좌명은 필수입니다.")));
                return;
            }
            let request = CourseRequest {
                name: name(),
                description: description(),
            };
            let saved = match editing_id {
                Some(id) => api.update_course(id, &request).await,
                None => api.create_course(&request).await,
            };
            match saved {
                Ok(msg) => on_close.call(Some(msg)),
                Err(e) => {
                    tracing::error!(error = %e, "save course failed");
                    error.set(Some(e));
                }
            }
        }
    };

    rsx! {
        div { class: "sheet-backdrop",
            div { class: "card sheet",
                h3 { class: "card-title", if editing_id.is_some() { "강좌 수정" } else { "새 강좌" } }
                if let Some(err) = error() {
                    ErrorBanner { error: err }
                }
                form { onsubmit: handle_submit,
                    div { class: "auth-field",
                        label { "강좌명" }
                        input { value: "{name}", oninput: move |e: FormEvent| name.set(e.value()) }
                    }
                    div { class: "auth-field",
                        label { "설명" }
                        textarea { value: "{description}", oninput: move |e: FormEvent| description.set(e.value()) }
                    }
                    div { class: "form-actions",
                        button { r#type: "button", class: "button ghost", onclick: move |_| on_close.call(None), "취소" }
                        button { r#type: "submit", class: "button", "저장" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn course(name: &str, description: Option<&str>) -> Course {
        Course {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(str::to_string),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn blank_query_keeps_everything() {
        let all = vec![course("Rust", None), course("Java", None)];
        assert_eq!(filter_courses(&all, "  ").len(), 2);
    }

    #[test]
    fn query_matches_name_or_description_ignoring_case() {
        let all = vec![
            course("Rust 입문", None),
            course("Databases", Some("SQL and rust bindings")),
            course("Java", Some("OOP")),
        ];
        let names: Vec<String> = filter_courses(&all, "RUST")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Rust 입문".to_string(), "Databases".to_string()]);
    }
}
