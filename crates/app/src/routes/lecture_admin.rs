use crate::auth::use_api;
use crate::components::{ErrorBanner, Loading};
use crate::routes::{AdminOnly, Route};
use chrono::NaiveDateTime;
use dioxus::prelude::*;
use shared_types::{
    AppError, Lecture, LectureRequest, MaterialKind, QuestionSearch, UrlInfo, UrlRequest,
};
use uuid::Uuid;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value for a `datetime-local` input.
pub fn to_local_input(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format(LOCAL_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a `datetime-local` value; blank means unscheduled.
pub fn from_local_input(raw: &str) -> Result<Option<NaiveDateTime>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, LOCAL_FORMAT)
        .map(Some)
        .map_err(|_| AppError::bad_request("시간 형식이 올바르지 않습니다."))
}

#[component]
pub fn LectureAdmin() -> Element {
    rsx! {
        AdminOnly { LectureAdminBoard {} }
    }
}

/// Active and inactive lectures side by side with activation toggles.
#[component]
fn LectureAdminBoard() -> Element {
    let api = use_api();
    let mut show_active = use_signal(|| true);
    let mut editing = use_signal(|| Option::<Lecture>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut lectures = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let active = show_active();
            async move { api.lectures(active).await }
        }
    });

    let toggle = {
        let api = api.clone();
        move |lecture: Lecture| {
            let api = api.clone();
            spawn(async move {
                error.set(None);
                match api.set_lecture_active(lecture.id, !lecture.active).await {
                    Ok(resp) => {
                        tracing::info!(lecture_id = %lecture.id, active = resp.lecture.active, "lecture toggled");
                        notice.set(Some(resp.message));
                        lectures.restart();
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "toggle lecture failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let remove = move |lecture: Lecture| {
        let api = api.clone();
        spawn(async move {
            error.set(None);
            match api.delete_lecture(lecture.id).await {
                Ok(()) => {
                    notice.set(Some(format!("{} 강의를 삭제했습니다.", lecture.name)));
                    lectures.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, "delete lecture failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "강의 관리" }
                div { class: "page-actions",
                    Link { to: Route::LectureCalendar {}, class: "button ghost", "강의 일정" }
                }
            }
            div { class: "tabs",
                button {
                    class: if show_active() { "tab active" } else { "tab" },
                    onclick: move |_| show_active.set(true),
                    "활성 강의"
                }
                button {
                    class: if show_active() { "tab" } else { "tab active" },
                    onclick: move |_| show_active.set(false),
                    "비활성 강의"
                }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            match &*lectures.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "강의가 없습니다." }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "강의명" }
                                th { "일정" }
                                th {}
                            }
                        }
                        tbody {
                            for lecture in list.clone() {
                                {
                                    let mut toggle = toggle.clone();
                                    let mut remove = remove.clone();
                                    let for_toggle = lecture.clone();
                                    let for_remove = lecture.clone();
                                    let for_edit = lecture.clone();
                                    rsx! {
                                        tr { key: "{lecture.id}",
                                            td {
                                                Link { to: Route::LectureAdminDetail { id: lecture.id.to_string() }, "{lecture.name}" }
                                            }
                                            td { "{lecture.schedule_label()}" }
                                            td { class: "row-actions",
                                                Link { to: Route::LectureGrading { id: lecture.id.to_string() }, class: "button ghost", "채점" }
                                                button { class: "button ghost", onclick: move |_| editing.set(Some(for_edit.clone())), "수정" }
                                                button { class: "button ghost",
                                                    onclick: move |_| toggle(for_toggle.clone()),
                                                    if lecture.active { "비활성화" } else { "활성화" }
                                                }
                                                button { class: "button danger", onclick: move |_| remove(for_remove.clone()), "삭제" }
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
            if let Some(lecture) = editing() {
                LectureEditForm {
                    lecture,
                    on_close: move |saved: bool| {
                        editing.set(None);
                        if saved {
                            lectures.restart();
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn LectureEditForm(lecture: Lecture, on_close: EventHandler<bool>) -> Element {
    let api = use_api();
    let id = lecture.id;
    let active = lecture.active;
    let mut name = use_signal(|| lecture.name.clone());
    let mut description = use_signal(|| lecture.description.clone().unwrap_or_default());
    let mut start = use_signal(|| to_local_input(lecture.do_at));
    let mut end = use_signal(|| to_local_input(lecture.the_end));
    let mut error = use_signal(|| Option::<AppError>::None);

    let handle_submit = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            let schedule = from_local_input(&start()).and_then(|s| Ok((s, from_local_input(&end())?)));
            let (do_at, the_end) = match schedule {
                Ok(pair) => pair,
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            };
            if name().trim().is_empty() {
                error.set(Some(AppError::bad_request("강의명은 필수입니다.")));
                return;
            }
            let request = LectureRequest {
                name: name(),
                description: description(),
                do_at,
                the_end,
                active,
            };
            match api.update_lecture(id, &request).await {
                Ok(_) => on_close.call(true),
                Err(e) => {
                    tracing::error!(error = %e, "update lecture failed");
                    error.set(Some(e));
                }
            }
        }
    };

    rsx! {
        div { class: "sheet-backdrop",
            div { class: "card sheet",
                h3 { class: "card-title", "강의 수정" }
                if let Some(err) = error() {
                    ErrorBanner { error: err }
                }
                form { onsubmit: handle_submit,
                    div { class: "auth-field",
                        label { "강의명" }
                        input { value: "{name}", oninput: move |e: FormEvent| name.set(e.value()) }
                    }
                    div { class: "auth-field",
                        label { "설명" }
                        textarea { value: "{description}", oninput: move |e: FormEvent| description.set(e.value()) }
                    }
                    div { class: "auth-row",
                        div { class: "auth-field",
                            label { "시작" }
                            input { r#type: "datetime-local", value: "{start}", oninput: move |e: FormEvent| start.set(e.value()) }
                        }
                        div { class: "auth-field",
                            label { "종료" }
                            input { r#type: "datetime-local", value: "{end}", oninput: move |e: FormEvent| end.set(e.value()) }
                        }
                    }
                    div { class: "form-actions",
                        button { r#type: "button", class: "button ghost", onclick: move |_| on_close.call(false), "취소" }
                        button { r#type: "submit", class: "button", "저장" }
                    }
                }
            }
        }
    }
}

/// Materials and problems attached to one lecture.
#[component]
pub fn LectureAdminDetail(id: String) -> Element {
    let parsed = Uuid::parse_str(&id).ok();
    rsx! {
        AdminOnly {
            match parsed {
                Some(id) => rsx! { LectureContents { id } },
                None => rsx! { ErrorBanner { error: AppError::bad_request("강의 ID가 올바르지 않습니다.") } },
            }
        }
    }
}

#[component]
fn LectureContents(id: Uuid) -> Element {
    let api = use_api();
    let mut notice = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut detail = use_resource({
        let api = api.clone();
        use_reactive!(|id| {
            let api = api.clone();
            async move { api.lecture_detail(id).await }
        })
    });

    let remove_question = move |question_id: Uuid| {
        let api = api.clone();
        spawn(async move {
            match api.remove_lecture_question(id, question_id).await {
                Ok(()) => detail.restart(),
                Err(e) => {
                    tracing::error!(error = %e, %question_id, "detach question failed");
                    error.set(Some(e));
                }
            }
        });
    };

    let on_changed = move |msg: String| {
        notice.set(Some(msg));
        detail.restart();
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::LectureAdmin {}, class: "button ghost", "← 강의 관리" }
            }
            if let Some(msg) = notice() {
                div { class: "auth-success", "{msg}" }
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            match &*detail.read() {
                Some(Ok(Some(detail))) => rsx! {
                    div { class: "card",
                        h1 { class: "page-title", "{detail.lecture.name}" }
                        p { class: "list-row-meta", "{detail.lecture.schedule_label()}" }
                    }
                    div { class: "card",
                        h3 { class: "card-title", "강의 자료" }
                        MaterialSlot { lecture_id: id, kind: MaterialKind::Pdf, current: detail.pdf_url.clone(), on_changed }
                        MaterialSlot { lecture_id: id, kind: MaterialKind::Video, current: detail.video_url.clone(), on_changed }
                    }
                    div { class: "card",
                        h3 { class: "card-title", "실습 문제" }
                        if detail.questions.is_empty() {
                            p { class: "empty-state", "등록된 문제가 없습니다." }
                        }
                        div { class: "list",
                            for question in detail.questions.clone() {
                                {
                                    let mut remove_question = remove_question.clone();
                                    let question_id = question.id;
                                    rsx! {
                                        div { key: "{question_id}", class: "list-row",
                                            div { class: "list-row-main",
                                                span { class: "list-row-title", "{question.title}" }
                                            }
                                            button { class: "button danger", onclick: move |_| remove_question(question_id), "제외" }
                                        }
                                    }
                                }
                            }
                        }
                        QuestionPicker {
                            lecture_id: id,
                            attached: detail.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
                            on_changed,
                        }
                    }
                },
                Some(Ok(None)) => rsx! { p { class: "empty-state", "강의를 찾을 수 없습니다." } },
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}

/// One material slot (PDF or video): shows the current link, searches stored
/// links, or registers a new one and attaches it.
#[component]
fn MaterialSlot(
    lecture_id: Uuid,
    kind: MaterialKind,
    current: Option<UrlInfo>,
    on_changed: EventHandler<String>,
) -> Element {
    let api = use_api();
    let mut keyword = use_signal(String::new);
    let mut new_name = use_signal(String::new);
    let mut new_url = use_signal(String::new);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut found = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let keyword = keyword();
            async move {
                if keyword.trim().is_empty() {
                    return Ok(Vec::new());
                }
                api.search_materials(Some(kind), &keyword).await
            }
        }
    });

    let attach = {
        let api = api.clone();
        move |url_id: Uuid| {
            let api = api.clone();
            spawn(async move {
                match api.attach_material(lecture_id, kind, url_id).await {
                    Ok(msg) => on_changed.call(msg),
                    Err(e) => {
                        tracing::error!(error = %e, "attach material failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let discard = {
        let api = api.clone();
        move |url_id: Uuid| {
            let api = api.clone();
            spawn(async move {
                match api.delete_material(url_id).await {
                    Ok(()) => found.restart(),
                    Err(e) => {
                        tracing::error!(error = %e, %url_id, "delete material failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let register = {
        let attach = attach.clone();
        move |_| {
            let api = api.clone();
            if new_name().trim().is_empty() || new_url().trim().is_empty() {
                error.set(Some(AppError::bad_request("이름과 URL을 입력하세요.")));
                return;
            }
            let request = UrlRequest {
                name: new_name(),
                url: new_url(),
                kind: kind.as_str().to_string(),
                active: true,
            };
            let attach = attach.clone();
            spawn(async move {
                match api.create_material(&request).await {
                    Ok(info) => {
                        new_name.set(String::new());
                        new_url.set(String::new());
                        attach(info.id);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "create material failed");
                        error.set(Some(e));
                    }
                }
            });
        }
    };

    let label = match kind {
        MaterialKind::Pdf => "PDF",
        MaterialKind::Video => "영상",
    };

    rsx! {
        div { class: "material-slot",
            h4 { "{label}" }
            match &current {
                Some(info) => rsx! { a { href: "{info.url}", target: "_blank", "{info.name}" } },
                None => rsx! { span { class: "list-row-meta", "미등록" } },
            }
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            div { class: "search-bar",
                input {
                    placeholder: "등록된 자료 검색",
                    value: "{keyword}",
                    oninput: move |e: FormEvent| keyword.set(e.value()),
                }
            }
            if let Some(Ok(list)) = &*found.read() {
                div { class: "list",
                    for info in list.clone() {
                        {
                            let attach = attach.clone();
                            let discard = discard.clone();
                            let url_id = info.id;
                            rsx! {
                                div { key: "{url_id}", class: "list-row",
                                    div { class: "list-row-main",
                                        span { class: "list-row-title", "{info.name}" }
                                        span { class: "list-row-sub", "{info.url}" }
                                    }
                                    button { class: "button ghost", onclick: move |_| attach(url_id), "연결" }
                                    button { class: "button danger", onclick: move |_| discard(url_id), "삭제" }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "auth-row",
                input { placeholder: "이름", value: "{new_name}", oninput: move |e: FormEvent| new_name.set(e.value()) }
                input { placeholder: "URL", value: "{new_url}", oninput: move |e: FormEvent| new_url.set(e.value()) }
                button { class: "button", onclick: register, "등록 후 연결" }
            }
        }
    }
}

/// Search the question bank and attach problems not yet on the lecture.
#[component]
fn QuestionPicker(lecture_id: Uuid, attached: Vec<Uuid>, on_changed: EventHandler<String>) -> Element {
    let api = use_api();
    let mut keyword = use_signal(String::new);
    let mut error = use_signal(|| Option::<AppError>::None);

    let mut found = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let keyword = keyword();
            async move {
                if keyword.trim().is_empty() {
                    return Ok(Vec::new());
                }
                api.search_questions(&QuestionSearch::keyword(keyword)).await
            }
        }
    });

    let add = move |question_id: Uuid| {
        let api = api.clone();
        spawn(async move {
            match api.add_lecture_question(lecture_id, question_id).await {
                Ok(msg) => on_changed.call(msg),
                Err(e) => {
                    tracing::error!(error = %e, %question_id, "attach question failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div { class: "question-picker",
            if let Some(err) = error() {
                ErrorBanner { error: err }
            }
            div { class: "search-bar",
                input {
                    placeholder: "문제 검색",
                    value: "{keyword}",
                    oninput: move |e: FormEvent| keyword.set(e.value()),
                }
            }
            if let Some(Ok(list)) = &*found.read() {
                div { class: "list",
                    for question in list.iter().filter(|q| !attached.contains(&q.id)).cloned() {
                        {
                            let mut add = add.clone();
                            let question_id = question.id;
                            rsx! {
                                div { key: "{question_id}", class: "list-row",
                                    div { class: "list-row-main",
                                        span { class: "list-row-title", "{question.title}" }
                                    }
                                    button { class: "button ghost", onclick: move |_| add(question_id), "추가" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
