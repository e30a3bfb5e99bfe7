use crate::auth::{use_api, use_is_manager};
use crate::components::{ErrorBanner, Loading};
use crate::routes::Route;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdChevronLeft, LdChevronRight};
use dioxus_free_icons::Icon;
use shared_types::{AppError, Lecture, LectureRequest, UrlInfo};
use uuid::Uuid;

/// Days of a month laid out in Sunday-first weeks; `None` pads the first
/// and last week.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(Some),
    );
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

/// Lectures starting on `date`, earliest first.
pub fn lectures_on(lectures: &[Lecture], date: NaiveDate) -> Vec<Lecture> {
    let mut day: Vec<Lecture> = lectures
        .iter()
        .filter(|l| l.do_at.map(|at| at.date()) == Some(date))
        .cloned()
        .collect();
    day.sort_by_key(|l| l.do_at);
    day
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Month calendar of active lectures. Managers can add a lecture on the
/// selected day.
#[component]
pub fn LectureCalendar() -> Element {
    let api = use_api();
    let is_manager = use_is_manager();
    let today = Local::now().date_naive();
    let mut view = use_signal(|| (today.year(), today.month()));
    let mut selected_date = use_signal(|| Option::<NaiveDate>::None);
    let mut show_form = use_signal(|| false);

    let mut lectures = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.lectures(true).await }
        }
    });

    let (year, month) = view();
    let cells = month_grid(year, month);
    let all: Vec<Lecture> = match &*lectures.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "강의 일정" }
                div { class: "page-actions",
                    button { class: "button ghost",
                        onclick: move |_| view.set(shift_month(year, month, -1)),
                        Icon::<LdChevronLeft> { icon: LdChevronLeft, width: 16, height: 16 }
                    }
                    span { class: "calendar-month", "{year}년 {month}월" }
                    button { class: "button ghost",
                        onclick: move |_| view.set(shift_month(year, month, 1)),
                        Icon::<LdChevronRight> { icon: LdChevronRight, width: 16, height: 16 }
                    }
                    if is_manager {
                        button { class: "button",
                            disabled: selected_date().is_none(),
                            onclick: move |_| show_form.set(true),
                            "강의 추가"
                        }
                    }
                }
            }

            if let Some(Err(err)) = &*lectures.read() {
                ErrorBanner { error: err.clone() }
            }

            div { class: "calendar-grid",
                for name in ["일", "월", "화", "수", "목", "금", "토"] {
                    div { class: "calendar-weekday", "{name}" }
                }
                for (i, cell) in cells.into_iter().enumerate() {
                    match cell {
                        None => rsx! { div { key: "pad-{i}", class: "calendar-cell empty" } },
                        Some(date) => {
                            let day = lectures_on(&all, date);
                            let cell_class = if selected_date() == Some(date) {
                                "calendar-cell selected"
                            } else if date == today {
                                "calendar-cell today"
                            } else {
                                "calendar-cell"
                            };
                            rsx! {
                                div {
                                    key: "{date}",
                                    class: cell_class,
                                    onclick: move |_| selected_date.set(Some(date)),
                                    span { class: "calendar-day", "{date.day()}" }
                                    for lecture in day {
                                        Link {
                                            key: "{lecture.id}",
                                            to: Route::LectureDetail { id: lecture.id.to_string() },
                                            class: "calendar-event",
                                            "{lecture.name}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(date) = selected_date() {
                div { class: "card",
                    h3 { class: "card-title", "{date} 강의" }
                    {
                        let day = lectures_on(&all, date);
                        if day.is_empty() {
                            rsx! { p { class: "empty-state", "이 날짜에 예정된 강의가 없습니다." } }
                        } else {
                            rsx! { LectureRows { lectures: day } }
                        }
                    }
                }
            }

            if show_form() {
                if let Some(date) = selected_date() {
                    LectureForm {
                        date,
                        on_close: move |created: bool| {
                            show_form.set(false);
                            if created {
                                lectures.restart();
                            }
                        },
                    }
                }
            }
        }
    }
}

/// Create-lecture dialog for a given day.
#[component]
fn LectureForm(date: NaiveDate, on_close: EventHandler<bool>) -> Element {
    let api = use_api();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut start = use_signal(|| "09:00".to_string());
    let mut end = use_signal(|| "10:00".to_string());
    let mut error = use_signal(|| Option::<AppError>::None);

    let handle_submit = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            let (Some(do_at), Some(the_end)) = (at(date, &start()), at(date, &end())) else {
                error.set(Some(AppError::bad_request("시간 형식이 올바르지 않습니다.")));
                return;
            };
            if name().trim().is_empty() {
                error.set(Some(AppError::bad_request("강의명은 필수입니다.")));
                return;
            }
            let request = LectureRequest {
                name: name(),
                description: description(),
                do_at: Some(do_at),
                the_end: Some(the_end),
                active: true,
            };
            match api.create_lecture(&request).await {
                Ok(()) => on_close.call(true),
                Err(e) => {
                    tracing::error!(error = %e, "create lecture failed");
                    error.set(Some(e));
                }
            }
        }
    };

    rsx! {
        div { class: "sheet-backdrop",
            div { class: "card sheet",
                h3 { class: "card-title", "새 강의 ({date})" }
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
                            input { r#type: "time", value: "{start}", oninput: move |e: FormEvent| start.set(e.value()) }
                        }
                        div { class: "auth-field",
                            label { "종료" }
                            input { r#type: "time", value: "{end}", oninput: move |e: FormEvent| end.set(e.value()) }
                        }
                    }
                    div { class: "form-actions",
                        button { r#type: "button", class: "button ghost", onclick: move |_| on_close.call(false), "취소" }
                        button { r#type: "submit", class: "button", "생성" }
                    }
                }
            }
        }
    }
}

fn at(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .ok()
        .map(|t| date.and_time(t))
}

#[component]
fn LectureRows(lectures: Vec<Lecture>) -> Element {
    rsx! {
        div { class: "list",
            for lecture in lectures {
                Link {
                    key: "{lecture.id}",
                    to: Route::LectureDetail { id: lecture.id.to_string() },
                    class: "list-row",
                    div { class: "list-row-main",
                        span { class: "list-row-title", "{lecture.name}" }
                        if let Some(desc) = &lecture.description {
                            span { class: "list-row-sub", "{desc}" }
                        }
                    }
                    span { class: "list-row-meta", "{lecture.schedule_label()}" }
                }
            }
        }
    }
}

/// Active lectures of the selected course as a flat list.
#[component]
pub fn LectureList() -> Element {
    let api = use_api();
    let lectures = use_resource(move || {
        let api = api.clone();
        async move { api.lectures(true).await }
    });

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h1 { class: "page-title", "강의 목록" }
            }
            match &*lectures.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty-state", "등록된 강의가 없습니다." }
                },
                Some(Ok(list)) => {
                    let mut list = list.clone();
                    list.sort_by(|a, b| b.do_at.cmp(&a.do_at));
                    rsx! { LectureRows { lectures: list } }
                }
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Material {
    Pdf,
    Video,
}

#[component]
pub fn LectureDetail(id: String) -> Element {
    let api = use_api();
    let mut active = use_signal(|| Option::<Material>::None);

    let detail = use_resource(use_reactive!(|id| {
        let api = api.clone();
        async move {
            let id = Uuid::parse_str(&id)
                .map_err(|_| AppError::bad_request("강의 ID가 올바르지 않습니다."))?;
            api.lecture_detail(id).await
        }
    }));

    rsx! {
        div { class: "container",
            div { class: "page-header",
                Link { to: Route::LectureCalendar {}, class: "button ghost", "← 강의 일정" }
            }
            match &*detail.read() {
                Some(Ok(Some(detail))) => {
                    let pdf = detail.pdf_url.clone().filter(|u| !u.url.is_empty());
                    let video = detail.video_url.clone().filter(|u| !u.url.is_empty());
                    let showing = active().or(if pdf.is_some() {
                        Some(Material::Pdf)
                    } else if video.is_some() {
                        Some(Material::Video)
                    } else {
                        None
                    });
                    let embedded: Option<UrlInfo> = match showing {
                        Some(Material::Pdf) => pdf.clone(),
                        Some(Material::Video) => video.clone(),
                        None => None,
                    };
                    rsx! {
                        div { class: "card",
                            h1 { class: "page-title", "{detail.lecture.name}" }
                            p { class: "list-row-meta", "{detail.lecture.schedule_label()}" }
                            if let Some(desc) = &detail.lecture.description {
                                p { "{desc}" }
                            }
                        }
                        div { class: "tabs",
                            if pdf.is_some() {
                                button {
                                    class: if showing == Some(Material::Pdf) { "tab active" } else { "tab" },
                                    onclick: move |_| active.set(Some(Material::Pdf)),
                                    "강의 자료"
                                }
                            }
                            if video.is_some() {
                                button {
                                    class: if showing == Some(Material::Video) { "tab active" } else { "tab" },
                                    onclick: move |_| active.set(Some(Material::Video)),
                                    "강의 영상"
                                }
                            }
                        }
                        match embedded {
                            Some(material) => rsx! {
                                div { class: "embed",
                                    iframe { src: "{material.url}", title: "{material.name}" }
                                }
                            },
                            None => rsx! { p { class: "empty-state", "등록된 강의 자료가 없습니다." } },
                        }
                        div { class: "card",
                            h3 { class: "card-title", "실습 문제" }
                            if detail.questions.is_empty() {
                                p { class: "empty-state", "등록된 문제가 없습니다." }
                            }
                            div { class: "list",
                                for question in detail.questions.clone() {
                                    div { key: "{question.id}", class: "list-row",
                                        div { class: "list-row-main",
                                            span { class: "list-row-title", "{question.title}" }
                                            if let Some(content) = &question.content {
                                                span { class: "list-row-sub", "{content}" }
                                            }
                                        }
                                        if let Some(lang) = question.language {
                                            span { class: "badge", "{lang}" }
                                        }
                                        Link { to: Route::Coding { id: question.id.to_string() }, class: "button", "풀기" }
                                    }
                                }
                            }
                        }
                    }
                }
                Some(Ok(None)) => rsx! {
                    p { class: "empty-state", "강의를 찾을 수 없습니다." }
                },
                Some(Err(err)) => rsx! { ErrorBanner { error: err.clone() } },
                None => rsx! { Loading {} },
            }
        }
    }
}
