pub mod course;
pub mod dashboard;
pub mod devtool;
pub mod grading;
pub mod lecture_admin;
pub mod lectures;
pub mod not_found;
pub mod problems;
pub mod question_admin;
pub mod sign_in;
pub mod sign_up;
pub mod students;
pub mod token;

use crate::auth::{use_api, use_is_manager, use_session, UserRoleState};
use crate::SelectedCourse;
use chrono::Utc;
use client::auth::{gate, GateDecision};
use client::nav::{self, NavEntry, NavIcon, NavKind};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdBriefcase, LdCalendar, LdFileText, LdLayoutDashboard, LdLogOut, LdPackage,
    LdSearch, LdSettings, LdShield, LdUsers,
};
use dioxus_free_icons::Icon;

use course::{CourseManage, CourseSelect};
use dashboard::Dashboard;
use devtool::DevTool;
use grading::LectureGrading;
use lecture_admin::{LectureAdmin, LectureAdminDetail};
use lectures::{LectureCalendar, LectureDetail, LectureList};
use not_found::NotFound;
use problems::{Coding, QuestionProblems};
use question_admin::{QuestionCreate, QuestionEdit, QuestionList};
use sign_in::SignIn;
use sign_up::SignUp;
use students::{StudentManagement, StudentProblems};
use token::TokenHandler;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/authentication/sign-in")]
    SignIn {},
    #[route("/authentication/sign-up")]
    SignUp {},
    #[route("/token?:..query")]
    TokenHandler { query: String },
    #[layout(ProtectedLayout)]
    #[layout(AppLayout)]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/lecture")]
    LectureCalendar {},
    #[route("/lecture-list")]
    LectureList {},
    #[route("/lecture/detail/:id")]
    LectureDetail { id: String },
    #[route("/question-problems")]
    QuestionProblems {},
    #[route("/coding/:id")]
    Coding { id: String },
    #[route("/course")]
    CourseSelect {},
    #[route("/devtool")]
    DevTool {},
    // ── Management ──
    #[route("/question-list")]
    QuestionList {},
    #[route("/question-list/new")]
    QuestionCreate {},
    #[route("/question-list/:id")]
    QuestionEdit { id: String },
    #[route("/student-management")]
    StudentManagement {},
    #[route("/student-management/:user_id")]
    StudentProblems { user_id: String },
    #[route("/course-manage")]
    CourseManage {},
    #[route("/lecture/admin")]
    LectureAdmin {},
    #[route("/lecture/admin/:id")]
    LectureAdminDetail { id: String },
    #[route("/lecture/grading/:id")]
    LectureGrading { id: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Route for a sidebar path. Unknown paths fall back to the dashboard.
    pub fn from_path(path: &str) -> Route {
        path.parse().unwrap_or(Route::Dashboard {})
    }

    fn title(&self) -> &'static str {
        match self {
            Route::Dashboard {} => "Dashboard",
            Route::LectureCalendar {} => "강의",
            Route::LectureList {} | Route::LectureDetail { .. } => "강의 목록",
            Route::QuestionProblems {} | Route::Coding { .. } => "코딩 문제",
            Route::CourseSelect {} => "강좌",
            Route::DevTool {} => "코딩",
            Route::QuestionList {} | Route::QuestionCreate {} | Route::QuestionEdit { .. } => {
                "코딩 문제 관리"
            }
            Route::StudentManagement {} | Route::StudentProblems { .. } => "학생 관리",
            Route::CourseManage {} => "강좌 관리",
            Route::LectureAdmin {} | Route::LectureAdminDetail { .. } | Route::LectureGrading { .. } => {
                "강의 관리"
            }
            Route::SignIn {} | Route::SignUp {} | Route::TokenHandler { .. } => "Auth",
            Route::NotFound { .. } => "",
        }
    }
}

/// Route for the gate's redirect path. Unparseable paths fall back to sign-in.
fn gate_target(decision: GateDecision) -> Option<Route> {
    decision
        .redirect_path()
        .map(|path| path.parse::<Route>().unwrap_or(Route::SignIn {}))
}

/// Gate for every page behind the sign-in. Re-evaluated on each route
/// change: a missing or expired token goes to sign-in, a token without a
/// selected course goes to the course picker.
#[component]
fn ProtectedLayout() -> Element {
    let route: Route = use_route();
    let session = use_session();

    let decision = gate::evaluate(&session, Utc::now(), &route.to_string());

    match gate_target(decision) {
        None => rsx! { Outlet::<Route> {} },
        Some(target) => {
            tracing::info!(from = %route, to = %target, "redirecting");
            navigator().replace(target);
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
    }
}

/// Main app layout with sidebar and top bar.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let is_manager = use_is_manager();
    let api = use_api();
    let role = use_context::<UserRoleState>();
    let mut selected = use_context::<SelectedCourse>();

    let current_path = route.to_string();
    let entries = nav::visible_entries(is_manager);
    let platform_admin = use_session()
        .claims()
        .is_some_and(|claims| claims.is_platform_admin());

    {
        let api = api.clone();
        use_future(move || {
            let api = api.clone();
            async move {
                match api.current_course().await {
                    Ok(course) => selected.course.set(Some(course)),
                    Err(err) => tracing::debug!(%err, "no current course"),
                }
            }
        });
    }

    let handle_logout = move |_| {
        let api = api.clone();
        async move {
            api.logout().await;
            crate::auth::sync_role(role, api.session());
            selected.course.set(None);
            navigator().replace(Route::SignIn {});
        }
    };

    let course_name = selected
        .course
        .read()
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "강좌 미선택".to_string());

    rsx! {
        div { class: "app-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    span { class: "sidebar-brand-name", "Study With Me" }
                }
                Link { to: Route::CourseSelect {}, class: "sidebar-course",
                    Icon::<LdBriefcase> { icon: LdBriefcase, width: 16, height: 16 }
                    span { "{course_name}" }
                }
                nav { class: "sidebar-menu",
                    for entry in entries {
                        SidebarEntry { key: "{entry.key}", entry: *entry, active_path: current_path.clone() }
                    }
                }
            }
            div { class: "app-main",
                header { class: "navbar",
                    h2 { class: "navbar-title", "{route.title()}" }
                    span { class: if is_manager { "role-badge manager" } else { "role-badge" },
                        if is_manager { "Manager" } else { "Student" }
                    }
                    if platform_admin {
                        span { class: "role-badge admin", "Admin" }
                    }
                    button { class: "button ghost", onclick: handle_logout,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Logout"
                    }
                }
                main { class: "page",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn SidebarEntry(entry: NavEntry, active_path: String) -> Element {
    match (entry.kind, entry.path) {
        (NavKind::Divider, _) => rsx! { hr { class: "sidebar-separator" } },
        (NavKind::Title, _) => rsx! { div { class: "sidebar-group-label", "{entry.label}" } },
        (NavKind::Item, Some(path)) => {
            let active = active_path == path || active_path.starts_with(&format!("{path}/"));
            rsx! {
                Link { to: Route::from_path(path),
                    class: if active { "sidebar-item active" } else { "sidebar-item" },
                    if let Some(icon) = entry.icon {
                        NavIconView { icon }
                    }
                    span { "{entry.label}" }
                }
            }
        }
        (NavKind::Item, None) => rsx! {},
    }
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        NavIcon::Lecture => rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 } },
        NavIcon::LectureList => rsx! { Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 } },
        NavIcon::Problems => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        NavIcon::Course => rsx! { Icon::<LdBriefcase> { icon: LdBriefcase, width: 18, height: 18 } },
        NavIcon::DevTool => rsx! { Icon::<LdPackage> { icon: LdPackage, width: 18, height: 18 } },
        NavIcon::QuestionBank => rsx! { Icon::<LdSearch> { icon: LdSearch, width: 18, height: 18 } },
        NavIcon::Students => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        NavIcon::CourseManage => rsx! { Icon::<LdSettings> { icon: LdSettings, width: 18, height: 18 } },
        NavIcon::LectureAdmin => rsx! { Icon::<LdShield> { icon: LdShield, width: 18, height: 18 } },
    }
}

/// Renders its children only for course managers. The sidebar already
/// hides the links; this covers direct navigation.
#[component]
pub fn AdminOnly(children: Element) -> Element {
    if !use_is_manager() {
        return rsx! {};
    }
    rsx! { {children} }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_paths_match_routes() {
        assert_eq!(Route::SignIn {}.to_string(), nav::LOGIN_PATH);
        assert_eq!(Route::SignUp {}.to_string(), nav::SIGN_UP_PATH);
        assert_eq!(Route::CourseSelect {}.to_string(), nav::COURSE_SELECT_PATH);
        assert_eq!(Route::LectureCalendar {}.to_string(), nav::LANDING_PATH);
        assert_eq!(Route::Dashboard {}.to_string(), nav::FALLBACK_PATH);
    }

    #[test]
    fn every_sidebar_path_is_routed() {
        for entry in nav::SIDEBAR {
            if let Some(path) = entry.path {
                let route: Route = path.parse().unwrap_or(Route::NotFound { route: vec![] });
                assert!(
                    !matches!(route, Route::NotFound { .. }),
                    "{} has no route",
                    entry.key
                );
                assert_eq!(route.to_string(), path);
            }
        }
    }

    #[test]
    fn gate_decisions_redirect_to_typed_routes() {
        assert_eq!(gate_target(GateDecision::Proceed), None);
        assert_eq!(gate_target(GateDecision::Login), Some(Route::SignIn {}));
        assert_eq!(gate_target(GateDecision::SelectCourse), Some(Route::CourseSelect {}));
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        let route: Route = "/does/not/exist".parse().unwrap_or(Route::Dashboard {});
        assert!(matches!(route, Route::NotFound { .. }));
    }
}
