//! Sidebar table and the route paths the session logic redirects to.

pub const LOGIN_PATH: &str = "/authentication/sign-in";
pub const SIGN_UP_PATH: &str = "/authentication/sign-up";
pub const TOKEN_CALLBACK_PATH: &str = "/token";
pub const COURSE_SELECT_PATH: &str = "/course";
/// Where the sign-in callback lands.
pub const LANDING_PATH: &str = "/lecture";
/// Where unknown paths and password logins go.
pub const FALLBACK_PATH: &str = "/dashboard";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, SIGN_UP_PATH, TOKEN_CALLBACK_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Item,
    Divider,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Lecture,
    LectureList,
    Problems,
    Course,
    DevTool,
    QuestionBank,
    Students,
    CourseManage,
    LectureAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub kind: NavKind,
    pub key: &'static str,
    pub label: &'static str,
    pub icon: Option<NavIcon>,
    pub path: Option<&'static str>,
    /// Routed but never listed.
    pub hidden: bool,
    /// Listed only for course managers.
    pub admin_only: bool,
}

const fn item(
    key: &'static str,
    label: &'static str,
    icon: NavIcon,
    path: &'static str,
    hidden: bool,
    admin_only: bool,
) -> NavEntry {
    NavEntry {
        kind: NavKind::Item,
        key,
        label,
        icon: Some(icon),
        path: Some(path),
        hidden,
        admin_only,
    }
}

pub const SIDEBAR: &[NavEntry] = &[
    item("dashboard", "Dashboard", NavIcon::Dashboard, "/dashboard", true, false),
    item("lecture", "강의", NavIcon::Lecture, "/lecture", false, false),
    item("lecture-list", "강의 목록", NavIcon::LectureList, "/lecture-list", false, false),
    item("question-problems", "코딩 문제", NavIcon::Problems, "/question-problems", false, false),
    item("course", "강좌", NavIcon::Course, "/course", true, false),
    item("devtool", "코딩", NavIcon::DevTool, "/devtool", false, false),
    NavEntry {
        kind: NavKind::Divider,
        key: "divider-1",
        label: "",
        icon: None,
        path: None,
        hidden: false,
        admin_only: true,
    },
    NavEntry {
        kind: NavKind::Title,
        key: "admin-section",
        label: "관리",
        icon: None,
        path: None,
        hidden: false,
        admin_only: true,
    },
    item("question-list", "코딩 문제", NavIcon::QuestionBank, "/question-list", false, true),
    item("student-management", "학생 관리", NavIcon::Students, "/student-management", false, true),
    item("course-manage", "강좌 관리", NavIcon::CourseManage, "/course-manage", true, true),
    item("lecture-admin", "강의 관리", NavIcon::LectureAdmin, "/lecture/admin", false, true),
];

/// Entries the sidebar should render, in table order.
pub fn visible_entries(is_manager: bool) -> Vec<&'static NavEntry> {
    filter_entries(SIDEBAR, is_manager)
}

pub fn filter_entries(entries: &[NavEntry], is_manager: bool) -> Vec<&NavEntry> {
    entries
        .iter()
        .filter(|e| !e.hidden)
        .filter(|e| is_manager || !e.admin_only)
        .collect()
}

/// Strip any query string or fragment.
pub fn path_only(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

pub fn is_public_path(path: &str) -> bool {
    let path = path_only(path);
    PUBLIC_PATHS
        .iter()
        .any(|p| path == *p || path.strip_prefix(p).is_some_and(|rest| rest.starts_with('/')))
}
