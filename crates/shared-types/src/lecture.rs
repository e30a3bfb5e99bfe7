use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Question, UrlInfo};

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

/// A scheduled lecture within the selected course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "isActive")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub do_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub the_end: Option<NaiveDateTime>,
}

impl Lecture {
    /// "2024-03-01 10:00 ~ 12:00" style range for list rows.
    pub fn schedule_label(&self) -> String {
        match (self.do_at, self.the_end) {
            (Some(start), Some(end)) if start.date() == end.date() => format!(
                "{} ~ {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%H:%M")
            ),
            (Some(start), Some(end)) => format!(
                "{} ~ {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            ),
            (Some(start), None) => start.format("%Y-%m-%d %H:%M").to_string(),
            _ => String::new(),
        }
    }
}

/// Everything the lecture detail page needs in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureDetail {
    pub lecture: Lecture,
    #[serde(default)]
    pub pdf_url: Option<UrlInfo>,
    #[serde(default)]
    pub video_url: Option<UrlInfo>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Returned by the activate/deactivate endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureToggleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub lecture: Lecture,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body for creating or updating a lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub the_end: Option<NaiveDateTime>,
    pub active: bool,
}

/// Which slot of a lecture a material link fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Pdf,
    Video,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Pdf => "pdf",
            MaterialKind::Video => "video",
        }
    }
}
