use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A PDF or video link that can be attached to lectures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlInfo {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "isActive")]
    pub active: bool,
    #[serde(default)]
    pub url: String,
    /// `pdf` or `video`.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRequest {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub active: bool,
}
