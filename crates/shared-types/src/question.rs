use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::AppError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Languages the judge can compile and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageType {
    Java,
    C,
    Python,
    Cpp,
    Sql,
    Javascript,
    Typescript,
    Kotlin,
    Swift,
    Ruby,
    Php,
    Rust,
    Golang,
    Scala,
    Haskell,
    Elixir,
}

impl LanguageType {
    pub const ALL: [LanguageType; 16] = [
        LanguageType::Java,
        LanguageType::C,
        LanguageType::Python,
        LanguageType::Cpp,
        LanguageType::Sql,
        LanguageType::Javascript,
        LanguageType::Typescript,
        LanguageType::Kotlin,
        LanguageType::Swift,
        LanguageType::Ruby,
        LanguageType::Php,
        LanguageType::Rust,
        LanguageType::Golang,
        LanguageType::Scala,
        LanguageType::Haskell,
        LanguageType::Elixir,
    ];

    /// Wire name, also used as the `language` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageType::Java => "JAVA",
            LanguageType::C => "C",
            LanguageType::Python => "PYTHON",
            LanguageType::Cpp => "CPP",
            LanguageType::Sql => "SQL",
            LanguageType::Javascript => "JAVASCRIPT",
            LanguageType::Typescript => "TYPESCRIPT",
            LanguageType::Kotlin => "KOTLIN",
            LanguageType::Swift => "SWIFT",
            LanguageType::Ruby => "RUBY",
            LanguageType::Php => "PHP",
            LanguageType::Rust => "RUST",
            LanguageType::Golang => "GOLANG",
            LanguageType::Scala => "SCALA",
            LanguageType::Haskell => "HASKELL",
            LanguageType::Elixir => "ELIXIR",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

/// A coding problem as returned by the question endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    #[serde(default)]
    pub course_id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub language: Option<LanguageType>,
    /// Difficulty level.
    #[serde(default)]
    pub lv: Option<i32>,
    #[serde(default)]
    pub pass: Option<bool>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub initial_code: Option<String>,
    #[serde(default)]
    pub input_data: Option<String>,
    #[serde(default)]
    pub test_cases: Option<String>,
    #[serde(default)]
    pub is_test_case: Option<bool>,
    #[serde(default)]
    pub is_compare: Option<bool>,
    #[serde(default)]
    pub compare_code: Option<String>,
    #[serde(default, alias = "active")]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_by: Option<Uuid>,
    #[serde(default)]
    pub do_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub lecture_name: Option<String>,
}

impl Question {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    pub fn passed(&self) -> bool {
        self.pass.unwrap_or(false)
    }
}

/// Slim question view used inside grading reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub language: Option<LanguageType>,
    #[serde(default)]
    pub lv: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_compare: Option<bool>,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub title: String,
    pub content: String,
    pub language: LanguageType,
    pub lv: i32,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub initial_code: String,
    #[serde(default)]
    pub input_data: String,
    pub is_compare: bool,
    #[serde(default)]
    pub compare_code: String,
    pub is_active: bool,
}

impl Default for QuestionRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            language: LanguageType::Java,
            lv: 1,
            answer: String::new(),
            initial_code: String::new(),
            input_data: String::new(),
            is_compare: false,
            compare_code: String::new(),
            is_active: true,
        }
    }
}

impl QuestionRequest {
    /// Editable copy of an existing question.
    pub fn from_question(question: &Question) -> Self {
        let defaults = Self::default();
        Self {
            title: question.title.clone(),
            content: question.content.clone().unwrap_or_default(),
            language: question.language.unwrap_or(defaults.language),
            lv: question.lv.unwrap_or(defaults.lv),
            answer: question.answer.clone().unwrap_or_default(),
            initial_code: question.initial_code.clone().unwrap_or_default(),
            input_data: question.input_data.clone().unwrap_or_default(),
            is_compare: question.is_compare.unwrap_or(false),
            compare_code: question.compare_code.clone().unwrap_or_default(),
            is_active: question.is_active.unwrap_or(defaults.is_active),
        }
    }

    /// Title and content are required; compare mode needs compare code.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut fields = HashMap::new();
        if self.title.trim().is_empty() {
            fields.insert("title".to_string(), "문제 제목을 입력해주세요.".to_string());
        }
        if self.content.trim().is_empty() {
            fields.insert("content".to_string(), "문제 내용을 입력해주세요.".to_string());
        }
        if self.is_compare && self.compare_code.trim().is_empty() {
            fields.insert("compareCode".to_string(), "비교 코드를 입력해주세요.".to_string());
        }
        if !(1..=10).contains(&self.lv) {
            fields.insert("lv".to_string(), "난이도는 1에서 10 사이여야 합니다.".to_string());
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("Validation failed", fields))
        }
    }
}

/// Filters for `GET /api/questions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSearch {
    pub language: Option<LanguageType>,
    pub keyword: Option<String>,
}

impl QuestionSearch {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            language: None,
            keyword: Some(keyword.into()),
        }
    }

    /// Query pairs, skipping unset and blank filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(language) = self.language {
            pairs.push(("language", language.as_str().to_string()));
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            pairs.push(("keyword", keyword.to_string()));
        }
        pairs
    }
}
