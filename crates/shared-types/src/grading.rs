use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{AuthorityType, QuestionSummary};

/// Lecture header inside a grading report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingLecture {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "isActive")]
    pub active: bool,
    #[serde(default)]
    pub do_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub the_end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingStudent {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub authority: Option<AuthorityType>,
    #[serde(default)]
    pub last_login_time: Option<NaiveDateTime>,
}

impl GradingStudent {
    /// Name, else first and last name, else email.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let full = format!(
            "{} {}",
            self.firstname.as_deref().unwrap_or_default(),
            self.lastname.as_deref().unwrap_or_default()
        );
        match full.trim() {
            "" => self.email.clone().unwrap_or_default(),
            full => full.to_string(),
        }
    }
}

/// Best score per question for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGrading {
    pub student: GradingStudent,
    #[serde(default)]
    pub scores: HashMap<Uuid, i32>,
}

impl StudentGrading {
    /// Score for a question, `None` when the student never submitted.
    pub fn score_for(&self, question_id: &Uuid) -> Option<i32> {
        self.scores.get(question_id).copied()
    }

    /// Sum of best scores across the given questions, unsubmitted counted as 0.
    pub fn total(&self, questions: &[QuestionSummary]) -> i32 {
        questions
            .iter()
            .map(|q| self.score_for(&q.id).unwrap_or(0))
            .sum()
    }
}

/// Per-lecture grading matrix for course managers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureGrading {
    pub lecture: GradingLecture,
    #[serde(default)]
    pub questions: Vec<QuestionSummary>,
    #[serde(default)]
    pub student_gradings: Vec<StudentGrading>,
}

impl LectureGrading {
    /// Number of students whose score is 100 for the question.
    pub fn solved_count(&self, question_id: &Uuid) -> usize {
        self.student_gradings
            .iter()
            .filter(|g| g.score_for(question_id) == Some(100))
            .count()
    }
}
