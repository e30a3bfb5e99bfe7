use shared_types::{AppError, Question, QuestionRequest, QuestionSearch};
use uuid::Uuid;

use super::ApiClient;

impl ApiClient {
    pub async fn search_questions(&self, search: &QuestionSearch) -> Result<Vec<Question>, AppError> {
        self.fetch_json(self.get("/api/questions").query(&search.query_pairs()))
            .await
    }

    /// Questions the caller authored.
    pub async fn my_questions(&self) -> Result<Vec<Question>, AppError> {
        self.fetch_json(self.get("/api/questions/my")).await
    }

    /// Problems assigned to the caller, with pass state.
    pub async fn assigned_questions(&self) -> Result<Vec<Question>, AppError> {
        self.fetch_json(self.get("/api/questions/user")).await
    }

    /// Problems assigned to one student, for course managers.
    pub async fn student_questions(&self, user_id: Uuid) -> Result<Vec<Question>, AppError> {
        self.fetch_json(self.get(&format!("/api/questions/user/{user_id}")))
            .await
    }

    pub async fn question(&self, id: Uuid) -> Result<Question, AppError> {
        self.fetch_json(self.get(&format!("/api/question/{id}"))).await
    }

    #[tracing::instrument(skip_all, fields(title = %request.title))]
    pub async fn create_question(&self, request: &QuestionRequest) -> Result<Question, AppError> {
        self.fetch_json(self.post("/api/questions").json(request)).await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn update_question(&self, id: Uuid, request: &QuestionRequest) -> Result<Question, AppError> {
        self.fetch_json(self.put(&format!("/api/questions/{id}")).json(request))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_question(&self, id: Uuid) -> Result<String, AppError> {
        self.fetch_text(self.delete(&format!("/api/questions/{id}"))).await
    }

    pub async fn set_question_active(&self, id: Uuid, active: bool) -> Result<String, AppError> {
        let action = if active { "activate" } else { "deactivate" };
        self.fetch_text(self.put(&format!("/api/questions/{id}/{action}")))
            .await
    }
}
