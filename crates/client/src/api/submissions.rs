use shared_types::{AppError, DebugRequest, DebugResponse, SubmissionRequest, SubmissionResponse};
use uuid::Uuid;

use super::ApiClient;

impl ApiClient {
    /// Submit code for grading.
    #[tracing::instrument(skip(self, request), fields(language = %request.language))]
    pub async fn submit(
        &self,
        question_id: Uuid,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResponse, AppError> {
        self.fetch_json(
            self.post(&format!("/api/submissions/questions/{question_id}"))
                .json(request),
        )
        .await
    }

    /// Run code without grading (scratch pad).
    #[tracing::instrument(skip_all, fields(language = %request.language))]
    pub async fn run_code(&self, request: &DebugRequest) -> Result<DebugResponse, AppError> {
        self.fetch_json(self.post("/api/submissions/debug").json(request))
            .await
    }

    /// Run code against a question's input without grading.
    #[tracing::instrument(skip(self, request), fields(language = %request.language))]
    pub async fn run_question_code(
        &self,
        question_id: Uuid,
        request: &DebugRequest,
    ) -> Result<DebugResponse, AppError> {
        self.fetch_json(
            self.post(&format!("/api/submissions/debug/questions/{question_id}"))
                .json(request),
        )
        .await
    }

    pub async fn my_submissions(&self) -> Result<Vec<SubmissionResponse>, AppError> {
        self.fetch_json(self.get("/api/submissions/me")).await
    }

    pub async fn my_question_submissions(&self, question_id: Uuid) -> Result<Vec<SubmissionResponse>, AppError> {
        self.fetch_json(self.get(&format!("/api/submissions/me/questions/{question_id}")))
            .await
    }
}
