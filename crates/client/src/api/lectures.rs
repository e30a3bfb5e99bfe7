use shared_types::{
    AppError, Lecture, LectureDetail, LectureGrading, LectureRequest, LectureToggleResponse,
    MaterialKind,
};
use uuid::Uuid;

use super::ApiClient;

impl ApiClient {
    /// Lectures of the selected course, filtered by activation state.
    pub async fn lectures(&self, active: bool) -> Result<Vec<Lecture>, AppError> {
        self.fetch_json(
            self.get("/api/lecture/all")
                .query(&[("activate", active)]),
        )
        .await
    }

    /// `None` when the backend answers with an empty body (unknown lecture).
    pub async fn lecture_detail(&self, id: Uuid) -> Result<Option<LectureDetail>, AppError> {
        self.fetch_optional_json(self.get(&format!("/api/lecture/detail/{id}")))
            .await
    }

    #[tracing::instrument(skip_all, fields(name = %request.name))]
    pub async fn create_lecture(&self, request: &LectureRequest) -> Result<(), AppError> {
        self.fetch_empty(self.post("/api/lecture").json(request)).await
    }

    pub async fn update_lecture(&self, id: Uuid, request: &LectureRequest) -> Result<Lecture, AppError> {
        self.fetch_json(self.put(&format!("/api/lecture/{id}")).json(request))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_lecture(&self, id: Uuid) -> Result<(), AppError> {
        self.fetch_empty(self.delete(&format!("/api/lecture/{id}"))).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_lecture_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<LectureToggleResponse, AppError> {
        let action = if active { "activate" } else { "deactivate" };
        self.fetch_json(self.post(&format!("/api/lecture/{action}/{id}")))
            .await
    }

    /// Attach a PDF or video link to a lecture.
    pub async fn attach_material(
        &self,
        lecture_id: Uuid,
        kind: MaterialKind,
        url_id: Uuid,
    ) -> Result<String, AppError> {
        self.fetch_text(
            self.post(&format!("/api/lecture/add/{lecture_id}"))
                .query(&[("type", kind.as_str().to_string()), ("urlID", url_id.to_string())]),
        )
        .await
    }

    pub async fn add_lecture_question(&self, lecture_id: Uuid, question_id: Uuid) -> Result<String, AppError> {
        self.fetch_text(
            self.post(&format!("/api/lecture/question/{lecture_id}"))
                .query(&[("questionId", question_id.to_string())]),
        )
        .await
    }

    pub async fn remove_lecture_question(&self, lecture_id: Uuid, question_id: Uuid) -> Result<(), AppError> {
        self.fetch_empty(
            self.delete(&format!("/api/lecture/question/{lecture_id}"))
                .query(&[("questionId", question_id.to_string())]),
        )
        .await
    }

    pub async fn lecture_grading(&self, id: Uuid) -> Result<LectureGrading, AppError> {
        self.fetch_json(self.get(&format!("/api/lecture/grading/{id}")))
            .await
    }
}
