use shared_types::{AppError, Course, CourseRequest, CourseStudent, SelectCourseRequest, TokenResponse};
use uuid::Uuid;

use super::ApiClient;

impl ApiClient {
    pub async fn all_courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetch_json(self.get("/api/course/all")).await
    }

    /// Courses the caller manages.
    pub async fn managed_courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetch_json(self.get("/api/course/manage")).await
    }

    /// Courses the caller is enrolled in.
    pub async fn my_courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetch_json(self.get("/api/course/self")).await
    }

    pub async fn current_course(&self) -> Result<Course, AppError> {
        self.fetch_json(self.get("/api/course/current")).await
    }

    pub async fn course(&self, id: Uuid) -> Result<Course, AppError> {
        self.fetch_json(self.get(&format!("/api/course/{id}"))).await
    }

    #[tracing::instrument(skip_all, fields(name = %request.name))]
    pub async fn create_course(&self, request: &CourseRequest) -> Result<String, AppError> {
        self.fetch_text(self.post("/api/course").json(request)).await
    }

    pub async fn update_course(&self, id: Uuid, request: &CourseRequest) -> Result<String, AppError> {
        self.fetch_text(self.put(&format!("/api/course/{id}")).json(request))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_course(&self, id: Uuid) -> Result<String, AppError> {
        self.fetch_text(self.delete(&format!("/api/course/{id}"))).await
    }

    /// Request enrollment in a course.
    pub async fn join_course(&self, id: Uuid) -> Result<String, AppError> {
        self.fetch_text(self.post(&format!("/api/course/invite/{id}"))).await
    }

    /// Make `id` the active course, then refresh so the next token carries
    /// the new `courseId` and relation claims.
    #[tracing::instrument(skip(self))]
    pub async fn select_course(&self, id: Uuid) -> Result<TokenResponse, AppError> {
        self.fetch_empty(
            self.post("/api/course/select")
                .json(&SelectCourseRequest { id }),
        )
        .await?;
        self.refresh_session().await
    }

    pub async fn course_students(&self) -> Result<Vec<CourseStudent>, AppError> {
        self.fetch_json(self.get("/api/course/students")).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn approve_student(&self, relation_id: Uuid) -> Result<String, AppError> {
        self.fetch_text(self.post(&format!("/api/course/students/{relation_id}/approve")))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_student(&self, relation_id: Uuid) -> Result<String, AppError> {
        self.fetch_text(self.delete(&format!("/api/course/students/{relation_id}")))
            .await
    }
}
