use shared_types::{AppError, MaterialKind, UrlInfo, UrlRequest};
use uuid::Uuid;

use super::ApiClient;

impl ApiClient {
    /// Search stored links by kind and keyword; blank filters are omitted.
    pub async fn search_materials(
        &self,
        kind: Option<MaterialKind>,
        keyword: &str,
    ) -> Result<Vec<UrlInfo>, AppError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(kind) = kind {
            query.push(("type", kind.as_str()));
        }
        if !keyword.trim().is_empty() {
            query.push(("keyword", keyword.trim()));
        }
        self.fetch_json(self.get("/api/urls").query(&query)).await
    }

    #[tracing::instrument(skip_all, fields(kind = %request.kind))]
    pub async fn create_material(&self, request: &UrlRequest) -> Result<UrlInfo, AppError> {
        self.fetch_json(self.post("/api/urls").json(request)).await
    }

    pub async fn delete_material(&self, id: Uuid) -> Result<(), AppError> {
        self.fetch_empty(self.delete(&format!("/api/urls/{id}"))).await
    }
}
