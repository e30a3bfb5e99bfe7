use shared_types::{
    AppError, LoginRequest, SignUpRequest, TokenRefreshRequest, TokenResponse,
    UpdateProfileRequest, UserResponse,
};

use super::ApiClient;

impl ApiClient {
    /// Password login. The token is stored before returning.
    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens: TokenResponse = self.fetch_json(self.post("/auth/login").json(&body)).await?;
        self.session.store_login_token(&tokens);
        Ok(tokens)
    }

    /// Trade the stored refresh token for a new pair and store it.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<TokenResponse, AppError> {
        let refresh_token = self
            .session
            .refresh_token()
            .ok_or_else(|| AppError::unauthorized("No refresh token stored. Please sign in again."))?;
        let body = TokenRefreshRequest { refresh_token };
        let tokens: TokenResponse = self
            .fetch_json(self.post("/api/token/refresh").json(&body))
            .await?;
        self.session.store_refreshed(&tokens);
        Ok(tokens)
    }

    /// Tell the backend, then forget the session regardless of the outcome.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.fetch_empty(self.post("/api/user/logout")).await {
            tracing::warn!(error = %e, "server logout failed, clearing local session anyway");
        }
        self.session.clear();
    }

    /// Backend URL that starts the OAuth flow for `provider`. The backend
    /// sends the browser back to the stored `redirect_uri` with the tokens.
    pub fn oauth_authorize_url(&self, provider: &str) -> String {
        self.url(&format!("/oauth2/authorize/{provider}"))
    }

    #[tracing::instrument(skip_all, fields(email = %request.email))]
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<UserResponse, AppError> {
        self.fetch_json(self.post("/api/user").json(request)).await
    }

    pub async fn me(&self) -> Result<UserResponse, AppError> {
        self.fetch_json(self.get("/api/me")).await
    }

    pub async fn update_me(&self, request: &UpdateProfileRequest) -> Result<UserResponse, AppError> {
        self.fetch_json(self.put("/api/me").json(request)).await
    }
}
