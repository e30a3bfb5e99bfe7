//! Typed client for the study platform's REST backend.
//!
//! Every request carries the current access token as a bearer header and the
//! cookie jar as a `Cookie` header, both read from the [`SessionStore`] at
//! send time so a refreshed token is picked up immediately.

mod auth;
mod courses;
mod lectures;
mod materials;
mod questions;
mod submissions;

use std::time::Duration;

use cookie::Cookie;
use reqwest::header::{HeaderMap, AUTHORIZATION, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{ApiConfig, AppError};

use crate::auth::SessionStore;
use crate::error_convert::{JsonErrorExt, ReqwestErrorExt};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.session == other.session
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| e.into_app_error())?;
        Ok(Self::with_http(http, &config.base_url, session))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, session: SessionStore) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.access_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookies) = self.session.cookie_header() {
            builder = builder.header(COOKIE, cookies);
        }
        builder
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send, keep any cookies the server sets, and turn non-2xx into errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let request = builder.build().map_err(|e| e.into_app_error())?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| {
                tracing::error!(%method, %path, error = %e, "request failed");
                e.into_app_error()
            })?;

        self.absorb_cookies(response.headers());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AppError::from_status(status.as_u16(), &body);
            if err.is_auth_failure() {
                tracing::warn!(%method, %path, "request rejected, session no longer accepted");
            } else {
                tracing::error!(%method, %path, status = status.as_u16(), error = %err, "request returned error status");
            }
            return Err(err);
        }
        tracing::debug!(%method, %path, status = status.as_u16(), "request completed");
        Ok(response)
    }

    fn absorb_cookies(&self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            match Cookie::parse_encoded(raw.to_string()) {
                Ok(cookie) => self.session.store().set_cookie(cookie),
                Err(e) => tracing::warn!(error = %e, "ignoring malformed Set-Cookie"),
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let bytes = self
            .send(builder)
            .await?
            .bytes()
            .await
            .map_err(|e| e.into_app_error())?;
        serde_json::from_slice(&bytes).map_err(|e| e.into_app_error())
    }

    /// Like `fetch_json` but an empty 2xx body reads as `None`.
    async fn fetch_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, AppError> {
        let bytes = self
            .send(builder)
            .await?
            .bytes()
            .await
            .map_err(|e| e.into_app_error())?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| e.into_app_error())
    }

    /// For endpoints that answer with a plain-text confirmation.
    async fn fetch_text(&self, builder: RequestBuilder) -> Result<String, AppError> {
        self.send(builder)
            .await?
            .text()
            .await
            .map_err(|e| e.into_app_error())
    }

    async fn fetch_empty(&self, builder: RequestBuilder) -> Result<(), AppError> {
        self.send(builder).await.map(|_| ())
    }
}
