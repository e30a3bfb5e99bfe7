use cookie::time::OffsetDateTime;
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use shared_types::{
    SessionClaims, SessionConfig, TokenResponse, ACCESS_TOKEN_COOKIE, LOCAL_ACCESS_TOKEN_KEY,
    LOCAL_TOKEN_KEY, REFRESH_TOKEN_COOKIE,
};

use super::{cookies, jwt};

/// Client-side session storage: a cookie jar plus a string key/value store,
/// the two places the backend's tokens end up.
///
/// Implementations swallow their own I/O failures; storage never errors.
pub trait TokenStore: Send + Sync {
    fn cookie(&self, name: &str) -> Option<String>;
    fn set_cookie(&self, cookie: Cookie<'static>);
    fn remove_cookie(&self, name: &str);
    fn local(&self, key: &str) -> Option<String>;
    fn set_local(&self, key: &str, value: &str);
    fn remove_local(&self, key: &str);
    /// `Cookie` request header for every live cookie in the jar.
    fn cookie_header(&self) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Jar
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
struct Jar {
    cookies: BTreeMap<String, Cookie<'static>>,
    local: BTreeMap<String, String>,
}

/// On-disk form: cookies as `Set-Cookie` lines so every attribute survives.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedJar {
    #[serde(default)]
    cookies: Vec<String>,
    #[serde(default)]
    local: BTreeMap<String, String>,
}

impl Jar {
    fn cookie(&mut self, name: &str, now: OffsetDateTime) -> Option<String> {
        let expired = cookies::cookie_expired(self.cookies.get(name)?, now);
        if expired {
            self.cookies.remove(name);
            return None;
        }
        self.cookies.get(name).map(|c| c.value().to_string())
    }

    fn set_cookie(&mut self, cookie: Cookie<'static>, now: OffsetDateTime) {
        let name = cookie.name().to_string();
        if cookies::cookie_expired(&cookie, now) {
            self.cookies.remove(&name);
        } else {
            self.cookies.insert(name, cookies::with_absolute_expiry(cookie, now));
        }
    }

    fn purge_expired(&mut self, now: OffsetDateTime) {
        self.cookies.retain(|_, c| !cookies::cookie_expired(c, now));
    }

    fn cookie_header(&mut self, now: OffsetDateTime) -> Option<String> {
        self.purge_expired(now);
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .values()
            .map(|c| c.stripped().encoded().to_string())
            .collect();
        Some(pairs.join("; "))
    }

    fn to_persisted(&self) -> PersistedJar {
        PersistedJar {
            cookies: self
                .cookies
                .values()
                .map(|c| c.encoded().to_string())
                .collect(),
            local: self.local.clone(),
        }
    }

    fn from_persisted(persisted: PersistedJar, now: OffsetDateTime) -> Self {
        let mut jar = Jar {
            cookies: BTreeMap::new(),
            local: persisted.local,
        };
        for line in persisted.cookies {
            match Cookie::parse_encoded(line) {
                Ok(cookie) => jar.set_cookie(cookie, now),
                Err(e) => tracing::warn!(error = %e, "dropping unreadable stored cookie"),
            }
        }
        jar
    }
}

fn lock(jar: &Mutex<Jar>) -> MutexGuard<'_, Jar> {
    jar.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    jar: Mutex<Jar>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn cookie(&self, name: &str) -> Option<String> {
        lock(&self.jar).cookie(name, OffsetDateTime::now_utc())
    }

    fn set_cookie(&self, cookie: Cookie<'static>) {
        lock(&self.jar).set_cookie(cookie, OffsetDateTime::now_utc());
    }

    fn remove_cookie(&self, name: &str) {
        lock(&self.jar).cookies.remove(name);
    }

    fn local(&self, key: &str) -> Option<String> {
        lock(&self.jar).local.get(key).cloned()
    }

    fn set_local(&self, key: &str, value: &str) {
        lock(&self.jar).local.insert(key.to_string(), value.to_string());
    }

    fn remove_local(&self, key: &str) {
        lock(&self.jar).local.remove(key);
    }

    fn cookie_header(&self) -> Option<String> {
        lock(&self.jar).cookie_header(OffsetDateTime::now_utc())
    }
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// Store persisted to a JSON file after every change.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    jar: Mutex<Jar>,
}

impl FileTokenStore {
    /// Open (or lazily create) the store at `path`. Unreadable files start empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let jar = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<PersistedJar>(&contents) {
                Ok(persisted) => Jar::from_persisted(persisted, OffsetDateTime::now_utc()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "session file unreadable, starting empty");
                    Jar::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Jar::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read session file");
                Jar::default()
            }
        };
        Self {
            path,
            jar: Mutex::new(jar),
        }
    }

    fn persist(&self, jar: &Jar) {
        let body = match serde_json::to_string_pretty(&jar.to_persisted()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize session");
                return;
            }
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "failed to create session directory");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, body) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut Jar)) {
        let mut jar = lock(&self.jar);
        f(&mut jar);
        self.persist(&jar);
    }
}

impl TokenStore for FileTokenStore {
    fn cookie(&self, name: &str) -> Option<String> {
        lock(&self.jar).cookie(name, OffsetDateTime::now_utc())
    }

    fn set_cookie(&self, cookie: Cookie<'static>) {
        self.mutate(|jar| jar.set_cookie(cookie, OffsetDateTime::now_utc()));
    }

    fn remove_cookie(&self, name: &str) {
        self.mutate(|jar| {
            jar.cookies.remove(name);
        });
    }

    fn local(&self, key: &str) -> Option<String> {
        lock(&self.jar).local.get(key).cloned()
    }

    fn set_local(&self, key: &str, value: &str) {
        self.mutate(|jar| {
            jar.local.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_local(&self, key: &str) {
        self.mutate(|jar| {
            jar.local.remove(key);
        });
    }

    fn cookie_header(&self) -> Option<String> {
        lock(&self.jar).cookie_header(OffsetDateTime::now_utc())
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Cookie lifetimes and flags applied when tokens are written.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieSettings {
    pub access_days: i64,
    pub refresh_days: i64,
    pub redirect_uri: String,
    pub secure: bool,
}

impl From<&SessionConfig> for CookieSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            access_days: config.access_cookie_days,
            refresh_days: config.refresh_cookie_days,
            redirect_uri: config.oauth_redirect_uri.clone(),
            secure: config.secure_cookies,
        }
    }
}

/// Shared handle over the token store. Every reader of the session goes
/// through here so they all agree on which token is current.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<dyn TokenStore>,
    settings: CookieSettings,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("settings", &self.settings)
            .field("has_access_token", &self.access_token().is_some())
            .finish()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn TokenStore>, config: &SessionConfig) -> Self {
        Self {
            inner: store,
            settings: CookieSettings::from(config),
        }
    }

    /// Memory-backed session with default cookie settings.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()), &SessionConfig::default())
    }

    /// File-backed when `store_path` is set, memory-backed otherwise.
    pub fn from_config(config: &SessionConfig) -> Self {
        let store: Arc<dyn TokenStore> = if config.store_path.trim().is_empty() {
            Arc::new(MemoryTokenStore::new())
        } else {
            Arc::new(FileTokenStore::open(config.store_path.trim()))
        };
        Self::new(store, config)
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner
    }

    pub fn settings(&self) -> &CookieSettings {
        &self.settings
    }

    /// Current access token: the `accessToken` cookie, then local `token`,
    /// then local `accessToken`. Empty values are skipped.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .cookie(ACCESS_TOKEN_COOKIE)
            .filter(|t| !t.is_empty())
            .or_else(|| self.inner.local(LOCAL_TOKEN_KEY).filter(|t| !t.is_empty()))
            .or_else(|| self.inner.local(LOCAL_ACCESS_TOKEN_KEY).filter(|t| !t.is_empty()))
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .cookie(REFRESH_TOKEN_COOKIE)
            .filter(|t| !t.is_empty())
    }

    /// Decoded claims of the current access token, if it is readable.
    pub fn claims(&self) -> Option<SessionClaims> {
        self.access_token()
            .and_then(|token| jwt::decode_claims(&token).ok())
    }

    /// Tokens handed over by the OAuth redirect. Returns whether a refresh
    /// token was stored; an empty one is ignored.
    pub fn store_callback_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> bool {
        let s = &self.settings;
        self.inner
            .set_cookie(cookies::build_access_cookie(access_token, s.access_days, s.secure));
        let refresh = refresh_token.filter(|r| !r.is_empty());
        if let Some(refresh) = refresh {
            self.inner
                .set_cookie(cookies::build_refresh_cookie(refresh, s.refresh_days, s.secure));
        }
        tracing::info!(with_refresh = refresh.is_some(), "session stored from sign-in callback");
        refresh.is_some()
    }

    /// Token returned by the password login form.
    pub fn store_login_token(&self, response: &TokenResponse) {
        let s = &self.settings;
        self.inner.set_local(LOCAL_TOKEN_KEY, &response.access_token);
        self.inner.set_cookie(cookies::build_access_cookie(
            &response.access_token,
            s.access_days,
            s.secure,
        ));
        if let Some(refresh) = response.refresh_token.as_deref().filter(|r| !r.is_empty()) {
            self.inner
                .set_cookie(cookies::build_refresh_cookie(refresh, s.refresh_days, s.secure));
        }
        tracing::info!("session stored from password login");
    }

    /// New token pair from the refresh endpoint.
    ///
    /// Also overwrites the local copy so an older login token can't shadow
    /// the refreshed one once the cookie expires.
    pub fn store_refreshed(&self, response: &TokenResponse) {
        let s = &self.settings;
        self.inner.set_cookie(cookies::build_access_cookie(
            &response.access_token,
            s.access_days,
            s.secure,
        ));
        if self.inner.local(LOCAL_TOKEN_KEY).is_some() {
            self.inner.set_local(LOCAL_TOKEN_KEY, &response.access_token);
        }
        if let Some(refresh) = response.refresh_token.as_deref().filter(|r| !r.is_empty()) {
            self.inner
                .set_cookie(cookies::build_refresh_cookie(refresh, s.refresh_days, s.secure));
        }
        tracing::info!("session refreshed");
    }

    /// Remember where the OAuth provider should send the user back to.
    pub fn store_redirect_uri(&self) {
        let s = &self.settings;
        self.inner
            .set_cookie(cookies::build_redirect_cookie(&s.redirect_uri, s.secure));
    }

    /// Forget both cookies and both local copies.
    pub fn clear(&self) {
        self.inner
            .set_cookie(cookies::build_removal_cookie(ACCESS_TOKEN_COOKIE));
        self.inner
            .set_cookie(cookies::build_removal_cookie(REFRESH_TOKEN_COOKIE));
        self.inner.remove_local(LOCAL_TOKEN_KEY);
        self.inner.remove_local(LOCAL_ACCESS_TOKEN_KEY);
        tracing::info!("session cleared");
    }

    pub fn cookie_header(&self) -> Option<String> {
        self.inner.cookie_header()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::REDIRECT_URI_COOKIE;

    fn token_response(access: &str, refresh: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            grant_type: Some("Bearer".to_string()),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("swm-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn resolution_order_cookie_then_local_token_then_local_access_token() {
        let session = SessionStore::in_memory();
        assert_eq!(session.access_token(), None);

        session.store().set_local(LOCAL_ACCESS_TOKEN_KEY, "legacy");
        assert_eq!(session.access_token().as_deref(), Some("legacy"));

        session.store().set_local(LOCAL_TOKEN_KEY, "login");
        assert_eq!(session.access_token().as_deref(), Some("login"));

        session.store_callback_tokens("cookie", None);
        assert_eq!(session.access_token().as_deref(), Some("cookie"));
    }

    #[test]
    fn empty_values_are_skipped() {
        let session = SessionStore::in_memory();
        session.store().set_local(LOCAL_TOKEN_KEY, "");
        session.store().set_local(LOCAL_ACCESS_TOKEN_KEY, "legacy");
        assert_eq!(session.access_token().as_deref(), Some("legacy"));
    }

    #[test]
    fn callback_without_refresh_keeps_old_refresh() {
        let session = SessionStore::in_memory();
        session.store_callback_tokens("a1", Some("r1"));
        session.store_callback_tokens("a2", None);
        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn empty_callback_refresh_token_is_not_stored() {
        let session = SessionStore::in_memory();
        assert!(!session.store_callback_tokens("a", Some("")));
        assert_eq!(session.refresh_token(), None);
        assert!(session.store_callback_tokens("a", Some("r")));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn refresh_overwrites_local_login_copy() {
        let session = SessionStore::in_memory();
        session.store_login_token(&token_response("old", None));
        session.store_refreshed(&token_response("new", Some("r2")));
        assert_eq!(session.store().local(LOCAL_TOKEN_KEY).as_deref(), Some("new"));
        assert_eq!(session.refresh_token().as_deref(), Some("r2"));
    }

    #[test]
    fn clear_removes_every_copy() {
        let session = SessionStore::in_memory();
        session.store_callback_tokens("a", Some("r"));
        session.store().set_local(LOCAL_TOKEN_KEY, "t");
        session.store().set_local(LOCAL_ACCESS_TOKEN_KEY, "t2");
        session.clear();
        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
        assert_eq!(session.cookie_header(), None);
    }

    #[test]
    fn cookie_header_lists_live_cookies() {
        let session = SessionStore::in_memory();
        session.store_callback_tokens("a.b.c", Some("r"));
        session.store_redirect_uri();
        let header = session.cookie_header().unwrap();
        assert!(header.contains("accessToken=a.b.c"));
        assert!(header.contains("refreshToken=r"));
        assert!(header.contains(REDIRECT_URI_COOKIE));
        assert!(!header.contains("Path"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        {
            let store = FileTokenStore::open(&path);
            store.set_cookie(cookies::build_access_cookie("persisted", 7, false));
            store.set_local(LOCAL_TOKEN_KEY, "local-copy");
        }
        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.cookie(ACCESS_TOKEN_COOKIE).as_deref(), Some("persisted"));
        assert_eq!(reopened.local(LOCAL_TOKEN_KEY).as_deref(), Some("local-copy"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_store_drops_expired_cookies_on_read() {
        let path = temp_path("expired");
        std::fs::write(
            &path,
            r#"{"cookies":["accessToken=old; Path=/; Expires=Thu, 01 Jan 2015 00:00:00 GMT","refreshToken=keep"],"local":{}}"#,
        )
        .unwrap();
        let store = FileTokenStore::open(&path);
        assert_eq!(store.cookie(ACCESS_TOKEN_COOKIE), None);
        assert_eq!(store.cookie(REFRESH_TOKEN_COOKIE).as_deref(), Some("keep"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileTokenStore::open(&path);
        assert_eq!(store.cookie(ACCESS_TOKEN_COOKIE), None);
        let _ = std::fs::remove_file(&path);
    }
}
