use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};

use shared_types::{ACCESS_TOKEN_COOKIE, REDIRECT_URI_COOKIE, REFRESH_TOKEN_COOKIE};

const SECONDS_PER_DAY: i64 = 86_400;

fn session_cookie(name: &'static str, value: String, days: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(days * SECONDS_PER_DAY))
        .secure(secure)
        .build()
}

/// Cookie holding the access token.
pub fn build_access_cookie(token: &str, days: i64, secure: bool) -> Cookie<'static> {
    session_cookie(ACCESS_TOKEN_COOKIE, token.to_string(), days, secure)
}

/// Cookie holding the refresh token.
pub fn build_refresh_cookie(token: &str, days: i64, secure: bool) -> Cookie<'static> {
    session_cookie(REFRESH_TOKEN_COOKIE, token.to_string(), days, secure)
}

/// Address the OAuth provider should send the user back to. Kept for one day.
pub fn build_redirect_cookie(uri: &str, secure: bool) -> Cookie<'static> {
    session_cookie(REDIRECT_URI_COOKIE, uri.to_string(), 1, secure)
}

/// A cookie that deletes `name` when stored.
pub fn build_removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Parse a `name=value; other=value` cookie header and return one value.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|piece| Cookie::parse_encoded(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Pin a relative `Max-Age` to an absolute `Expires` so the cookie can be
/// persisted and still expire at the right moment.
pub fn with_absolute_expiry(mut cookie: Cookie<'static>, now: OffsetDateTime) -> Cookie<'static> {
    if cookie.expires_datetime().is_none() {
        if let Some(max_age) = cookie.max_age() {
            cookie.set_expires(now + max_age);
        }
    }
    cookie
}

/// A cookie is expired when `Max-Age` is zero or negative, or `Expires` is
/// not in the future. Cookies with neither attribute never expire.
pub fn cookie_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    if let Some(max_age) = cookie.max_age() {
        if max_age <= Duration::ZERO {
            return true;
        }
    }
    match cookie.expires_datetime() {
        Some(expires) => expires <= now,
        None => false,
    }
}
