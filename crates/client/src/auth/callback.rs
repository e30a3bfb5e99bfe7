use super::SessionStore;
use crate::nav;

/// Tokens carried on the sign-in redirect (`/token?token=..&refreshToken=..`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Parse the callback query string. A leading `?` is optional; `+` reads as a
/// space and values are percent-decoded. Empty values count as absent.
pub fn parse_callback_query(query: &str) -> CallbackTokens {
    let mut tokens = CallbackTokens::default();
    for pair in query.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.replace('+', " ");
        let value = match urlencoding::decode(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => continue,
        };
        if value.is_empty() {
            continue;
        }
        match key {
            "token" if tokens.access_token.is_none() => tokens.access_token = Some(value),
            "refreshToken" if tokens.refresh_token.is_none() => tokens.refresh_token = Some(value),
            _ => {}
        }
    }
    tokens
}

/// Store whatever the redirect carried and return where to go next,
/// which is always the lecture page.
pub fn handle_callback(session: &SessionStore, query: &str) -> &'static str {
    let tokens = parse_callback_query(query);
    match tokens.access_token.as_deref() {
        Some(access) => {
            session.store_callback_tokens(access, tokens.refresh_token.as_deref());
        }
        None => tracing::warn!("sign-in callback carried no token"),
    }
    nav::LANDING_PATH
}
