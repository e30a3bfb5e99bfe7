use chrono::{DateTime, Utc};
use shared_types::CourseSelection;

use super::{jwt, SessionStore};
use crate::nav;

/// What a protected view should do before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// No usable session: go to the sign-in page.
    Login,
    /// Signed in but the token says no course is selected yet.
    SelectCourse,
}

impl GateDecision {
    /// Redirect target, if any.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GateDecision::Proceed => None,
            GateDecision::Login => Some(nav::LOGIN_PATH),
            GateDecision::SelectCourse => Some(nav::COURSE_SELECT_PATH),
        }
    }
}

/// Decide for the token currently in the session.
pub fn evaluate(session: &SessionStore, now: DateTime<Utc>, path: &str) -> GateDecision {
    let token = session.access_token();
    let decision = evaluate_token(token.as_deref(), now, path);
    if decision != GateDecision::Proceed {
        tracing::debug!(path, ?decision, "route gated");
    }
    decision
}

pub fn evaluate_token(token: Option<&str>, now: DateTime<Utc>, path: &str) -> GateDecision {
    if nav::is_public_path(path) {
        return GateDecision::Proceed;
    }
    let claims = match token.map(jwt::decode_claims) {
        Some(Ok(claims)) => claims,
        _ => return GateDecision::Login,
    };
    if claims.is_expired_at(now.timestamp_millis()) {
        return GateDecision::Login;
    }
    if claims.course_selection() == CourseSelection::Unselected
        && nav::path_only(path) != nav::COURSE_SELECT_PATH
    {
        return GateDecision::SelectCourse;
    }
    GateDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    fn mint(claims: Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap()
    }

    fn future_exp() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    #[test]
    fn missing_token_goes_to_login() {
        assert_eq!(evaluate_token(None, Utc::now(), "/lecture"), GateDecision::Login);
        assert_eq!(
            GateDecision::Login.redirect_path(),
            Some("/authentication/sign-in")
        );
    }

    #[test]
    fn expired_token_goes_to_login() {
        let token = mint(json!({ "exp": (Utc::now() - Duration::seconds(5)).timestamp(), "courseId": "c" }));
        assert_eq!(
            evaluate_token(Some(&token), Utc::now(), "/lecture"),
            GateDecision::Login
        );
    }

    #[test]
    fn undecodable_token_goes_to_login() {
        assert_eq!(
            evaluate_token(Some("x.y.z"), Utc::now(), "/lecture"),
            GateDecision::Login
        );
    }

    #[test]
    fn valid_token_proceeds() {
        let token = mint(json!({ "exp": future_exp(), "courseId": "c-1" }));
        assert_eq!(
            evaluate_token(Some(&token), Utc::now(), "/lecture"),
            GateDecision::Proceed
        );
    }

    #[test]
    fn null_course_redirects_except_on_course_page() {
        let token = mint(json!({ "exp": future_exp(), "courseId": null }));
        assert_eq!(
            evaluate_token(Some(&token), Utc::now(), "/lecture"),
            GateDecision::SelectCourse
        );
        assert_eq!(
            evaluate_token(Some(&token), Utc::now(), "/course"),
            GateDecision::Proceed
        );
    }

    #[test]
    fn absent_course_claim_does_not_redirect() {
        let token = mint(json!({ "exp": future_exp() }));
        assert_eq!(
            evaluate_token(Some(&token), Utc::now(), "/question-problems"),
            GateDecision::Proceed
        );
    }

    #[test]
    fn public_paths_are_never_gated() {
        for path in ["/authentication/sign-in", "/authentication/sign-up", "/token?token=a"] {
            assert_eq!(evaluate_token(None, Utc::now(), path), GateDecision::Proceed);
        }
    }

    #[test]
    fn evaluate_reads_session() {
        let session = SessionStore::in_memory();
        assert_eq!(evaluate(&session, Utc::now(), "/lecture"), GateDecision::Login);
        session.store_callback_tokens(&mint(json!({ "exp": future_exp(), "courseId": "c" })), None);
        assert_eq!(evaluate(&session, Utc::now(), "/lecture"), GateDecision::Proceed);
    }
}
