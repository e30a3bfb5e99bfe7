use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
pub const REDIRECT_URI_COOKIE: &str = "redirect_uri";

/// Local-storage key written by the password login form.
pub const LOCAL_TOKEN_KEY: &str = "token";
/// Local-storage key used by older builds of the client.
pub const LOCAL_ACCESS_TOKEN_KEY: &str = "accessToken";

/// Spellings of the manager relation that have been issued over time.
const MANAGER_SPELLINGS: [&str; 4] = ["MANAGES_TYPE", "manages_type", "MANAGES", "manages"];
const CONTAINS_SPELLINGS: [&str; 2] = ["CONTAINS_TYPE", "CONTAINS"];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Relation between a user and the course selected in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "MANAGES_TYPE")]
    Manages,
    #[serde(rename = "CONTAINS_TYPE")]
    Contains,
}

impl RelationType {
    /// Recognize a relation claim in any of its historical spellings.
    /// Matching is on the full Unicode uppercase form of the claim.
    pub fn parse_claim(raw: &str) -> Option<Self> {
        let upper = raw.to_uppercase();
        if MANAGER_SPELLINGS.iter().any(|s| s.to_uppercase() == upper) {
            Some(RelationType::Manages)
        } else if CONTAINS_SPELLINGS.iter().any(|s| s.to_uppercase() == upper) {
            Some(RelationType::Contains)
        } else {
            None
        }
    }
}

/// Platform-wide authority carried in the `rule` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorityType {
    SystemAdmin,
    Admin,
    TeamManager,
    User,
}

impl AuthorityType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "SYSTEM_ADMIN" => Some(AuthorityType::SystemAdmin),
            "ADMIN" => Some(AuthorityType::Admin),
            "TEAM_MANAGER" => Some(AuthorityType::TeamManager),
            "USER" => Some(AuthorityType::User),
            _ => None,
        }
    }
}

/// What the token says about the currently selected course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSelection {
    /// The token carries no `courseId` claim at all.
    Absent,
    /// The claim is present and explicitly `null`.
    Unselected,
    Selected(String),
}

// ---------------------------------------------------------------------------
// Claims view
// ---------------------------------------------------------------------------

/// Read-only view over a decoded (unverified) access token payload.
///
/// Every accessor is total: unexpected claim shapes produce `None`/`false`
/// rather than an error, so a malformed token can never take the UI down.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClaims(Map<String, Value>);

impl SessionClaims {
    /// Wrap a decoded payload. Only JSON objects are accepted.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.0.get(claim)
    }

    /// The relation claim after fallback and unwrapping.
    ///
    /// `relationType` wins when truthy, otherwise the legacy `type` claim.
    /// An object with a truthy `value` field stands for that value.
    pub fn relation_claim(&self) -> Option<&Value> {
        let raw = self
            .0
            .get("relationType")
            .filter(|v| is_truthy(v))
            .or_else(|| self.0.get("type").filter(|v| is_truthy(v)))?;

        if let Value::Object(inner) = raw {
            if let Some(value) = inner.get("value").filter(|v| is_truthy(v)) {
                return Some(value);
            }
        }
        Some(raw)
    }

    pub fn relation(&self) -> Option<RelationType> {
        self.relation_claim()
            .and_then(Value::as_str)
            .and_then(RelationType::parse_claim)
    }

    pub fn is_manager(&self) -> bool {
        self.relation() == Some(RelationType::Manages)
    }

    /// Expiry in seconds since the epoch.
    ///
    /// `None` means the claim is missing or unreadable, which never expires.
    /// An explicit `null` reads as zero.
    pub fn expiry(&self) -> Option<f64> {
        match self.0.get("exp")? {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
                }
            }
            _ => None,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.expiry() {
            Some(exp) => exp * 1000.0 < now_ms as f64,
            None => false,
        }
    }

    pub fn course_selection(&self) -> CourseSelection {
        match self.0.get("courseId") {
            None => CourseSelection::Absent,
            Some(Value::Null) => CourseSelection::Unselected,
            Some(Value::String(id)) => CourseSelection::Selected(id.clone()),
            Some(other) => CourseSelection::Selected(other.to_string()),
        }
    }

    pub fn authority(&self) -> Option<AuthorityType> {
        self.0
            .get("rule")
            .and_then(Value::as_str)
            .and_then(AuthorityType::parse)
    }

    /// Platform admins see the admin entry in the top bar.
    pub fn is_platform_admin(&self) -> bool {
        matches!(
            self.authority(),
            Some(AuthorityType::Admin) | Some(AuthorityType::SystemAdmin)
        )
    }
}

/// Truthiness as the browser client evaluated claims.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Auth DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by the password login and the token refresh endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub grant_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshRequest {
    pub refresh_token: String,
}

/// Body for `POST /api/user`. Self-registered accounts are always local users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub authority: AuthorityType,
    pub provider: String,
}

impl SignUpRequest {
    pub fn local(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            password: password.into(),
            authority: AuthorityType::User,
            provider: "local".to_string(),
        }
    }
}
