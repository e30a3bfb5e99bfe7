use shared_types::AppError;

/// Convert a reqwest::Error into an AppError.
///
/// Status errors keep their HTTP meaning; everything that never produced a
/// response is a network failure.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::decode(format!("Unexpected response from server: {err}"));
    }
    if let Some(status) = err.status() {
        return AppError::from_status(status.as_u16(), "");
    }
    if err.is_timeout() {
        return AppError::network("The server took too long to respond");
    }
    if err.is_builder() {
        return AppError::internal(format!("Invalid request: {err}"));
    }
    AppError::network(format!("Could not reach the server: {err}"))
}

/// Convert a serde_json::Error from a response body into an AppError.
pub fn json_to_app_error(err: serde_json::Error) -> AppError {
    AppError::decode(format!("Unexpected response from server: {err}"))
}

/// Convert a token segment that is not base64url into an AppError.
pub fn base64_to_app_error(err: base64::DecodeError) -> AppError {
    AppError::unauthorized(format!("Unreadable session token: {err}"))
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_app_error()` on serde_json::Error.
pub trait JsonErrorExt {
    fn into_app_error(self) -> AppError;
}

impl JsonErrorExt for serde_json::Error {
    fn into_app_error(self) -> AppError {
        json_to_app_error(self)
    }
}

/// Extension trait providing `.into_app_error()` on base64 errors.
pub trait Base64ErrorExt {
    fn into_app_error(self) -> AppError;
}

impl Base64ErrorExt for base64::DecodeError {
    fn into_app_error(self) -> AppError {
        base64_to_app_error(self)
    }
}
