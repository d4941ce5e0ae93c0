//! HTTP status classification.

use crate::error::RequestError;

pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Map a status code to the error it represents, or `None` for 2xx.
///
/// 401 is checked before the general 4xx band, so it is never reported as
/// `BadRequest`. Anything outside the known bands is `Unknown`.
pub fn classify(status: u16, message: &str) -> Option<RequestError> {
    let detail = format!("{status} error response. {message}");
    match status {
        200..=299 => None,
        401 => Some(RequestError::Unauthorized(detail)),
        400 | 402..=499 => Some(RequestError::BadRequest(detail)),
        500..=599 => Some(RequestError::ServerError(detail)),
        _ => Some(RequestError::Unknown(detail)),
    }
}
