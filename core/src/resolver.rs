//! Turns one transport outcome into a typed result.
//!
//! # Design
//! `resolve` is synchronous and pure: the same outcome always resolves to the
//! same value. Every invocation style in `client` funnels its outcome through
//! here, so status handling and decoding behave identically regardless of how
//! the request was scheduled.

use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::diagnostic;
use crate::error::RequestError;
use crate::http::{Outcome, RawResponse};
use crate::status;

/// Separates the decode error from the rendered body in `InvalidJson` details.
pub const BODY_MARKER: &str = " -- response body: ";

/// Resolve an outcome into `T` or the error it represents.
///
/// Error statuses short-circuit before decoding, so a 4xx/5xx body is never
/// decoded even when it would match `T`.
pub fn resolve<T, C>(codec: &C, outcome: Outcome) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    C: Codec,
{
    let response = match outcome {
        Outcome::Completed(response) => response,
        Outcome::Failed(err) => return Err(RequestError::Unknown(err.to_string())),
    };
    resolve_response(codec, &response)
}

pub fn resolve_response<T, C>(codec: &C, response: &RawResponse) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    C: Codec,
{
    let rendered = diagnostic::describe_payload(codec, &response.payload);
    if let Some(err) = status::classify(response.status, &rendered) {
        return Err(err);
    }
    codec
        .decode(&response.payload)
        .map_err(|e| RequestError::InvalidJson(format!("{e}{BODY_MARKER}{rendered}")))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::codec::JsonCodec;
    use crate::error::TransportError;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    fn completed(status: u16, payload: &str) -> Outcome {
        Outcome::Completed(RawResponse::new(status, payload))
    }

    #[test]
    fn success_decodes_target_type() {
        let item: Item = resolve(&JsonCodec, completed(200, r#"{"id":1,"name":"a"}"#)).unwrap();
        assert_eq!(item, Item { id: 1, name: "a".to_string() });
    }

    #[test]
    fn every_2xx_decodes_or_reports_invalid_json() {
        for status in 200..=299 {
            let ok: Result<Item, _> = resolve(&JsonCodec, completed(status, r#"{"id":2,"name":"b"}"#));
            assert!(ok.is_ok(), "{status}");
            let bad: Result<Item, _> = resolve(&JsonCodec, completed(status, r#"{"id":2}"#));
            assert!(matches!(bad, Err(RequestError::InvalidJson(_))), "{status}");
        }
    }

    #[test]
    fn not_found_is_bad_request_with_pretty_body() {
        let err = resolve::<Item, _>(&JsonCodec, completed(404, r#"{"msg":"not found"}"#)).unwrap_err();
        assert_eq!(
            err,
            RequestError::BadRequest("404 error response. {\n  \"msg\": \"not found\"\n}".to_string())
        );
    }

    #[test]
    fn error_status_never_decodes_even_a_valid_body() {
        let body = r#"{"id":1,"name":"a"}"#;
        for status in std::iter::once(400).chain(402..=499) {
            let err = resolve::<Item, _>(&JsonCodec, completed(status, body)).unwrap_err();
            assert!(matches!(err, RequestError::BadRequest(_)), "{status}");
        }
        for status in 500..=599 {
            let err = resolve::<Item, _>(&JsonCodec, completed(status, body)).unwrap_err();
            assert!(matches!(err, RequestError::ServerError(_)), "{status}");
        }
    }

    #[test]
    fn unauthorized_with_empty_body() {
        let err = resolve::<Item, _>(&JsonCodec, completed(401, "")).unwrap_err();
        assert_eq!(err, RequestError::Unauthorized("401 error response. ".to_string()));
    }

    #[test]
    fn statuses_outside_known_bands_are_unknown() {
        for status in [100, 302, 304, 600] {
            let err = resolve::<Item, _>(&JsonCodec, completed(status, "{}")).unwrap_err();
            assert!(matches!(err, RequestError::Unknown(_)), "{status}");
        }
    }

    #[test]
    fn invalid_json_carries_decode_error_and_raw_text() {
        let err = resolve::<Item, _>(&JsonCodec, completed(200, "not json")).unwrap_err();
        let RequestError::InvalidJson(detail) = &err else {
            panic!("expected InvalidJson, got {err:?}");
        };
        assert!(detail.starts_with("syntax error at line 1"), "{detail}");
        assert!(detail.ends_with(&format!("{BODY_MARKER}not json")), "{detail}");
    }

    #[test]
    fn empty_success_body_is_invalid_json() {
        let err = resolve::<Item, _>(&JsonCodec, completed(200, "")).unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));
    }

    #[test]
    fn null_success_body_decodes_into_option() {
        let value: Option<Item> = resolve(&JsonCodec, completed(200, "null")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn binary_error_body_uses_placeholder() {
        let outcome = Outcome::Completed(RawResponse::new(500, vec![0xff, 0xfe]));
        let err = resolve::<Item, _>(&JsonCodec, outcome).unwrap_err();
        assert_eq!(
            err.detail(),
            format!("500 error response. {}", diagnostic::PLACEHOLDER)
        );
    }

    #[test]
    fn transport_failure_is_unknown() {
        let outcome = Outcome::Failed(TransportError::timeout("timed out after 1s"));
        let err = resolve::<Item, _>(&JsonCodec, outcome).unwrap_err();
        assert_eq!(err, RequestError::Unknown("timed out after 1s".to_string()));
    }

    #[test]
    fn resolution_is_repeatable() {
        let cases = [
            completed(200, r#"{"id":1,"name":"a"}"#),
            completed(200, "not json"),
            completed(401, ""),
            completed(404, r#"{"msg":"not found"}"#),
            completed(503, "down"),
            completed(302, ""),
        ];
        for outcome in cases {
            let first = resolve::<serde_json::Value, _>(&JsonCodec, outcome.clone());
            let second = resolve::<serde_json::Value, _>(&JsonCodec, outcome);
            assert_eq!(first, second);
        }
    }
}
