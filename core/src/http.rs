//! Request descriptors and the wire-level types that cross the transport.
//!
//! # Design
//! `Request` is what callers build: an unvalidated URL string, a method,
//! headers and an optional JSON body. It has no `&mut` API, so once built it
//! cannot change. The client turns it into an `HttpRequest` (parsed URL,
//! encoded body, effective timeout) that a `Transport` executes, and the
//! transport hands back an `Outcome`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::{RequestError, TransportError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An outbound request as described by the caller.
///
/// Built with `Request::get` and friends, then refined with the consuming
/// `with_*` methods:
///
/// ```
/// use std::time::Duration;
/// use fetchkit_core::Request;
///
/// let request = Request::get("https://example.com/items/1")
///     .with_header("accept", "application/json")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(request.url(), "https://example.com/items/1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    url: String,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
    timeout: Option<Duration>,
}

impl Request {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Put)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Delete)
    }

    /// Add a header. Keys are case-sensitive; a repeated key replaces the
    /// earlier value.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach a body. The descriptor always holds it as a JSON value, so the
    /// client's `Codec` encodes that value rather than `body` itself; a value
    /// that has no JSON form is reported here, before anything is sent.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body)
            .map_err(|e| RequestError::UnableToParseData(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Override the client's default timeout for this request. A zero
    /// duration leaves the default in place.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// A validated request ready for a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

/// A completed HTTP exchange. `payload` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub payload: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            payload: payload.into(),
        }
    }
}

/// What the transport produced for one request: a completed exchange or a
/// failure below HTTP, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RawResponse),
    Failed(TransportError),
}

impl From<Result<RawResponse, TransportError>> for Outcome {
    fn from(result: Result<RawResponse, TransportError>) -> Self {
        match result {
            Ok(response) => Outcome::Completed(response),
            Err(err) => Outcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_wire_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn shorthand_constructors_set_method() {
        assert_eq!(Request::get("u").method(), HttpMethod::Get);
        assert_eq!(Request::post("u").method(), HttpMethod::Post);
        assert_eq!(Request::put("u").method(), HttpMethod::Put);
        assert_eq!(Request::delete("u").method(), HttpMethod::Delete);
    }

    #[test]
    fn headers_are_case_sensitive_and_last_write_wins() {
        let req = Request::get("http://localhost")
            .with_header("X-Trace", "a")
            .with_header("x-trace", "b")
            .with_header("X-Trace", "c");
        assert_eq!(req.headers().len(), 2);
        assert_eq!(req.headers()["X-Trace"], "c");
        assert_eq!(req.headers()["x-trace"], "b");
    }

    #[test]
    fn body_is_captured_as_json_value() {
        #[derive(Serialize)]
        struct Payload {
            title: &'static str,
        }
        let req = Request::post("http://localhost")
            .with_body(&Payload { title: "Buy milk" })
            .unwrap();
        assert_eq!(req.body().unwrap()["title"], "Buy milk");
    }

    #[test]
    fn unencodable_body_is_unable_to_parse_data() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], "non-string key");
        let err = Request::post("http://localhost").with_body(&map).unwrap_err();
        assert!(matches!(err, RequestError::UnableToParseData(_)));
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let req = Request::get("http://localhost").with_timeout(Duration::ZERO);
        assert_eq!(req.timeout(), None);
        let req = req.with_timeout(Duration::from_secs(3));
        assert_eq!(req.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn outcome_from_result() {
        let ok: Outcome = Ok(RawResponse::new(200, "{}")).into();
        assert_eq!(ok, Outcome::Completed(RawResponse::new(200, b"{}".to_vec())));
        let failed: Outcome = Err(TransportError::new("refused")).into();
        assert!(matches!(failed, Outcome::Failed(_)));
    }
}
