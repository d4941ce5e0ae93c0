//! Body encoding and decoding.
//!
//! # Design
//! The resolver and client only talk to a `Codec`, so a test or an
//! alternative wire format can stand in for JSON without touching the
//! resolution logic. `JsonCodec` is the default and only shipped codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::diagnostic;
use crate::error::{DecodeCategory, DecodeError, RequestError};

pub trait Codec: Send + Sync {
    /// Encode a request body.
    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Vec<u8>, RequestError>;

    /// Decode a response payload into `T`.
    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, DecodeError>;

    /// Pretty-print a payload for diagnostics, if the codec understands it.
    fn pretty(&self, payload: &[u8]) -> Option<String>;

    /// Value sent as `content-type` alongside an encoded body.
    fn content_type(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Vec<u8>, RequestError> {
        serde_json::to_vec(body).map_err(|e| RequestError::UnableToParseData(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, DecodeError> {
        serde_json::from_slice(payload).map_err(|e| DecodeError {
            category: match e.classify() {
                serde_json::error::Category::Eof => DecodeCategory::Eof,
                serde_json::error::Category::Syntax => DecodeCategory::Syntax,
                serde_json::error::Category::Data => DecodeCategory::Data,
                serde_json::error::Category::Io => DecodeCategory::Io,
            },
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    }

    fn pretty(&self, payload: &[u8]) -> Option<String> {
        diagnostic::pretty_json(payload)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
