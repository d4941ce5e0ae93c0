//! Error types for the request pipeline.
//!
//! # Design
//! `RequestError` is the closed set of outcomes a failed request can end in.
//! Every variant carries a human-readable diagnostic so failures can be
//! debugged from the value alone. Transport and decode failures have their
//! own structured types; the resolver folds them into a `RequestError`
//! before anything reaches the caller.

use std::fmt;

/// Every way a request can fail, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request URL could not be parsed.
    #[error("bad url: {0}")]
    BadUrl(String),

    /// The server answered 400 or 402..=499.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server answered 401.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server answered 500..=599.
    #[error("server error: {0}")]
    ServerError(String),

    /// The exchange ended without producing any response.
    #[error("no response: {0}")]
    NoResponse(String),

    /// The request body could not be encoded.
    #[error("unable to parse data: {0}")]
    UnableToParseData(String),

    /// A success response whose body did not decode into the target type.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Transport failures and status codes outside the known bands.
    #[error("unknown error: {0}")]
    Unknown(String),

    /// Application-level failure reported by the caller's own layer.
    #[error("api error: {0}")]
    Api(String),
}

impl RequestError {
    pub fn api(message: impl Into<String>) -> Self {
        RequestError::Api(message.into())
    }

    /// The diagnostic string carried by this error, without the kind label.
    pub fn detail(&self) -> &str {
        match self {
            RequestError::BadUrl(d)
            | RequestError::BadRequest(d)
            | RequestError::Unauthorized(d)
            | RequestError::ServerError(d)
            | RequestError::NoResponse(d)
            | RequestError::UnableToParseData(d)
            | RequestError::InvalidJson(d)
            | RequestError::Unknown(d)
            | RequestError::Api(d) => d,
        }
    }
}

/// A failure below HTTP: DNS, connect, TLS, timeout, or an aborted exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

/// Broad class of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeCategory {
    /// Input ended before a complete value was read.
    Eof,
    /// Input is not syntactically valid JSON.
    Syntax,
    /// Valid JSON that does not match the target type.
    Data,
    /// The codec failed while reading its input.
    Io,
}

impl fmt::Display for DecodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecodeCategory::Eof => "eof",
            DecodeCategory::Syntax => "syntax",
            DecodeCategory::Data => "data",
            DecodeCategory::Io => "io",
        };
        f.write_str(label)
    }
}

/// Structured description of why a payload did not decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category} error at line {line} column {column}: {message}")]
pub struct DecodeError {
    pub category: DecodeCategory,
    pub line: usize,
    pub column: usize,
    pub message: String,
}
