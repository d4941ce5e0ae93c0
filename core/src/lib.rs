//! Typed JSON requests over a pluggable HTTP transport.
//!
//! # Overview
//! A `Request` describes what to send. A `Client` validates it, hands it to a
//! `Transport`, and resolves whatever comes back into either a decoded value
//! or a `RequestError`. The same resolution runs no matter how the request is
//! issued: awaited directly (`Client::send`), delivered to a callback
//! (`Client::send_with_callback`), or consumed as a single-item stream
//! (`Client::send_stream`).
//!
//! # Design
//! - `status::classify` and `resolver::resolve` are pure and synchronous;
//!   the client only schedules work around them.
//! - `Transport` and `Codec` are traits, so tests swap in an in-memory
//!   transport and the network stack stays outside the core.
//! - `UreqTransport` is the shipped transport; status codes come back as
//!   data and only failures below HTTP are transport errors.

pub mod client;
pub mod codec;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod http;
pub mod resolver;
pub mod status;
pub mod transport;

pub use client::Client;
pub use codec::{Codec, JsonCodec};
pub use config::{ClientConfig, ConfigError};
pub use error::{DecodeCategory, DecodeError, RequestError, TransportError};
pub use http::{HttpMethod, HttpRequest, Outcome, RawResponse, Request};
pub use resolver::resolve;
pub use transport::{Transport, UreqTransport};
