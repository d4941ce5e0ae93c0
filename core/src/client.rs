//! Caller-facing request API.
//!
//! # Design
//! `Client` holds a transport, a codec and a read-only `ClientConfig`; it
//! carries no per-request state. Every call goes through the same two steps:
//! `prepare` (timeout, URL validation, body encoding) and `exchange`
//! (transport call, then `resolver::resolve`). The three invocation styles
//! differ only in how that exchange is scheduled and how its single result
//! is delivered:
//!
//! - `send` awaits it directly.
//! - `send_with_callback` spawns it and hands the result to a one-shot
//!   callback.
//! - `send_stream` wraps it in a lazy single-item stream.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::codec::{Codec, JsonCodec};
use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{HttpRequest, Outcome, Request};
use crate::resolver;
use crate::status;
use crate::transport::Transport;

/// Sends `Request`s through a `Transport` and resolves typed results.
///
/// Cloning is cheap and clones share the transport.
pub struct Client<Tr, C = JsonCodec> {
    transport: Arc<Tr>,
    codec: Arc<C>,
    config: ClientConfig,
}

impl<Tr, C> Clone for Client<Tr, C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            codec: Arc::clone(&self.codec),
            config: self.config,
        }
    }
}

impl<Tr: Transport> Client<Tr> {
    pub fn new(transport: Tr) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: Tr, config: ClientConfig) -> Self {
        Self::with_codec(transport, JsonCodec, config)
    }
}

impl<Tr: Transport, C: Codec + 'static> Client<Tr, C> {
    pub fn with_codec(transport: Tr, codec: C, config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            codec: Arc::new(codec),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and encode `request` into what the transport consumes.
    ///
    /// The request's own timeout wins over the client default. A URL that
    /// does not parse is `BadUrl`; a body the codec cannot encode is
    /// `UnableToParseData`.
    pub fn prepare(&self, request: &Request) -> Result<HttpRequest, RequestError> {
        let timeout = request.timeout().unwrap_or(self.config.default_timeout());
        let url = Url::parse(request.url())
            .map_err(|e| RequestError::BadUrl(format!("{:?}: {e}", request.url())))?;
        let body = request.body().map(|b| self.codec.encode(b)).transpose()?;

        let mut headers: Vec<(String, String)> = request
            .headers()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let has_content_type = headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("content-type"));
        if body.is_some() && !has_content_type {
            headers.push(("content-type".to_string(), self.codec.content_type().to_string()));
        }

        Ok(HttpRequest {
            method: request.method(),
            url,
            headers,
            body,
            timeout,
        })
    }

    /// Send `request` and wait for its result.
    pub async fn send<T: DeserializeOwned>(&self, request: &Request) -> Result<T, RequestError> {
        let request = self.prepare(request)?;
        exchange(&*self.transport, &*self.codec, request).await
    }

    /// Send `request` in the background and pass the result to `callback`.
    ///
    /// Returns immediately. `callback` runs exactly once unless the returned
    /// handle is aborted first; aborting also cancels the in-flight exchange.
    /// If the exchange task dies without producing a result, the callback
    /// receives `NoResponse`. Must be called from within a Tokio runtime.
    pub fn send_with_callback<T, F>(&self, request: &Request, callback: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, RequestError>) + Send + 'static,
    {
        let prepared = self.prepare(request);
        let transport = Arc::clone(&self.transport);
        let codec = Arc::clone(&self.codec);

        tokio::spawn(async move {
            let request = match prepared {
                Ok(request) => request,
                Err(err) => return callback(Err(err)),
            };
            let mut task = AbortOnDrop(tokio::spawn(async move {
                exchange(&*transport, &*codec, request).await
            }));
            let result = match (&mut task.0).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, "exchange task ended without a response");
                    Err(RequestError::NoResponse(err.to_string()))
                }
            };
            callback(result);
        })
    }

    /// Send `request` when the returned stream is first polled.
    ///
    /// The stream yields exactly one item, `Ok(value)` or `Err(error)`, and
    /// then ends. A malformed URL is the exception: the stream ends without
    /// yielding anything, unlike `send` and `send_with_callback`, which
    /// report `BadUrl`.
    pub fn send_stream<T>(&self, request: &Request) -> BoxStream<'static, Result<T, RequestError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = match self.prepare(request) {
            Ok(request) => request,
            // FIXME: inconsistent with the other styles; callers cannot tell a
            // malformed URL from an empty stream.
            Err(RequestError::BadUrl(detail)) => {
                debug!(%detail, "malformed url, completing stream empty");
                return stream::empty().boxed();
            }
            Err(err) => return stream::once(future::ready(Err(err))).boxed(),
        };
        let transport = Arc::clone(&self.transport);
        let codec = Arc::clone(&self.codec);
        stream::once(async move { exchange(&*transport, &*codec, request).await }).boxed()
    }
}

/// Aborts the wrapped task when dropped, so cancelling the callback task
/// also cancels the exchange it is waiting on.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn exchange<Tr, C, T>(transport: &Tr, codec: &C, request: HttpRequest) -> Result<T, RequestError>
where
    Tr: Transport,
    C: Codec,
    T: DeserializeOwned,
{
    let method = request.method.as_str();
    let url = request.url.clone();
    debug!(method, %url, timeout = ?request.timeout, "dispatching request");

    let outcome = Outcome::from(transport.execute(request).await);
    match &outcome {
        Outcome::Completed(response) if status::is_success(response.status) => {
            debug!(method, %url, status = response.status, "request completed");
        }
        Outcome::Completed(response) => {
            warn!(method, %url, status = response.status, "error status");
        }
        Outcome::Failed(err) => {
            warn!(method, %url, error = %err, timed_out = err.is_timeout(), "transport failure");
        }
    }
    resolver::resolve(codec, outcome)
}
