//! The network boundary.
//!
//! # Design
//! `Transport` is the only way the client reaches the network. It performs a
//! single exchange and reports either a completed response (any status, as
//! data) or a failure below HTTP. Status interpretation belongs to the
//! resolver, so implementations must not turn 4xx/5xx into errors.
//!
//! `UreqTransport` runs the blocking `ureq` agent on Tokio's blocking pool.

use std::future::Future;

use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, RawResponse};

/// Executes one `HttpRequest`.
///
/// Implementations must honor `request.timeout` as the deadline for the
/// whole exchange and report an exceeded deadline as a `TransportError`.
pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// `Transport` backed by a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || exchange(&agent, request))
            .await
            .map_err(|e| TransportError::new(format!("exchange aborted: {e}")))?
    }
}

fn exchange(agent: &Agent, request: HttpRequest) -> Result<RawResponse, TransportError> {
    let mut builder = ureq::http::Request::builder()
        .method(request.method.as_str())
        .uri(request.url.as_str());
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    // POST and PUT always carry a body, even an empty one.
    let body = match request.method {
        HttpMethod::Post | HttpMethod::Put => Some(request.body.unwrap_or_default()),
        HttpMethod::Get | HttpMethod::Delete => request.body,
    };
    let response = match body {
        Some(body) => {
            let wire = builder.body(body).map_err(|e| TransportError::new(e.to_string()))?;
            let wire = agent
                .configure_request(wire)
                .timeout_global(Some(request.timeout))
                .build();
            agent.run(wire)
        }
        None => {
            let wire = builder.body(()).map_err(|e| TransportError::new(e.to_string()))?;
            let wire = agent
                .configure_request(wire)
                .timeout_global(Some(request.timeout))
                .build();
            agent.run(wire)
        }
    };

    let mut response = response.map_err(transport_error)?;
    let status = response.status().as_u16();
    // A completed exchange is always data for the resolver, whatever its size.
    let payload = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(transport_error)?;
    Ok(RawResponse { status, payload })
}

fn transport_error(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::Timeout(_) => TransportError::timeout(err.to_string()),
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
            TransportError::timeout(err.to_string())
        }
        _ => TransportError::new(err.to_string()),
    }
}
