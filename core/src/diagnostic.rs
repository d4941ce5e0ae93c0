//! Best-effort rendering of a response body for error messages.
//!
//! Three tiers, tried in order: pretty-printed JSON, the bytes as UTF-8
//! text, then a fixed placeholder. The result is only ever embedded in error
//! details; successful decoding never looks at it.

use crate::codec::Codec;

/// Rendered when the payload is neither JSON nor UTF-8.
pub const PLACEHOLDER: &str = "<unreadable payload>";

pub fn pretty_json(payload: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(payload).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

pub fn raw_text(payload: &[u8]) -> Option<String> {
    std::str::from_utf8(payload).ok().map(str::to_owned)
}

/// Render `payload` with the codec's pretty printer, falling back to text
/// and then to `PLACEHOLDER`.
pub fn describe_payload<C: Codec>(codec: &C, payload: &[u8]) -> String {
    codec
        .pretty(payload)
        .or_else(|| raw_text(payload))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
