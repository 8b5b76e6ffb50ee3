use crate::{
    error::CourierError,
    params::{Params, RequestContext},
};
use async_trait::async_trait;

/// Sends one Bot API request and returns the raw body.
///
/// Implementations perform exactly one request per call and never fail:
/// connection errors and timeouts come back as a synthesized
/// `{"ok": false, ...}` body so every caller sees a decodable reply.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call `endpoint` with `params`. With `is_post == false` the request
    /// carries no body at all.
    async fn send(&self, endpoint: &str, params: &Params, is_post: bool) -> String;
}

/// Destination for call outcomes while error logging is on.
///
/// Sinks receive every decoded response together with the request that
/// produced it and decide for themselves what is worth recording. A failing
/// sink never changes the outcome of the call that fed it.
#[async_trait]
pub trait ErrorSink: Send + Sync {
    /// Human-readable sink name.
    fn name(&self) -> &str;

    /// Record one response.
    async fn report(
        &self,
        response: &serde_json::Value,
        context: &RequestContext<'_>,
    ) -> Result<(), CourierError>;
}

/// True when `response` is a failure envelope (`ok` missing or not `true`).
pub fn is_failure(response: &serde_json::Value) -> bool {
    response.get("ok").and_then(serde_json::Value::as_bool) != Some(true)
}
