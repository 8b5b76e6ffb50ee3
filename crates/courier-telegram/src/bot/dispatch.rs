//! Generic dispatch: the single path every remote method goes through.

use super::Bot;
use courier_core::{
    params::{Params, RequestContext},
    traits::Transport,
};
use serde_json::Value;
use tracing::{debug, warn};

impl<T: Transport> Bot<T> {
    /// Call `endpoint` and decode the reply.
    ///
    /// With `uses_body == false` the request is a plain GET and `params` are
    /// not sent. A reply that is not JSON decodes to `Value::Null`. Transport
    /// failures arrive as a synthesized `{"ok": false, ...}` envelope.
    pub async fn call(&self, endpoint: &str, params: Params, uses_body: bool) -> Value {
        let raw = self.transport.send(endpoint, &params, uses_body).await;

        let decoded = match serde_json::from_str::<Value>(&raw) {
            Ok(v) => v,
            Err(e) => {
                debug!("telegram {endpoint}: reply is not JSON ({e})");
                Value::Null
            }
        };

        if self.log_errors && !self.sinks.is_empty() {
            let context = RequestContext {
                endpoint,
                params: &params,
                is_multipart: uses_body && params.has_files(),
                update: self.store.current().map(|u| u.raw()),
            };
            for sink in &self.sinks {
                if let Err(e) = sink.report(&decoded, &context).await {
                    warn!("error sink '{}' failed: {e}", sink.name());
                }
            }
        }

        decoded
    }
}
