//! Webhook ingestion and acknowledgment.

use super::Bot;
use courier_core::{error::CourierError, traits::Transport, update::Update};
use serde::Serialize;
use tracing::debug;

/// Fixed reply acknowledging a webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebhookAck {
    status: &'static str,
}

impl WebhookAck {
    pub const STATUS_CODE: u16 = 200;

    pub fn new() -> Self {
        Self { status: "success" }
    }

    /// `{"status":"success"}`.
    pub fn body(&self) -> Result<String, CourierError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for WebhookAck {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Bot<T> {
    /// Decode a webhook POST body and make it the current update.
    pub fn ingest_webhook(&mut self, body: &[u8]) -> Result<&Update, CourierError> {
        let update = Update::from_slice(body)?;
        debug!(
            "telegram webhook: update {:?} ({})",
            update.update_id(),
            update.kind().map_or("unclassified", |k| k.as_str())
        );
        Ok(self.store.set_current(update))
    }

    /// The reply to send back to the platform after handling a webhook.
    pub fn respond_success(&self) -> WebhookAck {
        WebhookAck::new()
    }
}
