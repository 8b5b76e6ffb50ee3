//! Long-poll update retrieval with offset bookkeeping.

use super::Bot;
use courier_core::{params::Params, traits::Transport, update::UpdateBatch};
use tracing::{debug, warn};

/// Arguments to one `getUpdates` round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// First `update_id` to return.
    pub offset: i64,
    /// 1–100.
    pub limit: u32,
    /// Server-side hold in seconds; 0 = short polling.
    pub timeout: u32,
    /// Acknowledge the fetched batch so it is not delivered again.
    pub advance: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
            timeout: 0,
            advance: true,
        }
    }
}

impl PollOptions {
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Leave the batch unacknowledged, e.g. to inspect it from a CLI.
    pub fn no_advance(mut self) -> Self {
        self.advance = false;
        self
    }
}

impl<T: Transport> Bot<T> {
    /// Fetch one batch of updates.
    ///
    /// With `advance` set and a non-empty batch, a second `getUpdates` with
    /// `offset = last update_id + 1, limit = 1` confirms everything fetched;
    /// its reply is not returned. The batch is kept for
    /// [`select_update`](Bot::select_update) and returned as received.
    pub async fn poll(&mut self, options: PollOptions) -> UpdateBatch {
        let params = Params::new()
            .with("offset", options.offset)
            .with("limit", options.limit)
            .with("timeout", options.timeout);
        let response = self.call("getUpdates", params, true).await;
        let batch = UpdateBatch::from_response(response);

        if !batch.is_ok() {
            warn!(
                "telegram getUpdates failed: {}",
                batch.description().unwrap_or("no description")
            );
        }

        if let Some(last) = batch.last_update_id().filter(|_| options.advance) {
            let next = last + 1;
            // Short poll: the ack must not hold the connection open.
            let ack = Params::new()
                .with("offset", next)
                .with("limit", 1u32)
                .with("timeout", 0u32);
            let reply = self.call("getUpdates", ack, true).await;
            debug!(
                "telegram: confirmed updates up to {last} (ack ok={})",
                reply.get("ok").and_then(|v| v.as_bool()).unwrap_or(false)
            );
            self.next_offset = Some(next);
        }

        debug!("telegram: polled {} updates", batch.len());
        self.store.replace_batch(batch.clone());
        batch
    }

    /// Poll from where the previous round left off.
    pub async fn poll_next(&mut self, limit: u32, timeout: u32) -> UpdateBatch {
        let offset = self.next_offset.unwrap_or(0);
        self.poll(PollOptions::default().offset(offset).limit(limit).timeout(timeout))
            .await
    }
}
