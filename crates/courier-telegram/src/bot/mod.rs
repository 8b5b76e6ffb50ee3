//! Telegram bot client.
//!
//! [`Bot`] owns one transport, the error sinks, and the [`UpdateStore`] with
//! the update currently being handled. It is a single-owner value: every
//! method that changes the store takes `&mut self`, so sharing one client
//! across tasks needs external locking (or one client per task).
//! Docs: <https://core.telegram.org/bots/api>

mod dispatch;
mod methods;
mod polling;
mod store;
mod webhook;


pub use polling::PollOptions;
pub use store::UpdateStore;
pub use webhook::WebhookAck;

use crate::sink::{FileErrorSink, TracingErrorSink};
use crate::transport::HttpTransport;
use courier_core::{
    config::BotConfig,
    error::CourierError,
    traits::{ErrorSink, Transport},
    update::{Update, UpdateBatch},
};
use tracing::info;

/// Bot API client over a [`Transport`] (the HTTP one by default).
pub struct Bot<T: Transport = HttpTransport> {
    transport: T,
    sinks: Vec<Box<dyn ErrorSink>>,
    log_errors: bool,
    store: UpdateStore,
    /// Offset to resume polling from: last acknowledged `update_id` + 1.
    next_offset: Option<i64>,
}

impl Bot<HttpTransport> {
    /// Create a client from config. Fails fast on an invalid token or proxy.
    ///
    /// With `log_errors` on, failed responses are logged through `tracing`
    /// and, when `error_log_path` is set, appended to that file.
    pub fn new(config: &BotConfig) -> Result<Self, CourierError> {
        let transport = HttpTransport::new(config)?;
        let mut bot = Self::with_transport(transport).log_errors(config.log_errors);
        if config.log_errors {
            bot = bot.with_sink(TracingErrorSink);
            if !config.error_log_path.is_empty() {
                bot = bot.with_sink(FileErrorSink::new(&config.error_log_path));
            }
        }
        info!(
            "telegram client ready (error logging {})",
            if config.log_errors { "on" } else { "off" }
        );
        Ok(bot)
    }

    /// Stream a file from the file host to `local_path`.
    ///
    /// `telegram_path` is the `file_path` returned by `getFile`.
    pub async fn download_file(
        &self,
        telegram_path: &str,
        local_path: impl AsRef<std::path::Path>,
    ) -> Result<u64, CourierError> {
        self.transport
            .download(telegram_path, local_path.as_ref())
            .await
    }

    /// `getFile` then download: fetch a file by its `file_id`.
    pub async fn download_by_id(
        &self,
        file_id: &str,
        local_path: impl AsRef<std::path::Path>,
    ) -> Result<u64, CourierError> {
        let file = self.file_info(file_id).await?;
        let path = file.file_path.ok_or_else(|| {
            CourierError::Decode(format!("getFile returned no file_path for {file_id}"))
        })?;
        self.download_file(&path, local_path).await
    }
}

impl<T: Transport> Bot<T> {
    /// Client over any transport, with error logging on and no sinks.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            sinks: Vec::new(),
            log_errors: true,
            store: UpdateStore::default(),
            next_offset: None,
        }
    }

    /// Add an error sink.
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Turn reporting to the error sinks on or off.
    pub fn log_errors(mut self, enabled: bool) -> Self {
        self.log_errors = enabled;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The update being handled, if any.
    pub fn current(&self) -> Option<&Update> {
        self.store.current()
    }

    /// Make `update` the current one.
    pub fn set_update(&mut self, update: Update) {
        self.store.set_current(update);
    }

    /// Make update `index` of the last polled batch the current one.
    ///
    /// Returns `None`, leaving the store as it was, when the index is out of range.
    pub fn select_update(&mut self, index: usize) -> Option<&Update> {
        self.store.select(index)
    }

    /// The last polled batch.
    pub fn batch(&self) -> &UpdateBatch {
        self.store.batch()
    }

    /// Number of updates in the last polled batch.
    pub fn update_count(&self) -> usize {
        self.store.batch().len()
    }

    /// Offset to pass to the next poll, once something has been fetched.
    pub fn next_offset(&self) -> Option<i64> {
        self.next_offset
    }
}
