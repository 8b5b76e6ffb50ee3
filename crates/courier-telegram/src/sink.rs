//! Bundled error sinks.

use async_trait::async_trait;
use courier_core::{
    error::CourierError,
    params::RequestContext,
    traits::{is_failure, ErrorSink},
};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Logs failure envelopes at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

#[async_trait]
impl ErrorSink for TracingErrorSink {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn report(&self, response: &Value, context: &RequestContext<'_>) -> Result<(), CourierError> {
        if !is_failure(response) {
            return Ok(());
        }
        let error_code = response.get("error_code").and_then(Value::as_i64);
        let description = response
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("no description");
        warn!(
            endpoint = context.endpoint,
            multipart = context.is_multipart,
            error_code,
            "telegram call failed: {description}"
        );
        Ok(())
    }
}

/// Appends one JSON line per failed call to a file.
#[derive(Debug, Clone)]
pub struct FileErrorSink {
    path: PathBuf,
}

impl FileErrorSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn entry(response: &Value, context: &RequestContext<'_>) -> Value {
        serde_json::json!({
            "time": chrono::Utc::now().to_rfc3339(),
            "endpoint": context.endpoint,
            "response": response,
            "params": context.params,
            "multipart": context.is_multipart,
            "update": context.update,
        })
    }
}

#[async_trait]
impl ErrorSink for FileErrorSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn report(&self, response: &Value, context: &RequestContext<'_>) -> Result<(), CourierError> {
        if !is_failure(response) {
            return Ok(());
        }
        let mut line = serde_json::to_string(&Self::entry(response, context))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| CourierError::Sink(format!("cannot open {}: {e}", self.path.display())))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| CourierError::Sink(format!("cannot write {}: {e}", self.path.display())))?;
        Ok(())
    }
}
