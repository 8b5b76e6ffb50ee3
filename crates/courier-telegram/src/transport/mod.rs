//! HTTP transport for the Telegram Bot API.
//!
//! One request per call, no retries. Failures never escape: they are turned
//! into a `{"ok": false, "error_code", "description"}` body so callers always
//! get something to decode.
//! Docs: <https://core.telegram.org/bots/api#making-requests>

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use courier_core::{
    config::BotConfig,
    error::CourierError,
    params::{Param, Params},
    traits::Transport,
};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Codes used in synthesized failure bodies. Borrowed from libcurl so they
/// stay recognisable next to the API's own HTTP-style codes.
mod code {
    pub const BAD_REQUEST: i64 = 3;
    pub const CONNECT: i64 = 7;
    pub const LOCAL_FILE: i64 = 26;
    pub const TIMEOUT: i64 = 28;
    pub const RECEIVE: i64 = 56;
    pub const OTHER: i64 = 1;
}

/// reqwest-backed transport bound to one bot token.
pub struct HttpTransport {
    client: reqwest::Client,
    /// `{api_base}/bot<token>`.
    base_url: String,
    /// `{api_base}/file/bot<token>`.
    file_base_url: String,
}

impl HttpTransport {
    /// Build the transport, applying proxy, TLS and timeout settings.
    ///
    /// Fails fast on an invalid token or proxy.
    pub fn new(config: &BotConfig) -> Result<Self, CourierError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();

        if let Some(proxy_cfg) = config.proxy.as_ref().filter(|p| !p.is_empty()) {
            if let Some(url) = proxy_cfg.proxy_url() {
                let mut proxy = reqwest::Proxy::all(&url)
                    .map_err(|e| CourierError::Config(format!("invalid proxy '{url}': {e}")))?;
                if let Some((user, pass)) = proxy_cfg.credentials() {
                    proxy = proxy.basic_auth(user, pass);
                }
                debug!("courier: routing Bot API traffic through {url}");
                builder = builder.proxy(proxy);
            }
        }

        if config.danger_accept_invalid_certs {
            warn!("TLS certificate verification is DISABLED for Bot API requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if config.request_timeout_secs > 0 {
            builder = builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| CourierError::Config(format!("failed to build HTTP client: {e}")))?;

        let api_base = config.api_base_url.trim_end_matches('/');
        let token = config.token.trim();
        Ok(Self {
            client,
            base_url: format!("{api_base}/bot{token}"),
            file_base_url: format!("{api_base}/file/bot{token}"),
        })
    }

    /// Stream a file from the file host into `local_path`, chunk by chunk.
    ///
    /// Returns the number of bytes written. A partially written file is
    /// removed when the download fails midway.
    pub async fn download(
        &self,
        telegram_path: &str,
        local_path: &Path,
    ) -> Result<u64, CourierError> {
        let url = format!(
            "{}/{}",
            self.file_base_url,
            telegram_path.trim_start_matches('/')
        );

        let mut resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CourierError::Transport(format!("file download failed: {}", e.without_url())))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CourierError::Transport(format!(
                "file download failed ({status}) for {telegram_path}"
            )));
        }

        let result = async {
            let mut out = tokio::fs::File::create(local_path).await?;
            let mut written: u64 = 0;
            while let Some(chunk) = resp.chunk().await.map_err(|e| {
                CourierError::Transport(format!("file read failed: {}", e.without_url()))
            })? {
                out.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            out.flush().await?;
            Ok::<u64, CourierError>(written)
        }
        .await;

        match result {
            Ok(written) => {
                debug!("downloaded {telegram_path} ({written} bytes)");
                Ok(written)
            }
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(local_path).await {
                    debug!("could not remove partial download {}: {rm}", local_path.display());
                }
                Err(e)
            }
        }
    }

    async fn build_multipart(body: &Params) -> Result<reqwest::multipart::Form, String> {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in body.iter() {
            match value {
                Param::Text(text) => {
                    form = form.text(key.to_string(), text.clone());
                }
                Param::File(file) => {
                    let bytes = tokio::fs::read(&file.path)
                        .await
                        .map_err(|e| format!("cannot read {}: {e}", file.path.display()))?;
                    let mut part =
                        reqwest::multipart::Part::bytes(bytes).file_name(file.upload_name());
                    if let Some(mime) = &file.mime_type {
                        part = part
                            .mime_str(mime)
                            .map_err(|e| format!("invalid mime type '{mime}': {e}"))?;
                    }
                    form = form.part(key.to_string(), part);
                }
            }
        }
        Ok(form)
    }
}

/// Pull `chat_id` out of the body so it can travel in the query string.
///
/// Some endpoints historically only honoured `chat_id` as a query parameter.
pub(crate) fn split_chat_id(params: &Params) -> (Option<String>, Params) {
    let mut body = params.clone();
    match body.remove("chat_id") {
        Some(Param::Text(id)) => (Some(id), body),
        Some(other) => {
            body.insert("chat_id", other);
            (None, body)
        }
        None => (None, body),
    }
}

/// Body returned in place of a transport failure.
pub(crate) fn failure_body(error_code: i64, description: &str) -> String {
    serde_json::json!({
        "ok": false,
        "error_code": error_code,
        "description": description,
    })
    .to_string()
}

fn failure_code(e: &reqwest::Error) -> i64 {
    if e.is_timeout() {
        code::TIMEOUT
    } else if e.is_connect() {
        code::CONNECT
    } else if e.is_builder() {
        code::BAD_REQUEST
    } else if e.is_body() || e.is_decode() {
        code::RECEIVE
    } else {
        code::OTHER
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &str, params: &Params, is_post: bool) -> String {
        let url = format!("{}/{endpoint}", self.base_url);

        let request = if is_post {
            let (chat_id, body) = split_chat_id(params);
            let mut req = self.client.post(&url);
            if let Some(id) = chat_id {
                req = req.query(&[("chat_id", id)]);
            }
            if body.has_files() {
                match Self::build_multipart(&body).await {
                    Ok(form) => req.multipart(form),
                    Err(e) => {
                        warn!("telegram {endpoint}: {e}");
                        return failure_body(code::LOCAL_FILE, &e);
                    }
                }
            } else {
                let fields: Vec<(&str, &str)> = body
                    .iter()
                    .filter_map(|(k, v)| v.as_text().map(|t| (k, t)))
                    .collect();
                req.form(&fields)
            }
        } else {
            if !params.is_empty() {
                debug!("telegram {endpoint}: GET call, ignoring {} params", params.len());
            }
            self.client.get(&url)
        };

        debug!("telegram {endpoint}: sending ({})", if is_post { "POST" } else { "GET" });

        let resp = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                let e = e.without_url();
                warn!("telegram {endpoint} request failed: {e}");
                return failure_body(failure_code(&e), &e.to_string());
            }
        };

        let status = resp.status();
        match resp.text().await {
            Ok(body) => {
                if !status.is_success() {
                    debug!("telegram {endpoint} got {status}");
                }
                body
            }
            Err(e) => {
                let e = e.without_url();
                warn!("telegram {endpoint} body read failed: {e}");
                failure_body(failure_code(&e), &e.to_string())
            }
        }
    }
}
