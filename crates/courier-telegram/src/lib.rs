//! # courier-telegram
//!
//! Telegram Bot API client: HTTP transport, generic dispatch, long polling,
//! and error sinks.

pub mod bot;
pub mod sink;
pub mod transport;

pub use bot::{Bot, PollOptions, WebhookAck};
pub use transport::HttpTransport;
