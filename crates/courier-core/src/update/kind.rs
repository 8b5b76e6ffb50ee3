//! Update classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The category of an update, decided once from which fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    InlineQuery,
    CallbackQuery,
    EditedMessage,
    /// A plain text message.
    Message,
    Photo,
    Video,
    Audio,
    Voice,
    Contact,
    Location,
    /// A non-text message replying to another message.
    Reply,
    Animation,
    Sticker,
    Document,
    ChannelPost,
}

/// Marker path per kind, in priority order. First match wins.
const PRIORITY: [(&str, UpdateKind); 15] = [
    ("/inline_query", UpdateKind::InlineQuery),
    ("/callback_query", UpdateKind::CallbackQuery),
    ("/edited_message", UpdateKind::EditedMessage),
    ("/message/text", UpdateKind::Message),
    ("/message/photo", UpdateKind::Photo),
    ("/message/video", UpdateKind::Video),
    ("/message/audio", UpdateKind::Audio),
    ("/message/voice", UpdateKind::Voice),
    ("/message/contact", UpdateKind::Contact),
    ("/message/location", UpdateKind::Location),
    ("/message/reply_to_message", UpdateKind::Reply),
    ("/message/animation", UpdateKind::Animation),
    ("/message/sticker", UpdateKind::Sticker),
    ("/message/document", UpdateKind::Document),
    ("/channel_post", UpdateKind::ChannelPost),
];

impl UpdateKind {
    /// Classify a raw update. `None` when no known marker is present.
    ///
    /// A key holding JSON `null` counts as absent.
    pub fn classify(update: &Value) -> Option<Self> {
        PRIORITY
            .iter()
            .find(|(path, _)| update.pointer(path).is_some_and(|v| !v.is_null()))
            .map(|(_, kind)| *kind)
    }

    /// Wire-style name, e.g. `callback_query`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineQuery => "inline_query",
            Self::CallbackQuery => "callback_query",
            Self::EditedMessage => "edited_message",
            Self::Message => "message",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Voice => "voice",
            Self::Contact => "contact",
            Self::Location => "location",
            Self::Reply => "reply",
            Self::Animation => "animation",
            Self::Sticker => "sticker",
            Self::Document => "document",
            Self::ChannelPost => "channel_post",
        }
    }

    /// Kinds whose payload lives under the top-level `message` field.
    pub fn is_message(&self) -> bool {
        !matches!(
            self,
            Self::InlineQuery | Self::CallbackQuery | Self::EditedMessage | Self::ChannelPost
        )
    }
}

impl std::fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
