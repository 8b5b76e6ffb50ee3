//! Kind-aware field accessors.
//!
//! Every accessor returns `None` (or an empty value) when the path is absent
//! for this update; none of them fail.

use super::types::{Chat, Location, PhotoSize, User};
use super::{Update, UpdateKind};
use serde_json::Value;

impl Update {
    /// Root of the object that carries `from`, by kind.
    fn sender_root(&self) -> &'static str {
        match self.kind {
            Some(UpdateKind::CallbackQuery) => "/callback_query/from",
            Some(UpdateKind::ChannelPost) => "/channel_post/from",
            Some(UpdateKind::EditedMessage) => "/edited_message/from",
            _ => "/message/from",
        }
    }

    /// Root of the message object that carries `chat` and `message_id`.
    fn message_root(&self) -> &'static str {
        match self.kind {
            Some(UpdateKind::CallbackQuery) => "/callback_query/message",
            Some(UpdateKind::ChannelPost) => "/channel_post",
            Some(UpdateKind::EditedMessage) => "/edited_message",
            _ => "/message",
        }
    }

    fn sender_field(&self, field: &str) -> Option<&Value> {
        self.at(&format!("{}/{field}", self.sender_root()))
    }

    /// Message text, or the callback data for callback queries.
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            Some(UpdateKind::CallbackQuery) => self.str_at("/callback_query/data"),
            Some(UpdateKind::ChannelPost) => self.str_at("/channel_post/text"),
            Some(UpdateKind::EditedMessage) => self.str_at("/edited_message/text"),
            _ => self.str_at("/message/text"),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self.kind {
            Some(UpdateKind::ChannelPost) => self.str_at("/channel_post/caption"),
            _ => self.str_at("/message/caption"),
        }
    }

    /// Photo sizes, smallest first. Empty unless this is a photo message.
    pub fn photo(&self) -> Vec<PhotoSize> {
        if self.kind != Some(UpdateKind::Photo) {
            return Vec::new();
        }
        self.at("/message/photo")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Chat to reply into. Inline queries have no chat, so the querying
    /// user's id stands in.
    pub fn chat_id(&self) -> Option<i64> {
        match self.kind {
            Some(UpdateKind::InlineQuery) => self.i64_at("/inline_query/from/id"),
            _ => self.i64_at(&format!("{}/chat/id", self.message_root())),
        }
    }

    pub fn message_id(&self) -> Option<i64> {
        self.i64_at(&format!("{}/message_id", self.message_root()))
    }

    /// Typed chat of the current message.
    pub fn chat(&self) -> Option<Chat> {
        self.at(&format!("{}/chat", self.message_root()))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn reply_to_message_id(&self) -> Option<i64> {
        self.i64_at("/message/reply_to_message/message_id")
    }

    pub fn reply_to_message_from_user_id(&self) -> Option<i64> {
        self.i64_at("/message/reply_to_message/forward_from/id")
    }

    /// Raw `inline_query` object.
    pub fn inline_query(&self) -> Option<&Value> {
        self.at("/inline_query")
    }

    /// Raw `callback_query` object.
    pub fn callback_query(&self) -> Option<&Value> {
        self.at("/callback_query")
    }

    pub fn callback_id(&self) -> Option<&str> {
        self.str_at("/callback_query/id")
    }

    pub fn callback_data(&self) -> Option<&str> {
        self.str_at("/callback_query/data")
    }

    /// Message the pressed inline button was attached to.
    pub fn callback_message(&self) -> Option<&Value> {
        self.at("/callback_query/message")
    }

    pub fn callback_chat_id(&self) -> Option<i64> {
        self.i64_at("/callback_query/message/chat/id")
    }

    /// Unix time of `message`.
    pub fn date(&self) -> Option<i64> {
        self.i64_at("/message/date")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.sender_field("first_name").and_then(Value::as_str)
    }

    pub fn last_name(&self) -> Option<&str> {
        self.sender_field("last_name").and_then(Value::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.sender_field("username").and_then(Value::as_str)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.sender_field("id").and_then(Value::as_i64)
    }

    /// Typed sender of the update.
    pub fn sender(&self) -> Option<User> {
        self.at(self.sender_root())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn location(&self) -> Option<Location> {
        self.at("/message/location")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn update_id(&self) -> Option<i64> {
        self.i64_at("/update_id")
    }

    /// Original sender of a forwarded message.
    pub fn forward_from_id(&self) -> Option<i64> {
        self.i64_at("/message/forward_from/id")
    }

    /// Original chat of a message forwarded from a channel.
    pub fn forward_from_chat_id(&self) -> Option<i64> {
        self.i64_at("/message/forward_from_chat/id")
    }

    /// Whether `message` came from anything other than a private chat.
    /// An update without a message chat is not a group message.
    pub fn message_from_group(&self) -> bool {
        self.str_at("/message/chat/type")
            .is_some_and(|t| t != "private")
    }

    /// Title of the group `message` came from; `None` for private chats.
    pub fn message_from_group_title(&self) -> Option<&str> {
        if !self.message_from_group() {
            return None;
        }
        self.str_at("/message/chat/title")
    }
}
