//! Reply markup builders.
//!
//! Each markup serializes to the JSON string the API expects in the
//! `reply_markup` parameter; see [`ReplyMarkup::to_json`].
//! Docs: <https://core.telegram.org/bots/api#replykeyboardmarkup>

use serde::{Deserialize, Serialize};

/// One button of a custom reply keyboard: plain text, or a button that
/// requests the user's contact or location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyboardButton {
    Text(String),
    Request {
        text: String,
        #[serde(default)]
        request_contact: bool,
        #[serde(default)]
        request_location: bool,
    },
}

impl KeyboardButton {
    pub fn request(text: impl Into<String>, request_contact: bool, request_location: bool) -> Self {
        Self::Request {
            text: text.into(),
            request_contact,
            request_location,
        }
    }
}

impl From<&str> for KeyboardButton {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for KeyboardButton {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Custom keyboard shown in place of the user's letter keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(default)]
    pub one_time_keyboard: bool,
    #[serde(default)]
    pub resize_keyboard: bool,
    #[serde(default = "default_selective")]
    pub selective: bool,
}

impl ReplyKeyboardMarkup {
    /// Keyboard from button rows; not one-time, not resized, selective.
    pub fn new<R, B>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = B>,
        B: Into<KeyboardButton>,
    {
        Self {
            keyboard: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            one_time_keyboard: false,
            resize_keyboard: false,
            selective: default_selective(),
        }
    }

    pub fn one_time(mut self, one_time: bool) -> Self {
        self.one_time_keyboard = one_time;
        self
    }

    pub fn resize(mut self, resize: bool) -> Self {
        self.resize_keyboard = resize;
        self
    }

    pub fn selective(mut self, selective: bool) -> Self {
        self.selective = selective;
        self
    }
}

/// What an inline button does when pressed. Exactly one per button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineButtonAction {
    Url(String),
    CallbackData(String),
    /// Prompt the user to pick a chat and insert the bot's username plus this query.
    SwitchInlineQuery(String),
    /// Insert the bot's username plus this query in the current chat.
    SwitchInlineQueryCurrentChat(String),
    CallbackGame(serde_json::Value),
    Pay(bool),
}

/// One button of an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(flatten)]
    pub action: InlineButtonAction,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, action: InlineButtonAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::Url(url.into()))
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::CallbackData(data.into()))
    }
}

/// Keyboard attached directly under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }
}

/// Hide the current custom keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardRemove {
    remove_keyboard: bool,
    pub selective: bool,
}

impl ReplyKeyboardRemove {
    pub fn new(selective: bool) -> Self {
        Self {
            remove_keyboard: true,
            selective,
        }
    }
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Show a reply interface, as if the user tapped "Reply" on the bot's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceReply {
    force_reply: bool,
    pub selective: bool,
}

impl ForceReply {
    pub fn new(selective: bool) -> Self {
        Self {
            force_reply: true,
            selective,
        }
    }
}

impl Default for ForceReply {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Any markup accepted by `reply_markup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl ReplyMarkup {
    /// The JSON text sent as the `reply_markup` form field.
    pub fn to_json(&self) -> String {
        // Serializing these plain structs cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(m: ReplyKeyboardMarkup) -> Self {
        Self::Keyboard(m)
    }
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        Self::Inline(m)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(m: ReplyKeyboardRemove) -> Self {
        Self::Remove(m)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(m: ForceReply) -> Self {
        Self::ForceReply(m)
    }
}

impl From<ReplyMarkup> for crate::params::Param {
    fn from(m: ReplyMarkup) -> Self {
        Self::Text(m.to_json())
    }
}

fn default_selective() -> bool {
    true
}
