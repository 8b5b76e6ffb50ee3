//! Typed views over parts of a Bot API payload.
//!
//! Only the fields Courier itself reads are modelled; everything else stays
//! reachable through [`Update::raw`](super::Update::raw).

use serde::{Deserialize, Serialize};

/// Response envelope shared by every Bot API method.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.chat_type == "private"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: Option<String>,
    pub width: i64,
    pub height: i64,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of `getFile`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct File {
    pub file_id: String,
    pub file_size: Option<i64>,
    /// Download with `{api_base}/file/bot<token>/<file_path>`.
    pub file_path: Option<String>,
}
