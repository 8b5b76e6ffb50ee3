//! Named Bot API methods. Each one forwards to [`Bot::call`].

use super::Bot;
use courier_core::{
    error::CourierError,
    params::{InputFile, Params},
    traits::Transport,
    update::types::{ApiResponse, File, User},
};
use serde_json::Value;

impl<T: Transport> Bot<T> {
    /// Basic information about the bot. Handy to check the token.
    pub async fn get_me(&self) -> Value {
        self.call("getMe", Params::new(), false).await
    }

    /// `getMe`, decoded.
    pub async fn me(&self) -> Result<User, CourierError> {
        decode_result(self.get_me().await, "getMe")
    }

    pub async fn send_message(&self, params: Params) -> Value {
        self.call("sendMessage", params, true).await
    }

    pub async fn forward_message(&self, params: Params) -> Value {
        self.call("forwardMessage", params, true).await
    }

    pub async fn send_photo(&self, params: Params) -> Value {
        self.call("sendPhoto", params, true).await
    }

    pub async fn send_audio(&self, params: Params) -> Value {
        self.call("sendAudio", params, true).await
    }

    pub async fn send_document(&self, params: Params) -> Value {
        self.call("sendDocument", params, true).await
    }

    pub async fn send_video(&self, params: Params) -> Value {
        self.call("sendVideo", params, true).await
    }

    pub async fn send_voice(&self, params: Params) -> Value {
        self.call("sendVoice", params, true).await
    }

    pub async fn send_location(&self, params: Params) -> Value {
        self.call("sendLocation", params, true).await
    }

    pub async fn send_contact(&self, params: Params) -> Value {
        self.call("sendContact", params, true).await
    }

    /// e.g. `action=typing`.
    pub async fn send_chat_action(&self, params: Params) -> Value {
        self.call("sendChatAction", params, true).await
    }

    pub async fn edit_message_text(&self, params: Params) -> Value {
        self.call("editMessageText", params, true).await
    }

    pub async fn edit_message_reply_markup(&self, params: Params) -> Value {
        self.call("editMessageReplyMarkup", params, true).await
    }

    pub async fn delete_message(&self, params: Params) -> Value {
        self.call("deleteMessage", params, true).await
    }

    pub async fn answer_callback_query(&self, params: Params) -> Value {
        self.call("answerCallbackQuery", params, true).await
    }

    pub async fn answer_inline_query(&self, params: Params) -> Value {
        self.call("answerInlineQuery", params, true).await
    }

    pub async fn get_chat(&self, params: Params) -> Value {
        self.call("getChat", params, true).await
    }

    pub async fn leave_chat(&self, params: Params) -> Value {
        self.call("leaveChat", params, true).await
    }

    /// File metadata, including the `file_path` to download from.
    pub async fn get_file(&self, file_id: &str) -> Value {
        self.call("getFile", Params::new().with("file_id", file_id), true)
            .await
    }

    /// `getFile`, decoded.
    pub async fn file_info(&self, file_id: &str) -> Result<File, CourierError> {
        decode_result(self.get_file(file_id).await, "getFile")
    }

    /// Register `url` for webhook delivery, optionally with a self-signed
    /// public certificate.
    pub async fn set_webhook(&self, url: &str, certificate: Option<InputFile>) -> Value {
        let mut params = Params::new().with("url", url);
        if let Some(cert) = certificate {
            params.insert("certificate", cert);
        }
        self.call("setWebhook", params, true).await
    }

    /// Switch back to `getUpdates`.
    pub async fn delete_webhook(&self) -> Value {
        self.call("deleteWebhook", Params::new(), false).await
    }
}

/// Pull `result` out of a success envelope.
fn decode_result<R: serde::de::DeserializeOwned>(
    reply: Value,
    method: &str,
) -> Result<R, CourierError> {
    let envelope: ApiResponse<R> = serde_json::from_value(reply)
        .map_err(|e| CourierError::Decode(format!("{method}: unexpected reply: {e}")))?;
    if !envelope.ok {
        return Err(CourierError::Decode(format!(
            "{method} failed ({}): {}",
            envelope.error_code.unwrap_or_default(),
            envelope.description.unwrap_or_default()
        )));
    }
    envelope
        .result
        .ok_or_else(|| CourierError::Decode(format!("{method}: reply has no result")))
}
