//! Human-readable renderings of updates for the CLI.

use courier_core::update::Update;

/// One line per update: id, kind, chat and a short text preview.
pub fn line(update: &Update) -> String {
    let id = update
        .update_id()
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let kind = update.kind().map_or("unclassified", |k| k.as_str());
    let chat = update
        .chat_id()
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let text = update.text().or_else(|| update.caption()).unwrap_or("");
    format!("#{id} {kind} chat={chat} {}", preview(text, 60))
}

/// Multi-line view of the fields a handler usually looks at.
pub fn describe(update: &Update) -> String {
    let mut out = vec![format!(
        "kind: {}",
        update.kind().map_or("unclassified", |k| k.as_str())
    )];
    let mut push = |label: &str, value: Option<String>| {
        if let Some(v) = value {
            out.push(format!("{label}: {v}"));
        }
    };
    push("update_id", update.update_id().map(|v| v.to_string()));
    push("chat_id", update.chat_id().map(|v| v.to_string()));
    push("message_id", update.message_id().map(|v| v.to_string()));
    push("user_id", update.user_id().map(|v| v.to_string()));
    push("username", update.username().map(str::to_string));
    push("first_name", update.first_name().map(str::to_string));
    push("text", update.text().map(str::to_string));
    push("caption", update.caption().map(str::to_string));
    push("callback_data", update.callback_data().map(str::to_string));
    push(
        "reply_to_message_id",
        update.reply_to_message_id().map(|v| v.to_string()),
    );
    push("group", update.message_from_group_title().map(str::to_string));
    out.join("\n")
}

fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars).collect();
    format!("{cut}…")
}
