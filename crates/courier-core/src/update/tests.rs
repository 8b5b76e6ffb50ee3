//! Tests for update classification and field access.

use super::*;
use serde_json::json;

fn update(v: Value) -> Update {
    Update::from(v)
}

#[test]
fn test_each_marker_classifies_to_its_kind() {
    let cases = [
        (json!({"inline_query": {"id": "1"}}), UpdateKind::InlineQuery),
        (json!({"callback_query": {"id": "1"}}), UpdateKind::CallbackQuery),
        (json!({"edited_message": {"message_id": 1}}), UpdateKind::EditedMessage),
        (json!({"message": {"text": "hi"}}), UpdateKind::Message),
        (json!({"message": {"photo": []}}), UpdateKind::Photo),
        (json!({"message": {"video": {}}}), UpdateKind::Video),
        (json!({"message": {"audio": {}}}), UpdateKind::Audio),
        (json!({"message": {"voice": {}}}), UpdateKind::Voice),
        (json!({"message": {"contact": {}}}), UpdateKind::Contact),
        (json!({"message": {"location": {}}}), UpdateKind::Location),
        (json!({"message": {"reply_to_message": {}}}), UpdateKind::Reply),
        (json!({"message": {"animation": {}}}), UpdateKind::Animation),
        (json!({"message": {"sticker": {}}}), UpdateKind::Sticker),
        (json!({"message": {"document": {}}}), UpdateKind::Document),
        (json!({"channel_post": {"message_id": 1}}), UpdateKind::ChannelPost),
    ];
    for (payload, expected) in cases {
        assert_eq!(
            UpdateKind::classify(&payload),
            Some(expected),
            "payload {payload}"
        );
    }
}

#[test]
fn test_unknown_shape_is_unclassified() {
    assert_eq!(UpdateKind::classify(&json!({"update_id": 1})), None);
    assert_eq!(UpdateKind::classify(&json!({"poll": {"id": "x"}})), None);
    assert_eq!(UpdateKind::classify(&json!({"message": {"chat": {"id": 1}}})), None);
    assert_eq!(UpdateKind::classify(&json!(null)), None);
    assert_eq!(UpdateKind::classify(&json!([1, 2])), None);
}

#[test]
fn test_null_marker_counts_as_absent() {
    let v = json!({"inline_query": null, "message": {"text": "x"}});
    assert_eq!(UpdateKind::classify(&v), Some(UpdateKind::Message));
}

#[test]
fn test_callback_query_wins_over_edited_message() {
    let v = json!({
        "callback_query": {"id": "9", "data": "yes"},
        "edited_message": {"message_id": 3, "text": "edited"}
    });
    assert_eq!(UpdateKind::classify(&v), Some(UpdateKind::CallbackQuery));
    assert_eq!(update(v).text(), Some("yes"));
}

#[test]
fn test_text_wins_over_media_and_reply() {
    let v = json!({"message": {"text": "t", "photo": [], "reply_to_message": {}}});
    assert_eq!(UpdateKind::classify(&v), Some(UpdateKind::Message));

    let v = json!({"message": {"caption": "c", "photo": [], "reply_to_message": {}}});
    assert_eq!(UpdateKind::classify(&v), Some(UpdateKind::Photo));

    // A reply carrying a sticker is a reply first.
    let v = json!({"message": {"sticker": {}, "reply_to_message": {}}});
    assert_eq!(UpdateKind::classify(&v), Some(UpdateKind::Reply));
}

#[test]
fn test_kind_names() {
    assert_eq!(UpdateKind::CallbackQuery.to_string(), "callback_query");
    assert_eq!(UpdateKind::Reply.as_str(), "reply");
    assert!(UpdateKind::Sticker.is_message());
    assert!(!UpdateKind::ChannelPost.is_message());
}

#[test]
fn test_chat_id_per_kind() {
    let cb = update(json!({
        "update_id": 1,
        "callback_query": {
            "id": "cb1",
            "from": {"id": 7, "first_name": "A"},
            "message": {"message_id": 55, "chat": {"id": -100, "type": "group"}},
            "data": "press"
        }
    }));
    assert_eq!(cb.kind(), Some(UpdateKind::CallbackQuery));
    assert_eq!(cb.chat_id(), Some(-100));
    assert_eq!(cb.message_id(), Some(55));
    assert_eq!(cb.callback_chat_id(), Some(-100));
    assert_eq!(cb.callback_id(), Some("cb1"));
    assert_eq!(cb.callback_data(), Some("press"));
    assert_eq!(cb.user_id(), Some(7));
    assert!(cb.callback_message().is_some());

    let inline = update(json!({
        "update_id": 2,
        "inline_query": {"id": "iq", "from": {"id": 321, "first_name": "B"}, "query": "cats"}
    }));
    assert_eq!(inline.kind(), Some(UpdateKind::InlineQuery));
    assert_eq!(inline.chat_id(), Some(321));
    assert_eq!(
        inline.inline_query().and_then(|q| q.get("query")),
        Some(&json!("cats"))
    );

    let msg = update(json!({
        "update_id": 3,
        "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "x"}
    }));
    assert_eq!(msg.chat_id(), Some(42));
}

#[test]
fn test_edited_message_and_channel_post_paths() {
    let edited = update(json!({
        "edited_message": {
            "message_id": 8,
            "chat": {"id": 5},
            "from": {"id": 9, "first_name": "E", "last_name": "Dit", "username": "ed"},
            "text": "fixed"
        }
    }));
    assert_eq!(edited.text(), Some("fixed"));
    assert_eq!(edited.chat_id(), Some(5));
    assert_eq!(edited.message_id(), Some(8));
    assert_eq!(edited.first_name(), Some("E"));
    assert_eq!(edited.last_name(), Some("Dit"));
    assert_eq!(edited.username(), Some("ed"));

    let post = update(json!({
        "channel_post": {
            "message_id": 77,
            "chat": {"id": -1001, "type": "channel", "title": "News"},
            "text": "breaking",
            "caption": "cap"
        }
    }));
    assert_eq!(post.text(), Some("breaking"));
    assert_eq!(post.caption(), Some("cap"));
    assert_eq!(post.chat_id(), Some(-1001));
    assert_eq!(post.message_id(), Some(77));
    assert_eq!(post.chat().map(|c| c.chat_type), Some("channel".to_string()));
    // Channel posts usually have no sender.
    assert_eq!(post.first_name(), None);
    assert_eq!(post.user_id(), None);
}

#[test]
fn test_accessors_on_wrong_kind_are_empty() {
    let inline = update(json!({"inline_query": {"id": "q", "from": {"id": 1, "first_name": "Q"}}}));
    assert_eq!(inline.text(), None);
    assert_eq!(inline.message_id(), None);
    assert_eq!(inline.date(), None);
    assert_eq!(inline.callback_id(), None);
    assert_eq!(inline.location(), None);
    assert!(inline.photo().is_empty());
    assert!(!inline.message_from_group());
    assert_eq!(inline.message_from_group_title(), None);

    let empty = update(json!({}));
    assert_eq!(empty.kind(), None);
    assert_eq!(empty.chat_id(), None);
    assert_eq!(empty.update_id(), None);
    assert!(empty.sender().is_none());
}

#[test]
fn test_photo_only_for_photo_kind() {
    let photo = update(json!({
        "message": {
            "message_id": 3,
            "chat": {"id": 100, "type": "private"},
            "photo": [
                {"file_id": "small", "width": 90, "height": 90, "file_size": 1000},
                {"file_id": "large", "width": 800, "height": 800}
            ],
            "caption": "Check this out"
        }
    }));
    assert_eq!(photo.kind(), Some(UpdateKind::Photo));
    let sizes = photo.photo();
    assert_eq!(sizes.len(), 2);
    assert_eq!(sizes.last().map(|p| p.file_id.as_str()), Some("large"));
    assert!(sizes[1].file_size.is_none());
    assert_eq!(photo.caption(), Some("Check this out"));
    assert_eq!(photo.text(), None);

    // Text takes priority, so the photo array is not exposed.
    let texty = update(json!({"message": {"text": "t", "photo": [{"file_id": "a", "width": 1, "height": 1}]}}));
    assert!(texty.photo().is_empty());
}

#[test]
fn test_reply_forward_location_and_date() {
    let u = update(json!({
        "message": {
            "message_id": 10,
            "date": 1706529600,
            "chat": {"id": 1, "type": "private"},
            "location": {"latitude": 45.5, "longitude": 9.25},
            "reply_to_message": {"message_id": 4, "forward_from": {"id": 66}},
            "forward_from": {"id": 12},
            "forward_from_chat": {"id": -500}
        }
    }));
    assert_eq!(u.kind(), Some(UpdateKind::Location));
    assert_eq!(u.date(), Some(1706529600));
    let loc = u.location().unwrap();
    assert_eq!(loc.latitude, 45.5);
    assert_eq!(loc.longitude, 9.25);
    assert_eq!(u.reply_to_message_id(), Some(4));
    assert_eq!(u.reply_to_message_from_user_id(), Some(66));
    assert_eq!(u.forward_from_id(), Some(12));
    assert_eq!(u.forward_from_chat_id(), Some(-500));
}

#[test]
fn test_group_detection() {
    let group = update(json!({
        "message": {"text": "x", "chat": {"id": -5, "type": "supergroup", "title": "Rustaceans"}}
    }));
    assert!(group.message_from_group());
    assert_eq!(group.message_from_group_title(), Some("Rustaceans"));

    let private = update(json!({
        "message": {"text": "x", "chat": {"id": 5, "type": "private", "title": "ignored"}}
    }));
    assert!(!private.message_from_group());
    assert_eq!(private.message_from_group_title(), None);
}

#[test]
fn test_sender_typed_view() {
    let u = update(json!({
        "message": {"text": "x", "chat": {"id": 1}, "from": {"id": 7, "first_name": "A", "username": "aa"}}
    }));
    let sender = u.sender().unwrap();
    assert_eq!(sender.id, 7);
    assert!(!sender.is_bot);
    assert_eq!(sender.username.as_deref(), Some("aa"));
    assert_eq!(u.last_name(), None);
}

#[test]
fn test_end_to_end_sample_body() {
    let body = br#"{"update_id":100,"message":{"message_id":1,"chat":{"id":42,"type":"private"},"text":"hi","from":{"id":7,"first_name":"A"}}}"#;
    let u = Update::from_slice(body).unwrap();
    assert_eq!(u.kind(), Some(UpdateKind::Message));
    assert_eq!(u.chat_id(), Some(42));
    assert_eq!(u.text(), Some("hi"));
    assert!(!u.message_from_group());
    assert_eq!(u.update_id(), Some(100));
    assert_eq!(u.first_name(), Some("A"));
    assert_eq!(u.user_id(), Some(7));
}

#[test]
fn test_from_slice_rejects_garbage() {
    assert!(matches!(
        Update::from_slice(b"not json"),
        Err(CourierError::Decode(_))
    ));
    assert!(matches!(
        Update::from_slice(b"[1,2,3]"),
        Err(CourierError::Decode(_))
    ));
}

#[test]
fn test_serde_is_transparent() {
    let raw = json!({"update_id": 5, "message": {"text": "hey"}});
    let u: Update = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(u.kind(), Some(UpdateKind::Message));
    assert_eq!(serde_json::to_value(&u).unwrap(), raw);
}

#[test]
fn test_batch_from_response() {
    let batch = UpdateBatch::from_response(json!({
        "ok": true,
        "result": [
            {"update_id": 5, "message": {"text": "a"}},
            {"update_id": 6, "callback_query": {"id": "c"}}
        ]
    }));
    assert!(batch.is_ok());
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.last_update_id(), Some(6));
    assert_eq!(batch.get(1).and_then(Update::kind), Some(UpdateKind::CallbackQuery));
    let ids: Vec<_> = batch.updates().iter().filter_map(Update::update_id).collect();
    assert_eq!(ids, vec![5, 6]);
}

#[test]
fn test_batch_from_failure_envelope() {
    let batch = UpdateBatch::from_response(json!({
        "ok": false,
        "error_code": 409,
        "description": "Conflict: terminated by other getUpdates request"
    }));
    assert!(!batch.is_ok());
    assert!(batch.is_empty());
    assert_eq!(batch.last_update_id(), None);
    assert!(batch.description().unwrap().starts_with("Conflict"));

    let null = UpdateBatch::from_response(Value::Null);
    assert!(null.is_empty());
    assert!(!null.is_ok());
}
