//! Tests for the HTTP transport, against a local mock Bot API.

use super::*;
use courier_core::{
    config::{ProxyConfig, ProxyType},
    params::InputFile,
};
use mockito::Matcher;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const TOKEN: &str = "123456:test-token";

fn config_for(server_url: &str) -> BotConfig {
    let mut cfg = BotConfig::with_token(TOKEN);
    cfg.api_base_url = server_url.to_string();
    cfg
}

fn path(endpoint: &str) -> String {
    format!("/bot{TOKEN}/{endpoint}")
}

#[test]
fn test_split_chat_id_moves_text_chat_id() {
    let params = Params::new().with("chat_id", 42i64).with("text", "hi");
    let (chat_id, body) = split_chat_id(&params);
    assert_eq!(chat_id.as_deref(), Some("42"));
    assert!(!body.contains_key("chat_id"));
    assert_eq!(body.get("text").and_then(Param::as_text), Some("hi"));
}

#[test]
fn test_split_chat_id_without_chat_id() {
    let params = Params::new().with("offset", 3i64);
    let (chat_id, body) = split_chat_id(&params);
    assert!(chat_id.is_none());
    assert_eq!(body, params);
}

#[test]
fn test_failure_body_is_decodable() {
    let body = failure_body(code::TIMEOUT, "operation timed out");
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["ok"], false);
    assert_eq!(v["error_code"], 28);
    assert_eq!(v["description"], "operation timed out");
}

#[test]
fn test_new_rejects_invalid_token() {
    let cfg = BotConfig::with_token("not-a-token");
    assert!(matches!(
        HttpTransport::new(&cfg),
        Err(CourierError::Config(_))
    ));
}

#[tokio::test]
async fn test_post_moves_chat_id_to_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_query(Matcher::UrlEncoded("chat_id".into(), "42".into()))
        .match_body(Matcher::UrlEncoded("text".into(), "hello world".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"message_id":9}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let params = Params::new().with("chat_id", 42i64).with("text", "hello world");
    let body = transport.send("sendMessage", &params, true).await;

    mock.assert_async().await;
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["result"]["message_id"], 9);
}

#[tokio::test]
async fn test_get_ignores_params() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", path("getMe").as_str())
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"Bot"}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let params = Params::new().with("chat_id", 1i64);
    let body = transport.send("getMe", &params, false).await;

    mock.assert_async().await;
    assert!(body.contains(r#""first_name":"Bot""#));
}

#[tokio::test]
async fn test_api_error_body_passes_through() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let params = Params::new().with("chat_id", 0i64).with("text", "x");
    let body = transport.send("sendMessage", &params, true).await;
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["error_code"], 400);
    assert_eq!(v["description"], "Bad Request: chat not found");
}

#[tokio::test]
async fn test_multipart_upload_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("raw.bin");
    std::fs::write(&file_path, b"fake png bytes").unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("sendPhoto").as_str())
        .match_query(Matcher::UrlEncoded("chat_id".into(), "7".into()))
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="cat.png""#.into()),
            Matcher::Regex("(?i)content-type: image/png".into()),
            Matcher::Regex(r#"name="caption""#.into()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let params = Params::new()
        .with("chat_id", 7i64)
        .with("caption", "a cat")
        .with(
            "photo",
            InputFile::new(&file_path)
                .file_name("cat.png")
                .mime_type("image/png"),
        );
    let body = transport.send("sendPhoto", &params, true).await;

    mock.assert_async().await;
    assert!(body.contains(r#""ok":true"#));
}

#[tokio::test]
async fn test_missing_upload_file_synthesizes_failure() {
    let transport = HttpTransport::new(&config_for("http://127.0.0.1:9")).unwrap();
    let params = Params::new().with("document", InputFile::new("/nonexistent/__courier__.pdf"));
    let body = transport.send("sendDocument", &params, true).await;
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["ok"], false);
    assert_eq!(v["error_code"], code::LOCAL_FILE);
}

#[tokio::test]
async fn test_unreachable_host_synthesizes_failure() {
    // Port 1 on loopback: nothing listens there, the connect is refused.
    let transport = HttpTransport::new(&config_for("http://127.0.0.1:1")).unwrap();
    let body = transport.send("getMe", &Params::new(), false).await;

    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["ok"], false);
    assert!(v["error_code"].as_i64().is_some());
    let description = v["description"].as_str().unwrap();
    assert!(!description.is_empty());
    assert!(
        !description.contains("test-token"),
        "token leaked into error: {description}"
    );
}

#[tokio::test]
async fn test_download_streams_to_file() {
    let payload = vec![7u8; 20_000];
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/file/bot{TOKEN}/photos/file_1.jpg").as_str())
        .with_status(200)
        .with_body(payload.clone())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.jpg");
    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let written = transport.download("photos/file_1.jpg", &dest).await.unwrap();

    mock.assert_async().await;
    assert_eq!(written, 20_000);
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
}

#[tokio::test]
async fn test_download_not_found_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/file/bot{TOKEN}/missing.bin").as_str())
        .with_status(404)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing.bin");
    let transport = HttpTransport::new(&config_for(&server.url())).unwrap();
    let err = transport.download("missing.bin", &dest).await.unwrap_err();
    assert!(matches!(err, CourierError::Transport(_)));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_requests_go_through_configured_proxy() {
    let mut proxy = mockito::Server::new_async().await;
    let mock = proxy
        .mock("GET", Matcher::Regex(format!("/bot{TOKEN}/getMe$")))
        .match_header("proxy-authorization", Matcher::Regex("^Basic ".into()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .create_async()
        .await;

    let addr = proxy.socket_address();
    let mut cfg = config_for("http://api.telegram.invalid");
    cfg.proxy = Some(ProxyConfig {
        url: Some(addr.ip().to_string()),
        port: Some(addr.port()),
        proxy_type: Some(ProxyType::Http),
        auth: Some("alice:pw".into()),
    });

    let transport = HttpTransport::new(&cfg).unwrap();
    let body = transport.send("getMe", &Params::new(), false).await;

    mock.assert_async().await;
    assert_eq!(body, r#"{"ok":true,"result":{}}"#);
}

#[tokio::test]
async fn test_download_truncated_body_removes_partial_file() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n0123456789")
            .await
            .unwrap();
        socket.flush().await.unwrap();
        // Dropping the socket cuts the body short.
    });

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("partial.bin");
    let transport = HttpTransport::new(&config_for(&format!("http://{addr}"))).unwrap();
    let err = transport
        .download("documents/file_2.bin", &dest)
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, CourierError::Transport(_)));
    assert!(!dest.exists());
}
