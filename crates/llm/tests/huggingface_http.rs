//! Hugging Face client against a local HTTP stub.

use ragnarok_core::ApiToken;
use ragnarok_llm::{HuggingFaceClient, LlmClient, LlmError, LlmRequest};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Raw request captured by the stub.
struct Captured {
    head: String,
    body: String,
}

/// Serve exactly one request with the given status line and body.
async fn serve_once(
    status_line: &'static str,
    response_body: &'static str,
) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            response_body.len(),
            response_body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(Captured { head, body });
    });

    (format!("http://{}/models/test-model", addr), rx)
}

#[tokio::test]
async fn test_successful_generation_sends_token_and_parameters() {
    let (endpoint, captured) =
        serve_once("HTTP/1.1 200 OK", r#"[{"generated_text": "LOT is Lightcast's taxonomy."}]"#).await;

    let client = HuggingFaceClient::with_endpoint(endpoint, "test-model", ApiToken::new("hf_stub_token"));
    let request = LlmRequest::new("What is LOT?")
        .with_max_tokens(500)
        .with_temperature(0.7)
        .with_top_p(0.9);

    let response = client.complete(&request).await.unwrap();
    assert_eq!(response.content, "LOT is Lightcast's taxonomy.");
    assert_eq!(response.model, "test-model");

    let captured = captured.await.unwrap();
    let head = captured.head.to_lowercase();
    assert!(head.starts_with("post /models/test-model"));
    assert!(head.contains("authorization: bearer hf_stub_token"));

    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["inputs"], "What is LOT?");
    assert_eq!(body["parameters"]["max_new_tokens"], 500);
    assert_eq!(body["parameters"]["return_full_text"], false);
    assert_eq!(body["options"]["wait_for_model"], true);
}

#[tokio::test]
async fn test_service_unavailable_is_status_error() {
    let (endpoint, _captured) = serve_once(
        "HTTP/1.1 503 Service Unavailable",
        r#"{"error": "Model is currently loading"}"#,
    )
    .await;

    let client = HuggingFaceClient::with_endpoint(endpoint, "test-model", ApiToken::new("hf_stub_token"));
    let err = client.complete(&LlmRequest::new("q")).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.raw_body().unwrap().contains("currently loading"));
    assert!(!err.to_string().contains("hf_stub_token"));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (endpoint, _captured) = serve_once("HTTP/1.1 200 OK", "upstream hiccup").await;

    let client = HuggingFaceClient::with_endpoint(endpoint, "test-model", ApiToken::new("t"));
    let err = client.complete(&LlmRequest::new("q")).await.unwrap_err();

    match err {
        LlmError::Decode { body, .. } => assert_eq!(body, "upstream hiccup"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HuggingFaceClient::with_endpoint(
        format!("http://{}/models/x", addr),
        "x",
        ApiToken::new("hf_secret"),
    );
    let err = client.complete(&LlmRequest::new("q")).await.unwrap_err();

    assert!(matches!(err, LlmError::Transport(_)));
    assert!(!err.to_string().contains("hf_secret"));
}
