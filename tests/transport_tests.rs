// tests/transport_tests.rs

use appsheet_client::{
    HttpHandler, ReqwestHandler, TransportError,
    transport::{ACCESS_KEY_HEADER, interpret_response},
};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

#[test]
fn test_ok_response_is_returned() {
    let value = interpret_response(StatusCode::OK, r#"[{"key":"value"}]"#).unwrap();
    assert_eq!(value, json!([{"key": "value"}]));
}

#[test]
fn test_ok_response_unwraps_rows() {
    let body = r#"{"Rows":[{"ID":"1"}],"Properties":{}}"#;
    let value = interpret_response(StatusCode::OK, body).unwrap();
    assert_eq!(value, json!([{"ID": "1"}]));
}

#[test]
fn test_error_status_uses_message() {
    let body = r#"{"Message":"Bad table name"}"#;
    let err = interpret_response(StatusCode::BAD_REQUEST, body).unwrap_err();

    match &err {
        TransportError::Status { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Bad table name");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Bad table name. HttpStatus: 400");
}

#[test]
fn test_error_status_without_json_body() {
    let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "upstream down\n").unwrap_err();
    assert_eq!(err.to_string(), "upstream down. HttpStatus: 500");
}

#[test]
fn test_ok_with_invalid_json_is_decode_error() {
    let err = interpret_response(StatusCode::OK, "[{\"key\":").unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

// ============================================================================
// Wire format
// ============================================================================

/// Accepts one connection, answers with `reply` and returns the raw request.
async fn serve_once(listener: TcpListener, reply: &'static str) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the body arrived");
        request.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&request);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if request.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        reply.len(),
        reply
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    String::from_utf8(request).unwrap()
}

#[tokio::test]
async fn test_post_sends_json_body_and_headers() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/apps/app-id/tables/Products/Action", listener.local_addr().unwrap());
    let server = tokio::spawn(serve_once(listener, r#"{"Rows":[{"ID":"1"}]}"#));

    let body = json!({"Action": "Find", "Properties": {}, "Rows": []});
    let handler = ReqwestHandler::with_client(Client::builder().no_proxy().build().unwrap());
    let rows = handler.post(&url, "secret", &body).await.unwrap();
    assert_eq!(rows, json!([{"ID": "1"}]));

    let request = server.await.unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /apps/app-id/tables/Products/Action "));
    assert!(lower.contains("content-type: application/json"));
    assert!(lower.contains(&format!("{}: secret", ACCESS_KEY_HEADER.to_ascii_lowercase())));

    let (_, sent) = request.split_once("\r\n\r\n").unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(sent).unwrap(), body);
}
