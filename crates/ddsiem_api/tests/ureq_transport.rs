use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use ddsiem_api::ureq_transport::UreqTransport;
use ddsiem_api::{HttpRequest, Transport};
use ddsiem_core::config::DatadogConfig;

/// Serve one canned response on 127.0.0.1 and hand back the raw request head.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    serve_raw(status_line, body.len(), body)
}

/// Like `serve_once`, but the advertised Content-Length may differ from the bytes sent.
fn serve_raw(
    status_line: &'static str,
    content_length: usize,
    body: &'static str,
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n{body}"
        );
        stream.write_all(response.as_bytes()).expect("write");
        String::from_utf8_lossy(&buf).to_string()
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn sends_key_headers_and_decodes_json() {
    let (url, handle) = serve_once("HTTP/1.1 200 OK", r#"{"data":[{"id":"1"}]}"#);
    let config = DatadogConfig::new(&url, "api-123", "app-456", true);
    let transport = UreqTransport::new(&config).expect("transport");

    let resp = transport
        .execute(&HttpRequest::get("/api/v2/incidents").with_query("page[size]", "1"))
        .expect("call");
    assert_eq!(resp["data"][0]["id"], "1");

    let head = handle.join().expect("server").to_lowercase();
    assert!(head.starts_with("get /api/v2/incidents?page"), "{head}");
    assert!(head.contains("dd-api-key: api-123"));
    assert!(head.contains("dd-application-key: app-456"));
}

#[test]
fn error_status_becomes_api_error_with_body() {
    let (url, handle) = serve_once("HTTP/1.1 403 Forbidden", r#"{"errors":["Forbidden"]}"#);
    let config = DatadogConfig::new(&url, "bad", "bad", true);
    let transport = UreqTransport::new(&config).expect("transport");

    let err = transport
        .execute(&HttpRequest::get("/api/v1/events/1"))
        .expect_err("should fail");
    handle.join().expect("server");

    assert_eq!(err.code, "DD_API_ERROR");
    assert!(!err.retryable);
    let details = err.details.unwrap_or_default();
    assert!(details.contains("status=403"), "{details}");
    assert!(details.contains("Forbidden"), "{details}");
}

#[test]
fn unreadable_error_body_is_reported_in_details() {
    // Advertise more bytes than are sent so reading the body fails mid-stream.
    let (url, handle) = serve_raw("HTTP/1.1 500 Internal Server Error", 512, r#"{"errors":"#);
    let config = DatadogConfig::new(&url, "k", "a", true);
    let transport = UreqTransport::new(&config).expect("transport");

    let err = transport
        .execute(&HttpRequest::get("/api/v2/incidents"))
        .expect_err("should fail");
    handle.join().expect("server");

    assert_eq!(err.code, "DD_API_ERROR");
    assert!(err.retryable);
    let details = err.details.unwrap_or_default();
    assert!(details.contains("status=500"), "{details}");
    assert!(details.contains("body=<unreadable:"), "{details}");
}

#[test]
fn unreachable_host_is_flagged_retryable() {
    // Bind then drop to get a port with nothing listening.
    let port = TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port();
    let config = DatadogConfig::new(&format!("http://127.0.0.1:{port}"), "k", "a", true);
    let transport = UreqTransport::new(&config).expect("transport");

    let err = transport
        .execute(&HttpRequest::get("/api/v1/hosts"))
        .expect_err("should fail");
    assert_eq!(err.code, "DD_UNREACHABLE");
    assert!(err.retryable);
}
