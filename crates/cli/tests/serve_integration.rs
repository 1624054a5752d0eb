//! Integration tests for the `autosave serve` HTTP surface.
//!
//! Each test starts the server as a child process on a unique port,
//! makes HTTP requests, and verifies the responses.

use std::io::Read;
use std::net::TcpStream;
use std::process::{Child, Command};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

/// Hands out listening ports. Each test binary starts from a range keyed
/// on its pid.
fn next_port() -> u16 {
    static PORTS: OnceLock<AtomicU16> = OnceLock::new();
    PORTS
        .get_or_init(|| AtomicU16::new(24000 + (std::process::id() % 16000) as u16))
        .fetch_add(1, Ordering::Relaxed)
}

/// Kills the server when the test ends, pass or fail.
struct Server(Child);

impl Drop for Server {
    fn drop(&mut self) {
        self.0.kill().ok();
        self.0.wait().ok();
    }
}

fn start_server(port: u16) -> Server {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_autosave"));
    cmd.args(["serve", "--host", "127.0.0.1", "--port", &port.to_string()]);
    cmd.env_remove("AUTOSAVE_HOST").env_remove("AUTOSAVE_PORT");
    cmd.stdout(std::process::Stdio::null());
    cmd.stderr(std::process::Stdio::null());

    let child = cmd.spawn().expect("failed to start autosave serve");
    for _ in 0..50 {
        if TcpStream::connect(format!("127.0.0.1:{}", port)).is_ok() {
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    Server(child)
}

/// Send a raw HTTP/1.1 request and return (status, body).
fn http_request(port: u16, method: &str, path: &str, form: Option<&str>) -> (u16, String) {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port)).expect("failed to connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let request = match form {
        Some(body) => format!(
            "{} {} HTTP/1.1\r\nHost: localhost:{}\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            method, path, port, body.len(), body
        ),
        None => format!(
            "{} {} HTTP/1.1\r\nHost: localhost:{}\r\nConnection: close\r\n\r\n",
            method, path, port
        ),
    };
    std::io::Write::write_all(&mut stream, request.as_bytes()).expect("failed to write");

    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);
    parse_http_response(&response)
}

fn parse_http_response(response: &str) -> (u16, String) {
    let (headers, body) = response.split_once("\r\n\r\n").unwrap_or((response, ""));
    let status = headers
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(0);

    let chunked = headers
        .to_ascii_lowercase()
        .contains("transfer-encoding: chunked");
    let body = if chunked {
        decode_chunked(body)
    } else {
        body.to_string()
    };
    (status, body)
}

fn decode_chunked(mut remaining: &str) -> String {
    let mut result = String::new();
    while let Some(line_end) = remaining.find("\r\n") {
        let size = match usize::from_str_radix(remaining[..line_end].trim(), 16) {
            Ok(0) | Err(_) => break,
            Ok(s) => s,
        };
        let start = line_end + 2;
        let end = (start + size).min(remaining.len());
        result.push_str(&remaining[start..end]);
        remaining = remaining.get(end + 2..).unwrap_or("");
    }
    result
}

#[test]
fn health_returns_200() {
    let port = next_port();
    let _server = start_server(port);

    let (status, body) = http_request(port, "GET", "/health", None);

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
    assert_eq!(json["status"], "ok");
}

#[test]
fn index_serves_the_editing_page() {
    let port = next_port();
    let _server = start_server(port);

    let (status, body) = http_request(port, "GET", "/", None);

    assert_eq!(status, 200);
    assert!(body.contains("Auto-Save Fields Demo"));
    assert!(body.contains(r#"hx-put="/item/1/field/priority""#));
    assert!(body.contains(r#"hx-post="/item/1/sort/steps""#));
}

#[test]
fn priority_update_persists_for_the_process() {
    let port = next_port();
    let _server = start_server(port);

    let (status, body) = http_request(
        port,
        "PUT",
        "/item/1/field/priority",
        Some("priority_text=High&item_id=1"),
    );
    assert_eq!(status, 200);
    assert!(body.contains(r#"<option value="High" selected>"#));

    let (_, page) = http_request(port, "GET", "/", None);
    assert!(page.contains(r#"<option value="High" selected>"#));
}

#[test]
fn empty_name_is_rejected() {
    let port = next_port();
    let _server = start_server(port);

    let (status, body) = http_request(
        port,
        "PUT",
        "/item/1/field/name",
        Some("name_text=&item_id=1"),
    );
    assert_eq!(status, 400);
    assert_eq!(body, "Empty value not allowed");
}

#[test]
fn steps_reorder_persists_for_the_process() {
    let port = next_port();
    let _server = start_server(port);

    let (status, _) = http_request(
        port,
        "POST",
        "/item/1/sort/steps",
        Some("steps_text=Step%203&steps_text=Step%201&steps_text=Step%202&item_id=1"),
    );
    assert_eq!(status, 200);

    let (_, page) = http_request(port, "GET", "/", None);
    let p3 = page.find("<span>Step 3</span>").expect("step 3");
    let p1 = page.find("<span>Step 1</span>").expect("step 1");
    let p2 = page.find("<span>Step 2</span>").expect("step 2");
    assert!(p3 < p1 && p1 < p2);
}
