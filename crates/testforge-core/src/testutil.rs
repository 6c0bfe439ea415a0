//! Minimal in-process HTTP fixture server for async tests.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

/// One-response-fits-all TCP server bound to an ephemeral local port.
///
/// Serves every connection with the configured status/content-type/body,
/// optionally after a delay. The accept loop runs on a background thread for
/// the life of the test process.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    pub fn respond_with(status: u16, content_type: &str, body: &str) -> Self {
        Self::spawn(Duration::ZERO, status, content_type, body)
    }

    pub fn respond_after(delay: Duration, status: u16, content_type: &str, body: &str) -> Self {
        Self::spawn(delay, status, content_type, body)
    }

    fn spawn(delay: Duration, status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let content_type = content_type.to_owned();
        let body = body.to_owned();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let _ = serve_one(&mut stream, delay, status, &content_type, &body);
            }
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn serve_one(
    stream: &mut TcpStream,
    delay: Duration,
    status: u16,
    content_type: &str,
    body: &str,
) -> std::io::Result<()> {
    read_request(stream)?;
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
    let response = format!(
        "HTTP/1.1 {status} Fixture\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes())
}

/// Drain the request head plus any Content-Length body.
fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            line.to_ascii_lowercase()
                .strip_prefix("content-length:")
                .and_then(|v| v.trim().parse::<usize>().ok())
        })
        .unwrap_or(0);

    let mut remaining = content_length.saturating_sub(buf.len() - (head_end + 4));
    while remaining > 0 {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        remaining = remaining.saturating_sub(n);
    }
    Ok(())
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
