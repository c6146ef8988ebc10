//! Minimal HTTP/1.1 server standing in for the ingest API.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rstest::fixture;

#[allow(dead_code)]
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[fixture]
pub fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        202 => "Accepted",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn parse_header_line(line: &str) -> Option<(String, String)> {
    line.trim()
        .split_once(':')
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_owned()))
}

fn read_http_request(stream: &mut TcpStream) -> CapturedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let path = parts.next().unwrap_or_default().to_owned();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = parse_header_line(&line) else {
            continue;
        };
        if key == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.push((key, value));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("read body");

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

/// Serve one request per status in `statuses`, in order, then stop.
///
/// Every response closes the connection so the client's agent never
/// reuses a socket the server has stopped reading from.
pub fn spawn_ingest_server(
    listener: TcpListener,
    statuses: Vec<u16>,
) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for status in statuses {
            let Ok((mut stream, _)) = listener.accept() else {
                break;
            };
            let captured = read_http_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status,
                status_text(status)
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(captured);
        }
    });

    (addr, rx)
}

/// Answer a single request with `reply` verbatim, then close.
#[allow(dead_code)]
pub fn spawn_raw_server(
    listener: TcpListener,
    reply: &'static [u8],
) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let captured = read_http_request(&mut stream);
            let _ = stream.write_all(reply);
            let _ = tx.send(captured);
        }
    });

    (addr, rx)
}
