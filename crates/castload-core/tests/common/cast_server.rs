//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes, each with its own status, Content-Type and
//! optional gzip Content-Encoding. Request heads are recorded so tests can
//! check what the client sent.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use flate2::write::GzEncoder;
use flate2::Compression;

#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub status: &'static str,
    pub content_type: Option<String>,
    /// Compress the body and send `Content-Encoding: gzip`.
    pub gzip: bool,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(path: &str, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.to_string(),
            status: "200 OK",
            content_type: Some(content_type.to_string()),
            gzip: false,
            body: body.into(),
        }
    }

    pub fn gzipped(mut self) -> Self {
        self.gzip = true;
        self
    }

    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    pub fn with_status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }
}

pub struct CastServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CastServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `routes` receives the base URL so
/// bodies can link back to the server. The server runs until the process exits.
pub fn start<F>(routes: F) -> CastServer
where
    F: FnOnce(&str) -> Vec<Route>,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);
    let routes = Arc::new(routes(&base));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    CastServer { base, requests }
}

fn handle(mut stream: std::net::TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&head).into_owned();
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(request);

    let route = match routes.iter().find(|r| r.path == path) {
        Some(r) => r,
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
    };

    let body = if route.gzip {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&route.body).unwrap();
        enc.finish().unwrap()
    } else {
        route.body.clone()
    };

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        body.len()
    );
    if let Some(ct) = &route.content_type {
        response.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if route.gzip {
        response.push_str("Content-Encoding: gzip\r\n");
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
}
