//! Shared test infrastructure: a minimal in-process HTTP server that replays
//! a canned JSON response and captures every raw request it receives, plus
//! fixture builders for proposals and viewers.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use closer_governance::proposal::Viewer;

pub struct TestServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server that answers every request with `200 OK` and `body`.
    pub async fn spawn(body: &str) -> Self {
        Self::spawn_with_status("200 OK", body).await
    }

    pub async fn spawn_with_status(status_line: &str, body: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("read addr");
        let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );

        let log = requests.clone();
        let handle = tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let request = read_request(&mut socket).await;
                log.lock().unwrap().push(request);
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        TestServer {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// All raw requests received so far (request line, headers, body).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Read one HTTP request, honoring Content-Length for bodies.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(header_end) = find_header_end(&buf) {
                    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Extract the JSON body of a captured request.
pub fn body_of(request: &str) -> serde_json::Value {
    let body = request
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("");
    serde_json::from_str(body).expect("request body should be JSON")
}

/// Proposal JSON as the remote API would return it.
pub fn proposal_json(
    status: &str,
    created_by: &str,
    end_date: Option<DateTime<Utc>>,
) -> String {
    let mut value = json!({
        "_id": "p1",
        "slug": "test-proposal",
        "title": "Test Proposal",
        "description": "A proposal body.",
        "status": status,
        "created": "2026-01-01T00:00:00Z",
        "createdBy": created_by,
        "votes": {"yes": 3, "no": 1, "abstain": 1}
    });
    if let Some(end) = end_date {
        value["startDate"] = json!(end - chrono::Duration::days(7));
        value["endDate"] = json!(end);
    }
    value.to_string()
}

pub fn citizen(user_id: &str) -> Viewer {
    Viewer {
        user_id: user_id.to_string(),
        roles: vec!["citizen".to_string()],
        voting_power: 1.0,
    }
}

pub fn member(user_id: &str) -> Viewer {
    Viewer {
        user_id: user_id.to_string(),
        roles: vec!["member".to_string()],
        voting_power: 0.0,
    }
}
