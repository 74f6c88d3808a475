//! Canned HTTP server for exercising the adapters without real services.
//!
//! The server answers one response per connection, either from a fixed
//! sequence or derived from the request, and records each raw request so
//! tests can inspect headers and bodies.

#![expect(
    clippy::expect_used,
    reason = "test support uses expect for readable failures"
)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Local server replaying canned HTTP responses.
pub struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Start a server answering `responses` in order.
    pub fn start(responses: Vec<String>) -> Self {
        let count = responses.len();
        let queue = Mutex::new(responses.into_iter());
        Self::respond_with(count, move |_| {
            queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .next()
                .unwrap_or_default()
        })
    }

    /// Start a server answering `count` connections with the response
    /// `responder` derives from each raw request.
    pub fn respond_with<F>(count: usize, responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        // The worker exits once every response is served; a test that
        // expects fewer requests leaves it parked in `accept`.
        thread::spawn(move || {
            for _ in 0..count {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                let response = responder(&request);
                recorded
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(request);
                let _ignored = stream.write_all(response.as_bytes());
            }
        });
        Self {
            base_url: format!("http://{address}"),
            requests,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Raw requests received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Render an HTTP/1.1 response that closes the connection.
pub fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}

fn read_request(stream: &mut impl Read) -> String {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let Ok(read) = stream.read(&mut chunk) else {
            break;
        };
        if read == 0 {
            break;
        }
        received.extend(chunk.iter().take(read));
        if request_complete(&received) {
            break;
        }
    }
    String::from_utf8_lossy(&received).into_owned()
}

fn request_complete(received: &[u8]) -> bool {
    let text = String::from_utf8_lossy(received);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}
