// src/test_support.rs
// =============================================================================
// A tiny HTTP/1.1 server for tests.
//
// Serves a fixed map of path -> response from a background thread and counts
// how many times each path was requested. Query strings are ignored when
// routing, so "/c.png?v=2" is served by the "/c.png" route. A "stall"
// route accepts the request and never answers, for timeout tests.
// =============================================================================

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
struct Route {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    stall: bool,
}

type Hits = Arc<Mutex<HashMap<String, usize>>>;

#[derive(Default)]
pub struct TestServerBuilder {
    routes: HashMap<String, Route>,
}

impl TestServerBuilder {
    pub fn html(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status: 200,
                content_type: "text/html; charset=utf-8",
                body: body.as_bytes().to_vec(),
                stall: false,
            },
        );
        self
    }

    pub fn bytes(mut self, path: &str, body: Vec<u8>) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status: 200,
                content_type: "application/octet-stream",
                body,
                stall: false,
            },
        );
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                content_type: "text/plain",
                body: Vec::new(),
                stall: false,
            },
        );
        self
    }

    /// A route that reads the request and then goes silent
    pub fn stall(mut self, path: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status: 200,
                content_type: "text/plain",
                body: Vec::new(),
                stall: true,
            },
        );
        self
    }

    /// Binds to an ephemeral port and serves until the test process exits
    pub fn start(self) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let routes = Arc::new(self.routes);
        let hits: Hits = Arc::default();

        let thread_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&thread_hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });

        TestServer {
            base: Url::parse(&format!("http://127.0.0.1:{}/", port)).expect("base url"),
            hits,
        }
    }
}

pub struct TestServer {
    base: Url,
    hits: Hits,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder::default()
    }

    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).expect("join test path")
    }

    /// Number of requests the server received for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &Hits) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();

    *hits.lock().expect("hits lock").entry(path.clone()).or_insert(0) += 1;

    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        content_type: "text/plain",
        body: b"not found".to_vec(),
        stall: false,
    });

    if route.stall {
        // Hold the connection open well past any client timeout used in tests
        thread::sleep(Duration::from_secs(5));
        return;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
