// crates/provider-contract/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Stub HTTP servers for provider-contract integration tests.
// Purpose: Capture outgoing requests and serve scripted Provider responses.
// Dependencies: tiny_http, serde_json, url
// ============================================================================

//! ## Overview
//! [`StubServer`] runs a `tiny_http` server on a background thread, records
//! every request it receives, and answers through a handler closure.
//! [`provider_emulator`] is a handler that mimics the Provider wire contract
//! with an in-memory list so full suites can run without the real service.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    reason = "Shared helpers are reused across test binaries with panic-based setup."
)]

use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use provider_contract::Provider;
use provider_contract::build_auth_header;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::form_urlencoded;

// ============================================================================
// SECTION: Captured Requests
// ============================================================================

/// Request as observed by the stub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// HTTP method, uppercase.
    pub method: String,
    /// Request path including query.
    pub path: String,
    /// Authorization header value, if present.
    pub authorization: Option<String>,
    /// Content-Type header value, if present.
    pub content_type: Option<String>,
    /// Raw request body.
    pub body: String,
}

/// Scripted reply returned by a handler.
#[derive(Debug, Clone)]
pub struct StubReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl StubReply {
    /// JSON reply with the given status.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string(),
        }
    }

    /// Plain reply with the given status and body text.
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Handler invoked for every request.
pub type StubHandler = Arc<dyn Fn(&CapturedRequest) -> StubReply + Send + Sync>;

// ============================================================================
// SECTION: Stub Server
// ============================================================================

/// Background HTTP server recording every request.
pub struct StubServer {
    server: Arc<Server>,
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    join: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    /// Starts a stub server on a free loopback port.
    pub fn start(handler: StubHandler) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub server"));
        let addr = server.server_addr().to_ip().expect("ip listener");
        let base_url = format!("http://{addr}");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let join = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let captured = capture(&mut request);
                    requests.lock().unwrap().push(captured.clone());
                    let reply = handler(&captured);
                    let content_type =
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap();
                    let response = Response::from_string(reply.body)
                        .with_status_code(reply.status)
                        .with_header(content_type);
                    let _ = request.respond(response);
                }
            })
        };
        Self {
            server,
            base_url,
            requests,
            join: Some(join),
        }
    }

    /// Starts a stub server that always returns the same reply.
    pub fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(Arc::new(move |_: &CapturedRequest| StubReply::text(status, &body)))
    }

    /// Returns the server base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the captured requests in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn capture(request: &mut tiny_http::Request) -> CapturedRequest {
    let header = |name: &'static str| {
        request
            .headers()
            .iter()
            .find(|header| header.field.equiv(name))
            .map(|header| header.value.as_str().to_string())
    };
    let authorization = header("Authorization");
    let content_type = header("Content-Type");
    let method = request.method().as_str().to_uppercase();
    let path = request.url().to_string();
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    CapturedRequest {
        method,
        path,
        authorization,
        content_type,
        body,
    }
}

// ============================================================================
// SECTION: Provider Emulator
// ============================================================================

/// In-memory Provider store used by [`provider_emulator`].
#[derive(Debug, Default)]
struct EmulatorState {
    providers: Vec<Provider>,
    next_id: i64,
}

/// Returns a handler emulating the Provider service for the given credentials.
///
/// Requests whose Authorization value differs from the split base64 header
/// for `username`/`password` receive 401 with an empty body.
pub fn provider_emulator(username: &str, password: &str) -> StubHandler {
    let expected_auth = build_auth_header(username, password);
    let state = Mutex::new(EmulatorState {
        providers: Vec::new(),
        next_id: 1,
    });
    Arc::new(move |request: &CapturedRequest| {
        if request.authorization.as_deref() != Some(expected_auth.as_str()) {
            return StubReply::text(401, "");
        }
        let mut state = state.lock().unwrap();
        let segments: Vec<&str> =
            request.path.trim_start_matches('/').split('/').filter(|s| !s.is_empty()).collect();
        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["provider"]) => {
                StubReply::json(200, &json!({ "data": state.providers, "success": true }))
            }
            ("POST", ["provider"]) => {
                let Some((name, price)) = parse_form(&request.body) else {
                    return StubReply::json(400, &json!({ "success": false }));
                };
                let provider = Provider {
                    id: state.next_id,
                    name,
                    price,
                };
                state.next_id += 1;
                state.providers.push(provider.clone());
                StubReply::json(200, &json!({ "data": provider, "success": true }))
            }
            ("PUT", ["provider", id]) => {
                let Some((name, price)) = parse_form(&request.body) else {
                    return StubReply::json(400, &json!({ "success": false }));
                };
                let id: i64 = id.parse().unwrap_or(-1);
                match state.providers.iter_mut().find(|provider| provider.id == id) {
                    Some(provider) => {
                        provider.name = name;
                        provider.price = price;
                        StubReply::json(200, &json!({ "data": provider, "success": true }))
                    }
                    None => StubReply::json(404, &json!({ "success": false })),
                }
            }
            ("DELETE", ["provider", id]) => {
                let id: i64 = id.parse().unwrap_or(-1);
                let before = state.providers.len();
                state.providers.retain(|provider| provider.id != id);
                if state.providers.len() < before {
                    StubReply::json(200, &json!({ "success": true }))
                } else {
                    StubReply::json(404, &json!({ "success": false }))
                }
            }
            _ => StubReply::json(404, &json!({ "success": false })),
        }
    })
}

/// Parses `name` and `price` from a form body.
fn parse_form(body: &str) -> Option<(String, f64)> {
    let mut name = None;
    let mut price = None;
    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "name" => name = Some(value.into_owned()),
            "price" => price = value.parse::<f64>().ok(),
            _ => {}
        }
    }
    Some((name?, price?))
}
