//! Common test utilities for the synchronization tests
//!
//! Provides an in-process mock record store:
//! - scripted replies per path (status, body, optional delay)
//! - recorded requests per path (method, content type, body)
//! - helpers building sync modules against the mock

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use flightdesk::{BookingSync, CsvExporter, FlightSync};
use flightdesk_client::RecordStoreBuilder;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const FLIGHT_BASE: &str = "/api/flight";
pub const BOOKING_BASE: &str = "/api/booking";

#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
            delay: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/plain",
            body: Vec::new(),
            delay: None,
        }
    }

    pub fn bytes(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: body.to_vec(),
            delay: None,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            content_type: "text/plain",
            body: b"mock failure".to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Recorded {
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn form(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_bytes(&self.body).expect("form-encoded body")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Replies for one path. Queued replies are served in order; the last one
/// keeps being served until a new reply is queued.
#[derive(Default)]
struct Script {
    queue: VecDeque<Reply>,
    last_served: bool,
}

impl Script {
    fn push(&mut self, reply: Reply) {
        if self.last_served && self.queue.len() == 1 {
            self.queue.clear();
        }
        self.last_served = false;
        self.queue.push_back(reply);
    }

    fn next(&mut self) -> Option<Reply> {
        if self.queue.len() > 1 {
            return self.queue.pop_front();
        }
        self.last_served = true;
        self.queue.front().cloned()
    }
}

#[derive(Default)]
struct Inner {
    replies: HashMap<String, Script>,
    requests: HashMap<String, Vec<Recorded>>,
}

type Shared = Arc<Mutex<Inner>>;

pub struct MockStore {
    addr: SocketAddr,
    inner: Shared,
}

impl MockStore {
    pub async fn start() -> Self {
        let inner: Shared = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(inner.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock store");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock store");
        });

        Self { addr, inner }
    }

    pub fn flight_url(&self) -> String {
        format!("http://{}{}", self.addr, FLIGHT_BASE)
    }

    pub fn booking_url(&self) -> String {
        format!("http://{}{}", self.addr, BOOKING_BASE)
    }

    /// Queues a reply for `path`.
    pub fn reply(&self, path: &str, reply: Reply) {
        self.inner
            .lock()
            .unwrap()
            .replies
            .entry(path.to_string())
            .or_default()
            .push(reply);
    }

    pub fn reply_json(&self, path: &str, value: Value) {
        self.reply(path, Reply::json(value));
    }

    pub fn requests(&self, path: &str) -> Vec<Recorded> {
        self.inner
            .lock()
            .unwrap()
            .requests
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests(path).len()
    }

    pub fn last(&self, path: &str) -> Recorded {
        self.requests(path).pop().expect("no request recorded")
    }
}

async fn handle(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let reply = {
        let mut inner = inner.lock().unwrap();
        inner.requests.entry(path.clone()).or_default().push(Recorded {
            method,
            content_type,
            body: body.to_vec(),
        });

        inner.replies.get_mut(&path).and_then(Script::next)
    };

    let Some(reply) = reply else {
        return (StatusCode::NOT_FOUND, format!("no reply scripted for {}", path)).into_response();
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

pub fn flight_sync(mock: &MockStore, export_dir: &Path) -> FlightSync {
    let store = RecordStoreBuilder::new(&mock.flight_url())
        .build_flight_store()
        .unwrap();
    FlightSync::new(store, CsvExporter::new(export_dir))
}

pub fn booking_sync(mock: &MockStore, export_dir: &Path) -> BookingSync {
    let store = RecordStoreBuilder::new(&mock.booking_url())
        .build_booking_store()
        .unwrap();
    BookingSync::new(store, CsvExporter::new(export_dir))
}

pub fn flight_json(id: i64, number: &str, from: &str, to: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "fromCity": from,
        "toCity": to,
        "departure": "2025-03-01T10:00:00+03:00",
        "arrival": "2025-03-01T14:30:00+03:00",
        "passengerCount": 150,
        "ticketPrice": 199.99,
        "createdAt": "2025-02-01T09:15:30",
        "updatedAt": "2025-02-01T09:15:30"
    })
}

pub fn booking_json(id: i64, flight_id: i64, passenger_count: i32, status: &str) -> Value {
    json!({
        "id": id,
        "flightId": flight_id,
        "passengerCount": passenger_count,
        "status": status
    })
}

pub fn statistics_json(total: u64, pending: u64, passengers: u64) -> Value {
    json!({
        "totalBookings": total,
        "pendingBookings": pending,
        "confirmedBookings": total - pending,
        "cancelledBookings": 0,
        "completedBookings": 0,
        "totalPassengers": passengers
    })
}
