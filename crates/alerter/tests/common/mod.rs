//! Shared fixtures for alerter integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;

use frostwatch_alerter::forecast::OpenWeatherClient;
use frostwatch_notify::{AlertChannel, NotificationError};

/// Serve `app` on an ephemeral localhost port and return its address.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Forecast client pointed at a test server's `/forecast` route.
pub fn client_for(addr: SocketAddr, timeout: Duration) -> OpenWeatherClient {
    OpenWeatherClient::new(
        format!("http://{addr}/forecast"),
        "test-key".to_string(),
        timeout,
    )
    .expect("client builds")
}

/// Build an OpenWeather-shaped body from `(dt, temp)` pairs.
pub fn forecast_body(entries: &[(i64, f64)]) -> String {
    let list: Vec<_> = entries
        .iter()
        .map(|(dt, temp)| serde_json::json!({ "dt": dt, "main": { "temp": temp } }))
        .collect();
    serde_json::json!({ "cod": "200", "list": list }).to_string()
}

/// In-memory channel that records every send and can be told to fail.
pub struct RecordingChannel {
    name: &'static str,
    fail: bool,
    sent: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn ok(name: &'static str) -> Arc<Self> {
        Self::build(name, false)
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Self::build(name, true)
    }

    fn build(name: &'static str, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, _subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(body.to_string());
        if !self.fail {
            return Ok(());
        }
        match self.name {
            "topic" => Err(NotificationError::Publish(
                "NotFound: simulated".to_string(),
            )),
            _ => Err(NotificationError::Email(
                "MessageRejected: simulated".to_string(),
            )),
        }
    }
}
