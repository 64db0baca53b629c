use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use guestbook::clock::Clock;
use guestbook::config::{utc_offset_from_minutes, Config, KvBackend};
use guestbook::state::AppState;
use guestbook::store::{KvStore, MemoryStore, StoreError};

/// 2026-02-06 16:30:00.000 UTC
pub const START_MILLIS: i64 = 1_770_395_400_000;

pub const INDEX_HTML: &str = "<!doctype html><title>guestbook</title>";
pub const APP_JS: &str = "console.log('guestbook');";

/// A running test server with its own static directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub static_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit form-urlencoded data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Clock that advances by one millisecond on every read, so each
/// submission gets its own id.
pub struct SteppingClock {
    next_millis: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next_millis: AtomicI64::new(millis),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap()
    }
}

/// Store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Rejected("namespace unavailable".to_string()))
    }
}

/// Store that panics on write.
pub struct PanickingStore;

#[async_trait]
impl KvStore for PanickingStore {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        panic!("store exploded");
    }
}

pub fn test_config(static_dir: PathBuf, offset_minutes: i32) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        static_dir,
        max_body_size: 4096,
        utc_offset: utc_offset_from_minutes(offset_minutes).unwrap(),
        log_level: "warn".to_string(),
        kv: KvBackend::Memory,
    }
}

/// Spawn a test app backed by a fresh in-memory store.
pub async fn spawn_app() -> (TestApp, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = spawn_app_with(store.clone(), 0).await;
    (app, store)
}

/// Spawn a test app with the given store and UTC offset (minutes).
pub async fn spawn_app_with(store: Arc<dyn KvStore>, offset_minutes: i32) -> TestApp {
    let static_dir = make_static_dir();
    let config = test_config(static_dir.clone(), offset_minutes);
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::starting_at(START_MILLIS));

    let app = guestbook::build_router(Arc::new(AppState {
        config,
        store,
        clock,
    }));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        static_dir,
    }
}

/// Remove the app's static directory.
pub fn cleanup(app: TestApp) {
    let _ = std::fs::remove_dir_all(&app.static_dir);
}

fn make_static_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let dir = std::env::temp_dir().join(format!(
        "guestbook_test_{}_{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("assets")).expect("Failed to create static dir");
    std::fs::write(dir.join("index.html"), INDEX_HTML).expect("Failed to write index.html");
    std::fs::write(dir.join("assets").join("app.js"), APP_JS).expect("Failed to write app.js");
    dir
}
