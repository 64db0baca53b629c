pub mod cloudflare;
pub mod memory;

use async_trait::async_trait;

pub use cloudflare::CloudflareKv;
pub use memory::MemoryStore;

#[derive(Debug)]
pub enum StoreError {
    InvalidUrl(String),
    Request(reqwest::Error),
    Status { status: u16, body: String },
    Rejected(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidUrl(msg) => write!(f, "invalid store URL: {msg}"),
            StoreError::Request(err) => write!(f, "store request failed: {err}"),
            StoreError::Status { status, body } => {
                write!(f, "store returned HTTP {status}: {body}")
            }
            StoreError::Rejected(msg) => write!(f, "store rejected write: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Request(err)
    }
}

/// Write side of a string-to-string key-value store.
///
/// A `put` either completes or returns an error; there is no partial write.
/// Timeouts and retries belong to the implementation.
#[async_trait]
pub trait KvStore: Send + Sync {
    fn name(&self) -> &str;
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}
