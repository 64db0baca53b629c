use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::config::CloudflareConfig;

use super::{KvStore, StoreError};

/// Workers KV namespace accessed through the Cloudflare REST API.
pub struct CloudflareKv {
    client: reqwest::Client,
    values_url: Url,
    api_token: String,
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl CloudflareKv {
    pub fn new(config: &CloudflareConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let base = format!(
            "{}/accounts/{}/storage/kv/namespaces/{}/values",
            config.api_base.trim_end_matches('/'),
            config.account_id,
            config.namespace_id,
        );
        let values_url =
            Url::parse(&base).map_err(|e| StoreError::InvalidUrl(format!("{base}: {e}")))?;
        if values_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base));
        }

        Ok(Self {
            client,
            values_url,
            api_token: config.api_token.clone(),
        })
    }

    fn value_url(&self, key: &str) -> Result<Url, StoreError> {
        let mut url = self.values_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.values_url.to_string()))?
            .push(key);
        Ok(url)
    }
}

#[async_trait]
impl KvStore for CloudflareKv {
    fn name(&self) -> &str {
        "cloudflare"
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let url = self.value_url(key)?;

        let resp = self
            .client
            .put(url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(value)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: body.chars().take(1024).collect(),
            });
        }

        // Some proxies answer 200 with an empty body; treat that as accepted.
        if body.trim().is_empty() {
            return Ok(());
        }

        match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) if envelope.success => Ok(()),
            Ok(envelope) => {
                let detail = envelope
                    .errors
                    .iter()
                    .map(|e| format!("{} {}", e.code, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(StoreError::Rejected(detail))
            }
            Err(e) => Err(StoreError::Rejected(format!("unreadable API response: {e}"))),
        }
    }
}
