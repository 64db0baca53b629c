use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_body_size: usize,
    pub utc_offset: FixedOffset,
    pub log_level: String,
    pub kv: KvBackend,
}

#[derive(Debug, Clone)]
pub enum KvBackend {
    Memory,
    Cloudflare(CloudflareConfig),
}

#[derive(Debug, Clone)]
pub struct CloudflareConfig {
    pub api_base: String,
    pub account_id: String,
    pub namespace_id: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };

        let host: IpAddr = env_or("GUESTBOOK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid GUESTBOOK_HOST: {e}"))?;

        let port: u16 = env_or("GUESTBOOK_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid GUESTBOOK_PORT: {e}"))?;

        let static_dir = PathBuf::from(env_or("GUESTBOOK_STATIC_DIR", "dist"));

        let max_body_size: usize = env_or("GUESTBOOK_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid GUESTBOOK_MAX_BODY_SIZE: {e}"))?;

        let offset_minutes: i32 = env_or("GUESTBOOK_UTC_OFFSET_MINUTES", "0")
            .parse()
            .map_err(|e| format!("Invalid GUESTBOOK_UTC_OFFSET_MINUTES: {e}"))?;
        let utc_offset = utc_offset_from_minutes(offset_minutes)?;

        let log_level = env_or("GUESTBOOK_LOG_LEVEL", "info");

        let kv = match env_or("GUESTBOOK_KV_BACKEND", "memory").as_str() {
            "memory" => KvBackend::Memory,
            "cloudflare" => {
                let timeout_secs: u64 = env_or("GUESTBOOK_KV_TIMEOUT_SECS", "10")
                    .parse()
                    .map_err(|e| format!("Invalid GUESTBOOK_KV_TIMEOUT_SECS: {e}"))?;

                KvBackend::Cloudflare(CloudflareConfig {
                    api_base: env_or(
                        "CLOUDFLARE_API_BASE",
                        "https://api.cloudflare.com/client/v4",
                    ),
                    account_id: env_required("CLOUDFLARE_ACCOUNT_ID")?,
                    namespace_id: env_required("CLOUDFLARE_KV_NAMESPACE_ID")?,
                    api_token: env_required("CLOUDFLARE_API_TOKEN")?,
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            other => return Err(format!("Invalid GUESTBOOK_KV_BACKEND: {other}")),
        };

        Ok(Config {
            host,
            port,
            static_dir,
            max_body_size,
            utc_offset,
            log_level,
            kv,
        })
    }
}

/// Offsets are limited to less than a day in either direction.
pub fn utc_offset_from_minutes(minutes: i32) -> Result<FixedOffset, String> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("UTC offset out of range: {minutes} minutes"))
}
