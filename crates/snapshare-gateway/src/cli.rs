use crate::cors::{CorsError, CorsPolicy};
use crate::telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use snapshare_share::ShareSettings;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNAPSHARE_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "SNAPSHARE_PUBLIC_BASE_URL";
pub const ALLOWED_ORIGINS_ENV: &str = "SNAPSHARE_ALLOWED_ORIGINS";
pub const DEFAULT_TTL_DAYS_ENV: &str = "SNAPSHARE_DEFAULT_TTL_DAYS";
pub const STORAGE_BACKEND_ENV: &str = "SNAPSHARE_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "SNAPSHARE_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "SNAPSHARE_REDIS_KEY_PREFIX";
pub const LOG_FORMAT_ENV: &str = "SNAPSHARE_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "SNAPSHARE_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TTL_DAYS: &str = "90";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snapshare-gateway", about = "Short-link sharing service for JSON snapshots")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin used in share URLs. Derived from each request when unset.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    /// Origins allowed to call the API. The first is the fallback for
    /// unlisted callers.
    #[arg(
        long,
        env = ALLOWED_ORIGINS_ENV,
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGIN,
    )]
    pub allowed_origins: Vec<String>,

    /// TTL for shares created without `ttlDays`. `0` means never expire.
    #[arg(long, env = DEFAULT_TTL_DAYS_ENV, default_value = DEFAULT_TTL_DAYS)]
    pub default_ttl_days: f64,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = REDIS_KEY_PREFIX_ENV,
        default_value = snapshare_storage::redis::DEFAULT_KEY_PREFIX,
    )]
    pub redis_key_prefix: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for span export, e.g. `http://localhost:4317`.
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}

impl Cli {
    pub fn share_settings(&self) -> ShareSettings {
        ShareSettings::builder()
            .default_ttl_days(Some(self.default_ttl_days))
            .build()
    }

    pub fn cors_policy(&self) -> Result<CorsPolicy, CorsError> {
        CorsPolicy::new(&self.allowed_origins)
    }
}
