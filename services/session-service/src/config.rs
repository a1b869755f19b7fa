use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub(crate) const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub(crate) const DEFAULT_COOKIE_NAME: &str = "ws_session";
pub(crate) const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub(crate) struct ServiceConfig {
    pub(crate) listen_addr: SocketAddr,
    pub(crate) cookie_name: String,
    /// Directory with the page template and wasm bundle, served as a fallback.
    pub(crate) static_dir: Option<PathBuf>,
    /// Cross-origin page allowed to call the session routes with credentials.
    pub(crate) cors_origin: Option<String>,
    /// Sessions not updated for this long are dropped.
    pub(crate) session_ttl_ms: u128,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = non_empty("SESSION_SERVICE_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned())
            .parse()
            .context("SESSION_SERVICE_ADDR must be a socket address")?;

        let session_ttl_secs = match non_empty("SESSION_TTL_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if session_ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }

        Ok(Self {
            listen_addr,
            cookie_name: non_empty("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_owned()),
            static_dir: non_empty("SESSION_STATIC_DIR").map(PathBuf::from),
            cors_origin: non_empty("SESSION_CORS_ORIGIN"),
            session_ttl_ms: u128::from(session_ttl_secs) * 1_000,
        })
    }
}
