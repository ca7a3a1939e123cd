//! Client configuration.

use std::env;

use anyhow::{anyhow, Result};
use cashindex_client::Network;
use url::Url;

/// Client configuration, loaded from environment variables with command-line
/// overrides applied by the caller.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Index server base URL.
    pub server_url: Url,
    /// Websocket confirmation endpoint.
    pub ws_url: Url,
    /// Bitcoin Cash network, used for payment URIs.
    pub network: Network,
    /// Confirmation wait timeout in seconds; 0 waits forever.
    pub await_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server_url: Url = env::var("CASHINDEX_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .parse()?;

        let ws_url = match env::var("CASHINDEX_WS_URL") {
            Ok(raw) => raw.parse()?,
            Err(_) => derive_ws_url(&server_url)?,
        };

        let network = env::var("CASHINDEX_NETWORK")
            .ok()
            .and_then(|s| Network::from_str(&s))
            .unwrap_or_default();

        let await_timeout_secs: u64 = env::var("CASHINDEX_AWAIT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        Ok(Self {
            server_url,
            ws_url,
            network,
            await_timeout_secs,
        })
    }
}

/// Derive the `ws://host:port/ws` confirmation endpoint from the server URL.
pub fn derive_ws_url(server_url: &Url) -> Result<Url> {
    let mut ws_url = server_url.clone();
    let scheme = if server_url.scheme() == "https" {
        "wss"
    } else {
        "ws"
    };
    ws_url
        .set_scheme(scheme)
        .map_err(|_| anyhow!("cannot derive a websocket URL from {server_url}"))?;
    ws_url.set_path("/ws");
    Ok(ws_url)
}
