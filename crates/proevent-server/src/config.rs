//! Server configuration.
//!
//! Loaded from environment variables with defaults that run out of the
//! box on a developer machine. All settings can be overridden via
//! `PROEVENT_*` variables; forwarding credentials keep the names the
//! deployment already uses.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g. `info`, `debug`, `warn`).
    pub log_level: String,
    /// Lead forwarding settings.
    pub forward: ForwardConfig,
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, leads lost on restart).
    Memory,
    /// Single JSON document on disk.
    File { path: String },
    /// redb persistent storage.
    Redb { path: String },
}

/// Where accepted leads are forwarded, best-effort.
#[derive(Debug, Clone, Default)]
pub struct ForwardConfig {
    /// Webhook URL posted the full lead as JSON (optional).
    pub webhook_url: Option<String>,
    /// Email relay settings (optional).
    pub email: Option<EmailRelayConfig>,
}

/// SendGrid-style email relay configuration.
#[derive(Debug, Clone)]
pub struct EmailRelayConfig {
    /// Relay API key.
    pub api_key: String,
    /// Recipient address for lead notifications.
    pub to: String,
    /// Sender address.
    pub from: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `PROEVENT_BIND_ADDR` — full bind address (overrides `PORT`,
    ///   default `127.0.0.1:8000`)
    /// - `PROEVENT_STORAGE` — `memory`, `file`, or `redb` (default: `memory`)
    /// - `PROEVENT_STORAGE_PATH` — directory for persistent backends
    ///   (default: `./data`)
    /// - `PROEVENT_LOG_LEVEL` — log filter (default: `info`)
    /// - `PROEVENT_WEBHOOK_URL` — webhook to forward accepted leads to (optional)
    /// - `SENDGRID_API_KEY` / `LEAD_EMAIL_TO` / `LEAD_EMAIL_FROM` —
    ///   email relay; active when key and recipient are both set
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: PROEVENT_BIND_ADDR > PORT > default 127.0.0.1:8000.
        let bind_addr = if let Ok(addr) = std::env::var("PROEVENT_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8000);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8000))
        };

        let storage_path =
            std::env::var("PROEVENT_STORAGE_PATH").unwrap_or_else(|_| "./data".to_owned());

        let storage_backend = match std::env::var("PROEVENT_STORAGE")
            .unwrap_or_else(|_| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "redb" => StorageBackendType::Redb {
                path: format!("{storage_path}/leads.redb"),
            },
            "file" | "json" => StorageBackendType::File {
                path: format!("{storage_path}/leads.json"),
            },
            _ => StorageBackendType::Memory,
        };

        let log_level =
            std::env::var("PROEVENT_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let webhook_url = std::env::var("PROEVENT_WEBHOOK_URL").ok();

        // Email relay — active when key and recipient are both present.
        let email = match (
            std::env::var("SENDGRID_API_KEY").ok(),
            std::env::var("LEAD_EMAIL_TO").ok(),
        ) {
            (Some(api_key), Some(to)) => {
                let from = std::env::var("LEAD_EMAIL_FROM").unwrap_or_else(|_| to.clone());
                Some(EmailRelayConfig { api_key, to, from })
            }
            _ => None,
        };

        Self {
            bind_addr,
            storage_backend,
            log_level,
            forward: ForwardConfig { webhook_url, email },
        }
    }
}
