//! Configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default system prompt for the AI proxy.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are the website assistant for a software development agency.

The agency builds custom web applications, mobile apps (Android and iOS), game apps, \
UI/UX designs, idea-based websites for startups, e-commerce stores and portals, \
fintech software (AEPS, BBPS, recharge and bill-payment platforms, B2B payment portals) \
and custom business software.

Guidelines:
- Answer in 2-4 short, friendly sentences. No markdown tables or long lists.
- Only talk about the agency, its services and how to work with it.
- Never invent prices, deadlines or client names; offer a consultation instead.
- When a visitor wants to discuss a project, ask them to type \"start project\" so \
the team can collect their contact details.";

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind: IpAddr,
    pub port: u16,
    /// Chat sessions idle longer than this are dropped.
    pub session_idle_timeout: Duration,
    /// How often the idle sweep runs.
    pub session_sweep_interval: Duration,
    /// Write logs to a daily rolling file here instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            session_idle_timeout: Duration::from_secs(30 * 60), // 30 minutes
            session_sweep_interval: Duration::from_secs(60),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match std::env::var("LEAD_ASSIST_BIND") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "LEAD_ASSIST_BIND".to_string(),
                message: format!("{e}"),
            })?,
            Err(_) => defaults.bind,
        };

        let port: u16 = std::env::var("LEAD_ASSIST_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let session_idle_timeout = std::env::var("LEAD_ASSIST_SESSION_IDLE_MIN")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|min| Duration::from_secs(min * 60))
            .unwrap_or(defaults.session_idle_timeout);

        let log_dir = std::env::var("LEAD_ASSIST_LOG_DIR").ok().map(PathBuf::from);

        Ok(Self {
            bind,
            port,
            session_idle_timeout,
            log_dir,
            ..defaults
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
