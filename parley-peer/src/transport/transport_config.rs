use parley_core::utils::{DEFAULT_STUN_HOST, DEFAULT_STUN_PORT};
use std::fmt;

/// ICE configuration handed to every peer connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub ice_servers: Vec<String>,
    pub proxy: Option<ProxyServer>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::with_stun(DEFAULT_STUN_HOST, DEFAULT_STUN_PORT)
    }
}

impl TransportConfig {
    /// Host candidates and public addresses only.
    pub fn without_stun() -> Self {
        Self {
            ice_servers: Vec::new(),
            proxy: None,
        }
    }

    pub fn with_stun(host: &str, port: u16) -> Self {
        Self {
            ice_servers: vec![Self::stun_url(host, port)],
            proxy: None,
        }
    }

    /// `stun.example.org`, 3478 -> `stun:stun.example.org:3478`
    pub fn stun_url(host: &str, port: u16) -> String {
        if host.starts_with("stun:") {
            format!("{host}:{port}")
        } else {
            format!("stun:{host}:{port}")
        }
    }
}

/// HTTP proxy the transport should tunnel through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyServer {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ProxyServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
