use crate::session::CandidateFilter;
use crate::transport::TransportConfig;
use parley_core::Token;
use parley_core::utils::{
    DEFAULT_CHANNEL_LABEL, DEFAULT_SIGNALING_HOST, DEFAULT_SIGNALING_PORT, DEFAULT_TOKEN_LENGTH,
};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub local_token: Token,
    pub transport: TransportConfig,
    pub signaling: SignalingEndpoint,
    pub channel: ChannelSettings,
    /// Experimental: only forward local candidates naming the signaling host.
    pub filter_candidates: bool,
    pub channel_label: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            local_token: Token::generate(DEFAULT_TOKEN_LENGTH),
            transport: TransportConfig::default(),
            signaling: SignalingEndpoint::default(),
            channel: ChannelSettings::default(),
            filter_candidates: false,
            channel_label: DEFAULT_CHANNEL_LABEL.to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn candidate_filter(&self) -> Option<CandidateFilter> {
        self.filter_candidates
            .then(|| CandidateFilter::same_host(self.signaling.host_name()))
    }
}

/// What to do with data channel traffic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSettings {
    /// Send every received message back instead of printing it.
    pub echo: bool,
    /// Size of a zero-filled binary message sent after the text greeting.
    pub binary_greeting: Option<usize>,
}

/// Where the signaling WebSocket lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalingEndpoint {
    pub host: String,
    pub port: u16,
}

impl Default for SignalingEndpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_SIGNALING_HOST.to_owned(),
            port: DEFAULT_SIGNALING_PORT,
        }
    }
}

impl SignalingEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `ws://host:port/<token>`, keeping an explicit scheme if given.
    pub fn url(&self, token: &Token) -> String {
        let scheme = if self.host.starts_with("ws://") || self.host.starts_with("wss://") {
            ""
        } else {
            "ws://"
        };
        format!("{}{}:{}/{}", scheme, self.host, self.port, token)
    }

    /// Host without scheme.
    pub fn host_name(&self) -> &str {
        self.host
            .strip_prefix("ws://")
            .or_else(|| self.host.strip_prefix("wss://"))
            .unwrap_or(&self.host)
    }
}
