use crate::transport::TransportError;
use parley_core::Token;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("signaling server {url} is unreachable: {source}")]
    SignalingUnavailable {
        url: String,
        #[source]
        source: Box<tokio_tungstenite::tungstenite::Error>,
    },

    #[error("{0} is the local token")]
    SelfTarget(Token),

    #[error("a session with {0} is already active")]
    SessionActive(Token),
}
