use thiserror::Error;

/// Failure to move a [`SignalEnvelope`](crate::SignalEnvelope) across the wire.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("undecodable signaling message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unencodable signaling message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// An envelope that decoded fine but lacks a field its type requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("{0} envelope carries no description")]
    MissingDescription(&'static str),

    #[error("candidate envelope carries no candidate")]
    MissingCandidate,

    #[error("candidate envelope carries no mid")]
    MissingMid,
}
