use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Rtc(#[from] webrtc::Error),

    /// The transport refused a description, candidate or payload.
    #[error("transport rejected input: {0}")]
    Rejected(String),

    #[error("peer connection is closed")]
    Closed,
}
