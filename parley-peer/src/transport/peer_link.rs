use crate::transport::{ChannelObserver, PeerObserver, TransportError};
use async_trait::async_trait;
use parley_core::{IceCandidate, Payload, SessionDescription};
use std::sync::Arc;

/// Builds peer connections. The only entry point into the transport.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    /// Create a connection whose events are delivered to `observer`.
    async fn connect(
        &self,
        observer: Arc<dyn PeerObserver>,
    ) -> Result<Arc<dyn PeerLink>, TransportError>;
}

/// One peer connection.
///
/// Negotiation is automatic: applying a remote offer publishes a local
/// answer through [`PeerObserver::on_local_description`], and opening the
/// first data channel on a fresh link publishes a local offer.
#[async_trait]
pub trait PeerLink: Send + Sync {
    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError>;

    async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError>;

    async fn create_data_channel(&self, label: &str) -> Result<Arc<dyn DataLink>, TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}

/// One bidirectional data channel.
#[async_trait]
pub trait DataLink: Send + Sync {
    fn label(&self) -> String;

    async fn send(&self, payload: Payload) -> Result<(), TransportError>;

    /// Replace the handler receiving this channel's events.
    fn observe(&self, observer: Arc<dyn ChannelObserver>);

    async fn close(&self) -> Result<(), TransportError>;
}
