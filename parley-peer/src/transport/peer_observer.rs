use crate::transport::DataLink;
use async_trait::async_trait;
use parley_core::{GatheringState, IceCandidate, Payload, PeerState, SessionDescription};
use std::sync::Arc;

/// Events raised by a [`PeerLink`](crate::transport::PeerLink).
///
/// Called from transport worker tasks, possibly concurrently for
/// different connections.
#[async_trait]
pub trait PeerObserver: Send + Sync {
    async fn on_state_change(&self, state: PeerState);

    async fn on_gathering_state_change(&self, state: GatheringState);

    async fn on_local_description(&self, description: SessionDescription);

    async fn on_local_candidate(&self, candidate: IceCandidate);

    /// The remote peer opened a channel.
    async fn on_data_channel(&self, channel: Arc<dyn DataLink>);
}

/// Events raised by a [`DataLink`]. Messages arrive in channel order.
#[async_trait]
pub trait ChannelObserver: Send + Sync {
    async fn on_open(&self);

    async fn on_closed(&self);

    async fn on_error(&self, error: String);

    async fn on_message(&self, payload: Payload);
}
