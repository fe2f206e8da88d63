use async_trait::async_trait;
use parley_core::{IceCandidate, SessionDescription, Token};

/// Outbound half of the signaling channel.
///
/// Sends are fire-and-forget; implementations log failures instead of
/// returning them.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send_description(&self, token: Token, description: SessionDescription);

    async fn send_candidate(&self, token: Token, candidate: IceCandidate);
}
