use crate::channel::{ChannelContext, ChannelOrigin};
use crate::session::{CandidateFilter, SessionHandle, SessionRegistry};
use crate::signaling::SignalingOutput;
use crate::transport::{DataLink, PeerObserver};
use async_trait::async_trait;
use parley_core::{GatheringState, IceCandidate, PeerState, SessionDescription, Token};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Per-connection event handler.
///
/// Holds only weak references, so events that fire after the session is
/// cleared or the signaling socket is gone are dropped.
pub struct SessionObserver {
    handle: SessionHandle,
    registry: Weak<SessionRegistry>,
    signaling: Weak<dyn SignalingOutput>,
    candidate_filter: Option<CandidateFilter>,
    channels: Arc<ChannelContext>,
}

impl SessionObserver {
    pub fn new(
        handle: SessionHandle,
        registry: Weak<SessionRegistry>,
        signaling: Weak<dyn SignalingOutput>,
        candidate_filter: Option<CandidateFilter>,
        channels: Arc<ChannelContext>,
    ) -> Self {
        Self {
            handle,
            registry,
            signaling,
            candidate_filter,
            channels,
        }
    }

    fn token(&self) -> &Token {
        self.handle.token()
    }

    fn is_live(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.resolve(&self.handle).is_some())
    }

    fn live_signaling(&self) -> Option<Arc<dyn SignalingOutput>> {
        if !self.is_live() {
            debug!("Session with {} is gone", self.token());
            return None;
        }
        let signaling = self.signaling.upgrade();
        if signaling.is_none() {
            debug!("Signaling is gone, peer with {} is unreachable", self.token());
        }
        signaling
    }
}

#[async_trait]
impl PeerObserver for SessionObserver {
    async fn on_state_change(&self, state: PeerState) {
        info!("State of peer {}: {}", self.token(), state);
    }

    async fn on_gathering_state_change(&self, state: GatheringState) {
        info!("Gathering state of peer {}: {}", self.token(), state);
    }

    async fn on_local_description(&self, description: SessionDescription) {
        let Some(signaling) = self.live_signaling() else {
            return;
        };
        signaling
            .send_description(self.token().clone(), description)
            .await;
    }

    async fn on_local_candidate(&self, candidate: IceCandidate) {
        if let Some(filter) = &self.candidate_filter {
            if !filter.admits(&candidate.candidate) {
                debug!(
                    "Dropping candidate for {} not on {}: {}",
                    self.token(),
                    filter.host(),
                    candidate.candidate
                );
                return;
            }
        }
        let Some(signaling) = self.live_signaling() else {
            return;
        };
        signaling
            .send_candidate(self.token().clone(), candidate)
            .await;
    }

    async fn on_data_channel(&self, channel: Arc<dyn DataLink>) {
        info!(
            "DataChannel from peer with {} received with label \"{}\"",
            self.token(),
            channel.label()
        );

        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if !registry.attach_channel(&self.handle, channel.clone()) {
            debug!("Session with {} is gone, ignoring its channel", self.token());
            return;
        }

        // The greeting goes out from the handler once the channel is open.
        channel.observe(
            self.channels
                .handler(self.token().clone(), &channel, ChannelOrigin::Remote),
        );
    }
}
