use crate::channel::{ChannelContext, ReceptionCounter};
use crate::config::ClientConfig;
use crate::error::PeerError;
use crate::session::{SessionController, SessionHandle, SessionRegistry};
use crate::signaling::{SignalDispatcher, SignalingOutput};
use crate::transport::PeerConnector;
use parley_core::Token;
use std::sync::{Arc, Weak};
use tracing::info;

/// One local endpoint: its registry, its controller and the counter shared by
/// all of its channels.
pub struct PeerClient {
    controller: Arc<SessionController>,
    counter: Arc<ReceptionCounter>,
}

impl PeerClient {
    pub fn new(
        config: &ClientConfig,
        connector: Arc<dyn PeerConnector>,
        signaling: Weak<dyn SignalingOutput>,
    ) -> Self {
        let counter = Arc::new(ReceptionCounter::new());
        let channels = Arc::new(ChannelContext::new(
            config.local_token.clone(),
            config.channel.clone(),
            counter.clone(),
        ));
        let controller = Arc::new(SessionController::new(
            config.local_token.clone(),
            connector,
            Arc::new(SessionRegistry::new()),
            signaling,
            config.candidate_filter(),
            channels,
            config.channel_label.clone(),
        ));

        Self {
            controller,
            counter,
        }
    }

    pub fn local_token(&self) -> &Token {
        self.controller.local_token()
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        self.controller.registry()
    }

    pub fn counter(&self) -> &Arc<ReceptionCounter> {
        &self.counter
    }

    pub fn dispatcher(&self) -> SignalDispatcher {
        SignalDispatcher::new(self.controller.clone())
    }

    pub async fn offer(&self, token: &Token) -> Result<SessionHandle, PeerError> {
        self.controller.offer(token).await
    }

    pub async fn shutdown(&self) {
        let closed = self.controller.shutdown().await;
        info!("Closed {} session(s)", closed);
    }
}
