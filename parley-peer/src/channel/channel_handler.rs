use crate::channel::{ReceptionCounter, ReceptionSummary};
use crate::config::ChannelSettings;
use crate::transport::{ChannelObserver, DataLink};
use async_trait::async_trait;
use bytes::Bytes;
use parley_core::{Payload, Token};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Longest text message printed in full.
pub const PREVIEW_LIMIT: usize = 80;

/// Which side opened a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrigin {
    Local,
    Remote,
}

/// State shared by every channel handler of one client.
pub struct ChannelContext {
    local_token: Token,
    settings: ChannelSettings,
    counter: Arc<ReceptionCounter>,
}

impl ChannelContext {
    pub fn new(local_token: Token, settings: ChannelSettings, counter: Arc<ReceptionCounter>) -> Self {
        Self {
            local_token,
            settings,
            counter,
        }
    }

    /// Build the handler for `channel`. It keeps the channel until it closes.
    pub fn handler(
        self: &Arc<Self>,
        peer: Token,
        channel: &Arc<dyn DataLink>,
        origin: ChannelOrigin,
    ) -> Arc<ChannelHandler> {
        Arc::new(ChannelHandler {
            peer,
            origin,
            channel: Mutex::new(Some(channel.clone())),
            context: self.clone(),
        })
    }

    /// Send the hello text, then the binary greeting if one is configured.
    pub async fn greet(&self, peer: &Token, channel: &dyn DataLink, origin: ChannelOrigin) {
        let text = match origin {
            ChannelOrigin::Local => format!("Hello from {}", self.local_token),
            ChannelOrigin::Remote => format!("Hello from peer with {}", self.local_token),
        };
        if let Err(e) = channel.send(Payload::Text(text)).await {
            warn!("Failed to greet peer with {}: {}", peer, e);
            return;
        }

        if let Some(size) = self.settings.binary_greeting {
            let data = Bytes::from(vec![0u8; size]);
            if let Err(e) = channel.send(Payload::Binary(data)).await {
                warn!("Failed to send binary greeting to peer with {}: {}", peer, e);
            }
        }
    }
}

/// Echo-or-print policy for one data channel.
///
/// The channel is released on close, so the transport's callbacks and the
/// handler do not keep each other alive past the end of the channel.
pub struct ChannelHandler {
    peer: Token,
    origin: ChannelOrigin,
    channel: Mutex<Option<Arc<dyn DataLink>>>,
    context: Arc<ChannelContext>,
}

impl ChannelHandler {
    fn channel(&self) -> Option<Arc<dyn DataLink>> {
        self.channel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn echo(&self, payload: Payload) -> bool {
        let Some(channel) = self.channel() else {
            debug!("Channel with {} is gone, cannot echo", self.peer);
            return false;
        };
        match channel.send(payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to echo to peer with {}: {}", self.peer, e);
                false
            }
        }
    }

    /// Echo or print one message and count it. Returns the summary when one
    /// is due.
    pub async fn receive(&self, payload: Payload) -> Option<ReceptionSummary> {
        let kind = payload.kind();
        let size = payload.len();

        let echoed = if self.context.settings.echo {
            self.echo(payload).await
        } else {
            info!("{}", render_message(&self.peer, &payload));
            false
        };

        let total = self.context.counter.record()?;
        Some(ReceptionSummary {
            total,
            peer: self.peer.clone(),
            kind,
            size,
            echoed,
        })
    }
}

#[async_trait]
impl ChannelObserver for ChannelHandler {
    async fn on_open(&self) {
        info!("DataChannel from peer with {} open", self.peer);

        let Some(channel) = self.channel() else {
            return;
        };
        self.context
            .greet(&self.peer, channel.as_ref(), self.origin)
            .await;
    }

    async fn on_closed(&self) {
        // Sessions outlive their channels; the registry only empties at shutdown.
        info!("DataChannel from peer with {} closed", self.peer);
        self.channel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    async fn on_error(&self, error: String) {
        warn!("DataChannel from peer with {} failed: {}", self.peer, error);
    }

    async fn on_message(&self, payload: Payload) {
        if let Some(summary) = self.receive(payload).await {
            info!("{}", summary);
        }
    }
}

/// Console line for a received message. Binary content is never shown.
pub fn render_message(peer: &Token, payload: &Payload) -> String {
    match payload {
        Payload::Text(text) if text.chars().count() < PREVIEW_LIMIT => {
            format!("Message from peer with {} received: {}", peer, text)
        }
        Payload::Text(text) => {
            let prefix: String = text.chars().take(PREVIEW_LIMIT).collect();
            format!("Message from peer with {} received: {}...", peer, prefix)
        }
        Payload::Binary(data) => format!(
            "Binary message from peer with {} received, size={}",
            peer,
            data.len()
        ),
    }
}
