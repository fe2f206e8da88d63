use crate::error::PeerError;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use parley_core::{IceCandidate, SessionDescription, SignalEnvelope, Token};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// WebSocket connection to the signaling server.
pub struct SignalingClient {
    tx: mpsc::UnboundedSender<Message>,
}

impl SignalingClient {
    /// Open the socket and return the client with an inbox of inbound text
    /// frames, in delivery order. The inbox ends when the socket closes.
    pub async fn connect(
        url: &str,
    ) -> Result<(Arc<Self>, mpsc::UnboundedReceiver<String>), PeerError> {
        let (socket, _) =
            connect_async(url)
                .await
                .map_err(|e| PeerError::SignalingUnavailable {
                    url: url.to_owned(),
                    source: Box::new(e),
                })?;
        info!("WebSocket connected, signaling ready");

        let (mut sender, mut receiver) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = sender.send(msg).await {
                    warn!("Signaling send failed: {}", e);
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if inbox_tx.send(text).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => debug!("Ignoring non-text signaling frame"),
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
            info!("WebSocket closed");
        });

        Ok((Arc::new(Self { tx }), inbox_rx))
    }

    fn send_envelope(&self, envelope: SignalEnvelope) {
        match envelope.encode() {
            Ok(json) => {
                if self.tx.send(Message::Text(json)).is_err() {
                    warn!(
                        "Signaling closed, dropping {} for {}",
                        envelope.kind, envelope.token
                    );
                }
            }
            Err(e) => error!("Failed to encode signaling message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingClient {
    async fn send_description(&self, token: Token, description: SessionDescription) {
        self.send_envelope(SignalEnvelope::description(token, &description));
    }

    async fn send_candidate(&self, token: Token, candidate: IceCandidate) {
        self.send_envelope(SignalEnvelope::candidate(token, &candidate));
    }
}
