use async_trait::async_trait;
use parley_core::{IceCandidate, SessionDescription, SignalEnvelope, SignalKind, Token};
use parley_peer::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Mock SignalingOutput that captures every outgoing envelope.
#[derive(Clone)]
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<SignalEnvelope>,
    envelopes: Arc<Mutex<Vec<SignalEnvelope>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalEnvelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            envelopes: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    pub async fn envelopes(&self) -> Vec<SignalEnvelope> {
        self.envelopes.lock().await.clone()
    }

    /// Description of the given kind sent to `token`, if any.
    pub async fn description_for(&self, token: &Token, kind: SignalKind) -> Option<String> {
        self.envelopes.lock().await.iter().find_map(|e| {
            (e.token == *token && e.kind == kind)
                .then(|| e.description.clone())
                .flatten()
        })
    }

    pub async fn candidates_for(&self, token: &Token) -> Vec<String> {
        self.envelopes
            .lock()
            .await
            .iter()
            .filter(|e| e.token == *token && e.kind == SignalKind::Candidate)
            .filter_map(|e| e.candidate.clone())
            .collect()
    }

    async fn capture(&self, envelope: SignalEnvelope) {
        tracing::debug!("[MockSignaling] {} to {}", envelope.kind, envelope.token);
        self.envelopes.lock().await.push(envelope.clone());
        let _ = self.tx.send(envelope);
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_description(&self, token: Token, description: SessionDescription) {
        self.capture(SignalEnvelope::description(token, &description))
            .await;
    }

    async fn send_candidate(&self, token: Token, candidate: IceCandidate) {
        self.capture(SignalEnvelope::candidate(token, &candidate))
            .await;
    }
}
