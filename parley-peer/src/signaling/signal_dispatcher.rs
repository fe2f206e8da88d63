use crate::error::PeerError;
use crate::session::SessionController;
use parley_core::{CodecError, EnvelopeError, SignalEnvelope, SignalKind, Token};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Why an inbound signaling message was dropped without touching any session.
#[derive(Debug, Error)]
pub enum Discard {
    #[error("malformed signaling message: {0}")]
    Malformed(#[source] CodecError),

    #[error("incomplete {kind} from {token}: {source}")]
    Incomplete {
        token: Token,
        kind: SignalKind,
        #[source]
        source: EnvelopeError,
    },

    #[error("{kind} from {token} has no session to apply to")]
    UnknownToken { token: Token, kind: SignalKind },
}

/// Result of handling one inbound signaling message.
#[derive(Debug)]
pub enum DispatchOutcome {
    Applied { token: Token, created: bool },
    Discarded(Discard),
    Failed { token: Token, error: PeerError },
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied { .. })
    }
}

/// Routes inbound envelopes to their sessions. Only an offer may open one.
pub struct SignalDispatcher {
    controller: Arc<SessionController>,
}

impl SignalDispatcher {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }

    pub async fn dispatch(&self, raw: &str) -> DispatchOutcome {
        let envelope = match SignalEnvelope::decode(raw) {
            Ok(envelope) => envelope,
            Err(e) => return DispatchOutcome::Discarded(Discard::Malformed(e)),
        };
        let token = envelope.token.clone();
        let kind = envelope.kind;

        let remote = match envelope.into_remote() {
            Ok(remote) => remote,
            Err(source) => {
                return DispatchOutcome::Discarded(Discard::Incomplete {
                    token,
                    kind,
                    source,
                });
            }
        };

        let (session, created) = if kind == SignalKind::Offer {
            match self.controller.open(&token).await {
                Ok(found) => found,
                Err(error) => return DispatchOutcome::Failed { token, error },
            }
        } else {
            match self.controller.registry().session(&token) {
                Some(session) => (session, false),
                None => return DispatchOutcome::Discarded(Discard::UnknownToken { token, kind }),
            }
        };

        if created {
            info!("Answering to {}", token);
        }

        match self.controller.apply(&session, remote).await {
            Ok(()) => DispatchOutcome::Applied { token, created },
            Err(error) => DispatchOutcome::Failed { token, error },
        }
    }

    /// Dispatch every message from `inbox` in order until it closes.
    pub async fn run(&self, mut inbox: mpsc::UnboundedReceiver<String>) {
        while let Some(raw) = inbox.recv().await {
            match self.dispatch(&raw).await {
                DispatchOutcome::Applied { .. } => {}
                DispatchOutcome::Discarded(discard) => warn!("Discarding: {}", discard),
                DispatchOutcome::Failed { token, error } => {
                    error!("Failed to apply signal from {}: {}", token, error)
                }
            }
        }
    }
}
