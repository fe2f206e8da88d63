use crate::channel::{ChannelContext, ChannelOrigin};
use crate::error::PeerError;
use crate::session::{CandidateFilter, Session, SessionHandle, SessionObserver, SessionRegistry};
use crate::signaling::SignalingOutput;
use crate::transport::{PeerConnector, PeerObserver};
use parley_core::{RemoteSignal, Token};
use std::sync::{Arc, Weak};
use tracing::{info, warn};

/// Builds peer connections and applies remote signals to them.
pub struct SessionController {
    local_token: Token,
    connector: Arc<dyn PeerConnector>,
    registry: Arc<SessionRegistry>,
    signaling: Weak<dyn SignalingOutput>,
    candidate_filter: Option<CandidateFilter>,
    channels: Arc<ChannelContext>,
    label: String,
}

impl SessionController {
    pub fn new(
        local_token: Token,
        connector: Arc<dyn PeerConnector>,
        registry: Arc<SessionRegistry>,
        signaling: Weak<dyn SignalingOutput>,
        candidate_filter: Option<CandidateFilter>,
        channels: Arc<ChannelContext>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            local_token,
            connector,
            registry,
            signaling,
            candidate_filter,
            channels,
            label: label.into(),
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn local_token(&self) -> &Token {
        &self.local_token
    }

    /// Session for `token`, connecting a new peer if there is none.
    pub async fn open(&self, token: &Token) -> Result<(Session, bool), PeerError> {
        self.registry
            .lookup_or_create(token, |handle| async move {
                let observer: Arc<dyn PeerObserver> = Arc::new(SessionObserver::new(
                    handle,
                    Arc::downgrade(&self.registry),
                    self.signaling.clone(),
                    self.candidate_filter.clone(),
                    self.channels.clone(),
                ));
                let link = self.connector.connect(observer).await?;
                Ok::<_, PeerError>(link)
            })
            .await
    }

    /// Start a session with `token` by opening a data channel to it.
    ///
    /// The link publishes its offer through the session observer.
    pub async fn offer(&self, token: &Token) -> Result<SessionHandle, PeerError> {
        if *token == self.local_token {
            return Err(PeerError::SelfTarget(token.clone()));
        }

        let (session, created) = self.open(token).await?;
        if !created {
            return Err(PeerError::SessionActive(token.clone()));
        }

        info!("Offering to {}", token);
        info!("Creating DataChannel with label \"{}\"", self.label);
        let channel = match session.connection().create_data_channel(&self.label).await {
            Ok(channel) => channel,
            Err(e) => {
                // Leave the token free for another attempt.
                self.registry.remove(session.handle());
                if let Err(close) = session.connection().close().await {
                    warn!("Failed to close connection with {}: {}", token, close);
                }
                return Err(e.into());
            }
        };
        channel.observe(
            self.channels
                .handler(token.clone(), &channel, ChannelOrigin::Local),
        );
        self.registry.attach_channel(session.handle(), channel);

        Ok(session.handle().clone())
    }

    /// Apply a remote description or candidate to a session's connection.
    pub async fn apply(&self, session: &Session, signal: RemoteSignal) -> Result<(), PeerError> {
        match signal {
            RemoteSignal::Description(description) => {
                session
                    .connection()
                    .set_remote_description(description)
                    .await?
            }
            RemoteSignal::Candidate(candidate) => {
                session.connection().add_remote_candidate(candidate).await?
            }
        }
        Ok(())
    }

    /// Empty the registry and close every channel and connection it held.
    pub async fn shutdown(&self) -> usize {
        let sessions = self.registry.clear();
        for session in &sessions {
            if let Some(channel) = session.channel() {
                if let Err(e) = channel.close().await {
                    warn!("Failed to close channel with {}: {}", session.token(), e);
                }
            }
            if let Err(e) = session.connection().close().await {
                warn!("Failed to close connection with {}: {}", session.token(), e);
            }
        }
        sessions.len()
    }
}
