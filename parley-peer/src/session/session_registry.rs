use crate::transport::{DataLink, PeerLink};
use dashmap::DashMap;
use parley_core::Token;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;

/// Non-owning reference to one registry entry.
///
/// Every created entry gets a fresh generation, so a handle kept past
/// [`SessionRegistry::clear`] never resolves to a later session that happens
/// to reuse the token.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct SessionHandle {
    token: Token,
    generation: u64,
}

impl SessionHandle {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Snapshot of one live session.
#[derive(Clone)]
pub struct Session {
    handle: SessionHandle,
    connection: Arc<dyn PeerLink>,
    channel: Option<Arc<dyn DataLink>>,
}

impl Session {
    pub fn token(&self) -> &Token {
        &self.handle.token
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn connection(&self) -> &Arc<dyn PeerLink> {
        &self.connection
    }

    pub fn channel(&self) -> Option<&Arc<dyn DataLink>> {
        self.channel.as_ref()
    }
}

struct SessionSlot {
    generation: u64,
    connection: OnceCell<Arc<dyn PeerLink>>,
    channel: Mutex<Option<Arc<dyn DataLink>>>,
}

impl SessionSlot {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            connection: OnceCell::new(),
            channel: Mutex::new(None),
        }
    }

    fn channel(&self) -> MutexGuard<'_, Option<Arc<dyn DataLink>>> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self, token: &Token) -> Option<Session> {
        let connection = self.connection.get()?.clone();
        Some(Session {
            handle: SessionHandle {
                token: token.clone(),
                generation: self.generation,
            },
            connection,
            channel: self.channel().clone(),
        })
    }
}

/// Owner of every peer connection and data channel, keyed by token.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Token, Arc<SessionSlot>>,
    next_generation: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `token`, building it with `factory` if there
    /// is none. The flag is `true` when this call ran the factory.
    ///
    /// Concurrent callers for the same token share one slot, so at most one
    /// factory runs and every caller observes the same connection. A failed
    /// factory leaves no entry behind.
    pub async fn lookup_or_create<F, Fut, E>(
        &self,
        token: &Token,
        factory: F,
    ) -> Result<(Session, bool), E>
    where
        F: FnOnce(SessionHandle) -> Fut,
        Fut: Future<Output = Result<Arc<dyn PeerLink>, E>>,
    {
        let slot = self
            .sessions
            .entry(token.clone())
            .or_insert_with(|| {
                Arc::new(SessionSlot::new(
                    self.next_generation.fetch_add(1, Ordering::Relaxed),
                ))
            })
            .value()
            .clone();

        let handle = SessionHandle {
            token: token.clone(),
            generation: slot.generation,
        };

        let mut created = false;
        let result = slot
            .connection
            .get_or_try_init(|| {
                created = true;
                factory(handle.clone())
            })
            .await
            .cloned();

        match result {
            Ok(connection) => {
                let session = Session {
                    handle,
                    connection,
                    channel: slot.channel().clone(),
                };
                Ok((session, created))
            }
            Err(e) => {
                self.sessions.remove_if(token, |_, current| {
                    Arc::ptr_eq(current, &slot) && !current.connection.initialized()
                });
                Err(e)
            }
        }
    }

    /// Live session for `token`, if its connection is built.
    pub fn session(&self, token: &Token) -> Option<Session> {
        let slot = self.sessions.get(token)?.value().clone();
        slot.snapshot(token)
    }

    /// Resolve a handle, or `None` when its session has been torn down.
    pub fn resolve(&self, handle: &SessionHandle) -> Option<Session> {
        let slot = self.slot(handle)?;
        slot.snapshot(&handle.token)
    }

    /// Record the data channel of a session. The last channel attached wins.
    ///
    /// Returns `false` when the handle is stale.
    pub fn attach_channel(&self, handle: &SessionHandle, channel: Arc<dyn DataLink>) -> bool {
        let Some(slot) = self.slot(handle) else {
            return false;
        };
        *slot.channel() = Some(channel);
        true
    }

    /// Remove the entry `handle` refers to. A stale handle removes nothing.
    pub fn remove(&self, handle: &SessionHandle) -> Option<Session> {
        let (token, slot) = self
            .sessions
            .remove_if(&handle.token, |_, slot| slot.generation == handle.generation)?;
        slot.snapshot(&token)
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.session(token).is_some()
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every entry and hand the built sessions back for closing.
    pub fn clear(&self) -> Vec<Session> {
        let mut drained = Vec::new();
        for token in self.tokens() {
            if let Some((token, slot)) = self.sessions.remove(&token) {
                drained.extend(slot.snapshot(&token));
            }
        }
        drained
    }

    fn slot(&self, handle: &SessionHandle) -> Option<Arc<SessionSlot>> {
        let slot = self.sessions.get(&handle.token)?.value().clone();
        (slot.generation == handle.generation).then_some(slot)
    }
}
