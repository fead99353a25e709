#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;

use crate::models::session::SessionClaims;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Session store is not connected")]
    NotConnected,

    #[error(transparent)]
    RedisError(#[from] redis::RedisError),

    #[error("Malformed session claims: {0}")]
    Malformed(#[from] serde_json::Error)
}

//Looks up the claims behind a session id. Ok(None) means unknown or expired.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn resolve(&self, sessionId: &str) -> Result<Option<SessionClaims>, SessionError>;
}

//In-process store, used by the router tests
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionClaims>>
}

impl MemorySessionStore {
    pub fn new() -> MemorySessionStore {
        return MemorySessionStore::default();
    }

    pub fn insert(&self, sessionId: impl Into<String>, claims: SessionClaims) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(sessionId.into(), claims);
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn resolve(&self, sessionId: &str) -> Result<Option<SessionClaims>, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::NotConnected)?;
        return Ok(sessions.get(sessionId).cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_resolves_known_sessions_only() {
        let store = MemorySessionStore::new();
        store.insert("abc", SessionClaims { UserId: 3, Username: "ops".into() });

        assert_eq!(store.resolve("abc").await.unwrap().map(|c| c.UserId), Some(3));
        assert!(store.resolve("nope").await.unwrap().is_none());
    }
}
