//! Authenticated session state.
//!
//! `SessionContext` is created once at startup and handed to the API client and
//! the route guard. It is the only place the access token lives in memory; the
//! `SessionStore` behind it keeps the token across runs.

mod store;

pub use store::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::errors::AppError;

/// Token plus the moment it was issued to this console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Shared, injectable session state.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
    epoch: AtomicU64,
}

impl SessionContext {
    /// Build a context seeded from whatever `store` currently holds.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self, AppError> {
        let current = store.load()?;
        if current.is_some() {
            tracing::debug!("Restored persisted session");
        }
        Ok(Self {
            store,
            current: RwLock::new(current),
            epoch: AtomicU64::new(0),
        })
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Counter bumped on every sign-in and sign-out.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Persist `token` and make it the current session.
    pub fn sign_in(&self, token: impl Into<String>) -> Result<Session, AppError> {
        let session = Session {
            token: token.into(),
            signed_in_at: Utc::now(),
        };
        self.store.save(&session)?;
        *self.write() = Some(session.clone());
        self.epoch.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Signed in");
        Ok(session)
    }

    /// Drop the current session from memory and from the store.
    pub fn sign_out(&self) -> Result<(), AppError> {
        self.store.clear()?;
        *self.write() = None;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Signed out");
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_persists_and_bumps_epoch() {
        let store = Arc::new(MemorySessionStore::default());
        let ctx = SessionContext::load(store.clone()).unwrap();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.epoch(), 0);

        ctx.sign_in("tok123").unwrap();

        assert_eq!(ctx.token().as_deref(), Some("tok123"));
        assert_eq!(store.load().unwrap().unwrap().token, "tok123");
        assert_eq!(ctx.epoch(), 1);
    }

    #[test]
    fn test_sign_out_clears_store() {
        let store = Arc::new(MemorySessionStore::default());
        let ctx = SessionContext::load(store.clone()).unwrap();
        ctx.sign_in("tok123").unwrap();

        ctx.sign_out().unwrap();

        assert!(ctx.token().is_none());
        assert!(store.load().unwrap().is_none());
        assert_eq!(ctx.epoch(), 2);
    }

    #[test]
    fn test_load_restores_existing_session() {
        let store = Arc::new(MemorySessionStore::default());
        store
            .save(&Session {
                token: "persisted".to_string(),
                signed_in_at: Utc::now(),
            })
            .unwrap();

        let ctx = SessionContext::load(store).unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token().as_deref(), Some("persisted"));
    }
}
