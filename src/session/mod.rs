//! Durable session storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is a `(token, user)` pair held in a key-value store that
//! survives reloads. The store is passed explicitly to the auth client so
//! tests can swap in [`store::MemoryStore`] instead of browser storage.


pub mod store;

use crate::error::StorageError;
use crate::net::types::User;

pub use store::SessionStore;

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Write both halves of a session. On failure both keys are cleared so no
/// half-written session can sign later requests.
///
/// # Errors
///
/// Returns the first [`StorageError`] reported by the backend.
pub fn persist<S: SessionStore + ?Sized>(store: &S, token: &str, user: &User) -> Result<(), StorageError> {
    let written = store
        .set(TOKEN_KEY, token)
        .and_then(|()| store.set(USER_KEY, &user.to_string()));
    if let Err(e) = &written {
        log::warn!("session write failed, clearing: {e}");
        clear(store);
    }
    written
}

/// Remove both halves of a session. Never fails.
pub fn clear<S: SessionStore + ?Sized>(store: &S) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}

/// Stored bearer token, if any. Empty strings count as absent.
pub fn token<S: SessionStore + ?Sized>(store: &S) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Stored user record, or `None` if absent or unparseable.
pub fn user<S: SessionStore + ?Sized>(store: &S) -> Option<User> {
    let raw = store.get(USER_KEY)?;
    match serde_json::from_str::<User>(&raw) {
        Ok(user) if !user.is_null() => Some(user),
        Ok(_) => None,
        Err(e) => {
            log::warn!("discarding unparseable stored user record: {e}");
            None
        }
    }
}
