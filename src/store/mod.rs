//! Persistence for accounts, the signed-in user and finished scores.
//!
//! Everything is kept as JSON blobs under a handful of fixed keys in a
//! [`KeyValueStore`].

mod accounts;
mod kv;
mod scores;
mod session;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StoreError;

pub use accounts::AccountStore;
pub use kv::{FileStore, MemoryStore};
pub use scores::{RECENT_LIMIT, ScoreStore, ScoreSummary};
pub use session::Session;

pub const CURRENT_USER_KEY: &str = "studyTermTrackUser";
pub const USERS_KEY: &str = "studyTermTrackUsers";
pub const SCORES_KEY: &str = "studyTermTrackScores";

/// String-keyed blob storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub(crate) fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

pub(crate) fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&store, "nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_entry_reports_key() {
        let store = MemoryStore::new();
        store.set(SCORES_KEY, "{not json").unwrap();
        let err = load_json::<Vec<u32>>(&store, SCORES_KEY).unwrap_err();
        assert!(err.to_string().contains(SCORES_KEY));
    }
}
