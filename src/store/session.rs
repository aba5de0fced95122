use std::sync::Arc;

use crate::errors::StoreError;
use crate::models::Account;

use super::{CURRENT_USER_KEY, KeyValueStore, load_json, save_json};

/// The signed-in user, mirrored to the store so it survives restarts.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    current: Option<Account>,
}

impl Session {
    /// Rehydrate from the persisted current-user marker.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let current: Option<Account> = load_json(store.as_ref(), CURRENT_USER_KEY)?;
        if let Some(account) = &current {
            log::info!("Restored session for {}", account.email);
        }
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn login(&mut self, account: Account) -> Result<(), StoreError> {
        save_json(self.store.as_ref(), CURRENT_USER_KEY, &account)?;
        self.current = Some(account);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_USER_KEY)?;
        if let Some(account) = self.current.take() {
            log::info!("Signed out {}", account.email);
        }
        Ok(())
    }
}
