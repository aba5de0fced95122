use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::errors::{AppResult, AuthError};
use crate::models::{Account, RegisterForm};

use super::{KeyValueStore, USERS_KEY, load_json, save_json};

type Directory = BTreeMap<String, Account>;

/// E-mail keyed account directory.
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
    email_domain: String,
    min_password_len: usize,
}

impl AccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>, settings: &Settings) -> Self {
        Self {
            store,
            email_domain: settings.email_domain.clone(),
            min_password_len: settings.min_password_len,
        }
    }

    /// Validate the form and add exactly one account.
    pub fn register(&self, form: &RegisterForm) -> AppResult<Account> {
        self.check_domain(&form.email)?;

        if [&form.email, &form.password, &form.confirm_password, &form.full_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::MissingFields.into());
        }
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        if form.password.chars().count() < self.min_password_len {
            return Err(AuthError::PasswordTooShort(self.min_password_len).into());
        }

        let mut directory = self.directory()?;
        if directory.contains_key(&form.email) {
            return Err(AuthError::AlreadyExists.into());
        }

        let account = Account::new(&form.email, &form.password, &form.full_name);
        directory.insert(account.email.clone(), account.clone());
        save_json(self.store.as_ref(), USERS_KEY, &directory)?;

        log::info!("Registered account {}", account.email);
        Ok(account)
    }

    pub fn sign_in(&self, email: &str, password: &str) -> AppResult<Account> {
        self.check_domain(email)?;

        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields.into());
        }

        let account = self
            .directory()?
            .remove(email)
            .ok_or(AuthError::NotFound)?;

        if account.password != password {
            return Err(AuthError::InvalidPassword.into());
        }

        log::info!("Signed in {}", account.email);
        Ok(account)
    }

    pub fn find(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.directory()?.remove(email))
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.directory()?.len())
    }

    fn check_domain(&self, email: &str) -> Result<(), AuthError> {
        if email.ends_with(&self.email_domain) {
            Ok(())
        } else {
            Err(AuthError::InvalidDomain(self.email_domain.clone()))
        }
    }

    fn directory(&self) -> AppResult<Directory> {
        Ok(load_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }
}
