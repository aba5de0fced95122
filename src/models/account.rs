use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered student. The password is kept in plaintext; there is no
/// backend that could verify a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub registered_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: &str, password: &str, full_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// Input to account registration.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}
