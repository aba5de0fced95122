//! Error types for the whole crate.
//!
//! Each concern gets its own enum; [`AppError`] gathers them for the
//! application loop.

use thiserror::Error;

/// Errors raised by the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt entry for key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sign-in and registration failures. The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please use your {0} email address")]
    InvalidDomain(String),

    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Account already exists. Please sign in instead.")]
    AlreadyExists,

    #[error("Account not found. Please register first.")]
    NotFound,

    #[error("Invalid password")]
    InvalidPassword,
}

/// Failures while accepting a study document.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Please select a valid PDF, Word or PowerPoint file.")]
    UnsupportedType(String),

    #[error("{name} appears to be too small or corrupted")]
    TooSmall { name: String, size: u64 },

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

/// Misuse of the quiz state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("The quiz has already been submitted")]
    AlreadyComplete,

    #[error("A {expected} question cannot take that kind of answer")]
    AnswerMismatch { expected: &'static str },

    #[error("Navigation is disabled in a linear quiz")]
    NavigationLocked,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
