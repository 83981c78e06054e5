//! Session data types.

use serde::{Deserialize, Serialize};

/// Key for storing the logged-in username in the session.
pub const SESSION_USERNAME_KEY: &str = "username";

/// Key for the queue of flash messages waiting to be shown.
pub const SESSION_FLASHES_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }
}

/// Messages surfaced to the user. Kept in one place so the web layer and tests agree.
pub mod messages {
    pub const NO_PERMISSION: &str = "You don't have permission to do that!";
    pub const IDENTITY_TAKEN: &str = "Username or email is taken. Please select another";
    pub const BAD_CREDENTIALS: &str = "Incorrect username/password";
    pub const WELCOME_BACK: &str = "Welcome back";
    pub const GOODBYE: &str = "Goodbye";
    pub const ACCOUNT_DELETED: &str = "Your account has been deleted";
}

