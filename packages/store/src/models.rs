//! # Domain records for users and their feedback
//!
//! Defines the rows that a [`crate::FeedbackStore`] reads and writes. These are plain
//! data carriers; validation happens before a value ever reaches the store, and
//! uniqueness is enforced by the store itself.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A persisted account. `username` is the primary key, `email` is unique, and `password_hash` is a PHC-format argon2 string. |
//! | [`NewUser`] | The insert shape for a user: same fields as [`User`], with the hash already computed. |
//! | [`Feedback`] | A feedback entry. `id` is assigned by the store; `username` is the owning account. |
//! | [`FeedbackDraft`] | Title and content for a feedback create or update. |
//!
//! `User` and `NewUser` implement [`Debug`] by hand so the password hash never ends up
//! in a log line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A persisted user account.
#[derive(Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Insert shape for a user.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
        }
    }
}

/// A feedback entry owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Owning user's username
    pub username: String,
}

/// Title and content for creating or editing feedback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub title: String,
    pub content: String,
}

impl FeedbackDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
