//! # FeedbackStore — persistence seam for users and feedback
//!
//! Everything above this crate talks to storage through the [`FeedbackStore`] trait, so
//! the same credential and feedback logic runs against the in-memory store
//! ([`crate::MemoryStore`], used by tests) and the PostgreSQL store in the `api` crate.
//!
//! ## Contract
//!
//! | Method | Notes |
//! |--------|-------|
//! | [`insert_user`](FeedbackStore::insert_user) | Fails with [`StoreError::Conflict`] when the username or email is already taken. Nothing is written on failure. |
//! | [`find_user`](FeedbackStore::find_user) | Lookup by primary key. |
//! | [`delete_user`](FeedbackStore::delete_user) | Removes the user **and** every feedback row it owns as one atomic unit. Returns `false` if the user did not exist. |
//! | [`list_feedback_for`](FeedbackStore::list_feedback_for) | Ordered by ascending id. |
//! | [`insert_feedback`](FeedbackStore::insert_feedback) | Assigns the id. Fails with [`StoreError::UnknownOwner`] if the owner is gone. |
//! | [`find_feedback`](FeedbackStore::find_feedback) / [`update_feedback`](FeedbackStore::update_feedback) / [`delete_feedback`](FeedbackStore::delete_feedback) | Keyed by id; a missing id is `None`/`false`, never an error. |

use async_trait::async_trait;

use crate::models::{Feedback, FeedbackDraft, NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Carries the constraint or column name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("feedback owner does not exist")]
    UnknownOwner,
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Async storage interface for users and feedback.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>>;

    async fn delete_user(&self, username: &str) -> StoreResult<bool>;

    async fn list_feedback_for(&self, username: &str) -> StoreResult<Vec<Feedback>>;

    async fn insert_feedback(&self, username: &str, draft: FeedbackDraft)
        -> StoreResult<Feedback>;

    async fn find_feedback(&self, id: i32) -> StoreResult<Option<Feedback>>;

    async fn update_feedback(&self, id: i32, draft: FeedbackDraft)
        -> StoreResult<Option<Feedback>>;

    async fn delete_feedback(&self, id: i32) -> StoreResult<bool>;
}
