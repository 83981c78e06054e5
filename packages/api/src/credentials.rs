//! # Credential manager — user record lifecycle
//!
//! Owns everything that touches a plaintext password: hashing at registration and
//! verification at login. Argon2 is deliberately slow, so both run on tokio's blocking
//! pool instead of the async worker threads.
//!
//! - [`register`](CredentialManager::register) — hash, then insert. A taken username or
//!   email comes back as [`Error::DuplicateIdentity`] and leaves the existing row alone.
//! - [`authenticate`](CredentialManager::authenticate) — `Some(user)` only for a known
//!   username with the right password. An unknown username still pays for one argon2
//!   verification so the two failure modes cost the same.
//! - [`delete_user`](CredentialManager::delete_user) — removes the user and all owned
//!   feedback in one atomic store call.

use std::sync::Arc;

use store::{FeedbackStore, NewUser, User};

use crate::auth::{hash_password, verify_against_dummy, verify_password};
use crate::error::{Error, Result};
use crate::forms::ValidRegistration;

#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn FeedbackStore>,
}

async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Password(format!("Password task failed: {}", e)))?
}

impl CredentialManager {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Create a user with a freshly salted password hash.
    #[tracing::instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: ValidRegistration) -> Result<User> {
        let ValidRegistration {
            username,
            password,
            email,
            first_name,
            last_name,
        } = registration;

        let password_hash = blocking(move || hash_password(&password)).await?;

        let user = self
            .store
            .insert_user(NewUser {
                username,
                password_hash,
                email,
                first_name,
                last_name,
            })
            .await
            .map_err(Error::from)?;

        tracing::info!("Registered user");
        Ok(user)
    }

    /// Check a username/password pair. Unknown users and wrong passwords both yield `None`.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let password = password.to_string();

        let Some(user) = self.store.find_user(username).await? else {
            blocking(move || {
                verify_against_dummy(&password);
                Ok(())
            })
            .await?;
            return Ok(None);
        };

        let hash = user.password_hash.clone();
        let valid = blocking(move || verify_password(&password, &hash)).await?;
        Ok(valid.then_some(user))
    }

    /// [`authenticate`](Self::authenticate), with a miss turned into
    /// [`Error::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        self.authenticate(username, password)
            .await?
            .ok_or(Error::InvalidCredentials)
    }

    /// Delete a user and, in the same transaction, all of their feedback.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> Result<()> {
        if self.store.delete_user(username).await? {
            tracing::info!("Deleted user and owned feedback");
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{FeedbackDraft, MemoryStore};

    fn registration(username: &str, password: &str, email: &str) -> ValidRegistration {
        ValidRegistration {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            first_name: "First".into(),
            last_name: "Last".into(),
        }
    }

    fn manager() -> (CredentialManager, MemoryStore) {
        let store = MemoryStore::new();
        (CredentialManager::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (creds, store) = manager();
        let user = creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        let stored = store.find_user("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw1");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let (creds, store) = manager();
        creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();

        let err = creds
            .register(registration("alice", "other", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentity));

        // The original account is unchanged
        let stored = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
        assert!(creds.authenticate("alice", "pw1").await.unwrap().is_some());
        assert!(creds.authenticate("alice", "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (creds, store) = manager();
        creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();

        let err = creds
            .register(registration("bob", "pw2", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentity));
        assert!(store.find_user("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_matrix() {
        let (creds, _) = manager();
        creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();

        let user = creds.authenticate("alice", "pw1").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");

        assert!(creds.authenticate("alice", "wrong").await.unwrap().is_none());
        assert!(creds.authenticate("nobody", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_maps_miss_to_invalid_credentials() {
        let (creds, _) = manager();
        creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();

        assert!(creds.login("alice", "pw1").await.is_ok());
        assert!(matches!(
            creds.login("alice", "nope").await,
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            creds.login("ghost", "nope").await,
            Err(Error::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_feedback() {
        let (creds, store) = manager();
        creds
            .register(registration("alice", "pw1", "a@x.com"))
            .await
            .unwrap();
        let fb = store
            .insert_feedback("alice", FeedbackDraft::new("T", "C"))
            .await
            .unwrap();

        creds.delete_user("alice").await.unwrap();

        assert!(store.find_user("alice").await.unwrap().is_none());
        assert!(store.find_feedback(fb.id).await.unwrap().is_none());
        assert!(matches!(
            creds.delete_user("alice").await,
            Err(Error::NotFound)
        ));
    }
}
