//! Request-scoped view of the cookie-backed session.
//!
//! Handlers take a [`SessionContext`] argument instead of reaching for global state. It
//! wraps the `tower_sessions::Session` for the current request and exposes only what
//! the app stores there: the logged-in username and the flash queue.

use api::auth::{Flash, SESSION_FLASHES_KEY, SESSION_USERNAME_KEY};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::{session, Session};

pub struct SessionContext {
    session: Session,
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self { session })
    }
}

impl SessionContext {
    /// Username of the logged-in user, or `None` for an anonymous session.
    pub async fn identity(&self) -> Result<Option<String>, session::Error> {
        self.session.get(SESSION_USERNAME_KEY).await
    }

    /// Become `username`. The session id is rotated first so an id handed out before
    /// login cannot be reused afterwards.
    pub async fn log_in(&self, username: &str) -> Result<(), session::Error> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_USERNAME_KEY, username).await
    }

    /// Back to anonymous. Pending flashes survive.
    pub async fn log_out(&self) -> Result<(), session::Error> {
        self.session
            .remove::<String>(SESSION_USERNAME_KEY)
            .await
            .map(|_| ())
    }

    pub async fn flash(&self, flash: Flash) -> Result<(), session::Error> {
        let mut queue: Vec<Flash> = self
            .session
            .get(SESSION_FLASHES_KEY)
            .await?
            .unwrap_or_default();
        queue.push(flash);
        self.session.insert(SESSION_FLASHES_KEY, queue).await
    }

    /// Drain the flash queue for rendering.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>, session::Error> {
        Ok(self
            .session
            .remove(SESSION_FLASHES_KEY)
            .await?
            .unwrap_or_default())
    }
}
