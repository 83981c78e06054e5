//! # Web crate — HTTP shell for the feedback board
//!
//! Wires the `api` crate onto an axum [`Router`]: one cookie-backed session per client
//! (tower-sessions), a [`SessionContext`](session::SessionContext) extractor that hands
//! each handler its session identity, and JSON page models in [`views`].
//!
//! [`build_router`] is generic over the session store so tests can run against
//! `tower_sessions::MemoryStore` while the binary uses the PostgreSQL store.

pub mod error;
pub mod handlers;
pub mod session;
pub mod settings;
pub mod state;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use handlers::{auth, feedback, users};
use state::AppState;

/// Session layer configuration shared by the binary and the tests.
pub fn session_layer<S>(store: S, settings: &settings::Session) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            settings.inactivity_days,
        )))
}

pub fn build_router<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/", get(auth::home))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/users/{username}", get(users::show_user))
        .route("/users/{username}/delete", post(users::delete_user))
        .route(
            "/users/{username}/feedback/add",
            get(feedback::add_form).post(feedback::add),
        )
        .route(
            "/feedback/{id}/update",
            get(feedback::edit_form).post(feedback::update),
        )
        .route("/feedback/{id}/delete", post(feedback::delete))
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
