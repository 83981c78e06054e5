//! # API crate — credential, authorization, and feedback logic
//!
//! Everything the web layer needs short of HTTP itself. Handlers in the `web` crate
//! extract the session identity and form body, call into this crate, and map the
//! [`Error`] they get back onto a response.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing, session keys and flash messages, the owner guard |
//! | [`credentials`] | [`CredentialManager`]: register, authenticate, delete user |
//! | [`feedback`] | Guarded profile view and feedback create/update/delete |
//! | [`forms`] | Typed form structs and their validation into [`FieldErrors`] |
//! | [`db`] | PostgreSQL pool, migrations, and [`db::PgStore`] |
//! | [`models`] | Client-safe projections ([`UserInfo`], [`Profile`]) |
//! | [`error`] | The crate-wide [`Error`] enum |

pub mod auth;
pub mod credentials;
pub mod db;
pub mod error;
pub mod feedback;
pub mod forms;
pub mod models;

pub use credentials::CredentialManager;
pub use error::{Error, Result};
pub use forms::FieldErrors;
pub use models::{Profile, UserInfo};
