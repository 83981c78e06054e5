//! # Database module — PostgreSQL pool, migrations, and the `FeedbackStore` impl
//!
//! - [`create_pool`] — opens a [`sqlx::PgPool`] with a bounded number of connections.
//! - [`run_migrations`] — applies the embedded migrations under `migrations/`.
//! - [`PgStore`] — [`store::FeedbackStore`] on top of the pool. User deletion runs
//!   inside an explicit transaction that removes feedback rows first.
//!
//! The pool is created once at startup and handed to whoever needs it; there is no
//! process-wide singleton.

mod pg_store;
mod pool;

pub use pg_store::PgStore;
pub use pool::{create_pool, run_migrations};
