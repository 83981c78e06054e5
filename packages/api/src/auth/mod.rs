//! Authentication module: password hashing, session keys, and the owner guard.

mod guard;
mod password;
mod session;

pub use guard::{is_owner, require_owner};
pub use password::{hash_password, verify_against_dummy, verify_password};
pub use session::{
    messages, Flash, FlashLevel, SESSION_FLASHES_KEY, SESSION_USERNAME_KEY,
};
