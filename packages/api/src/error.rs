//! Error type shared by the credential and feedback operations.

use store::StoreError;

use crate::forms::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Username or email already belongs to another account.
    #[error("username or email is already taken")]
    DuplicateIdentity,

    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session identity does not own the resource.
    #[error("not permitted")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("invalid form input")]
    Validation(FieldErrors),

    #[error("password hashing failed: {0}")]
    Password(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Error::DuplicateIdentity,
            StoreError::UnknownOwner => Error::NotFound,
            other => Error::Store(other),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
