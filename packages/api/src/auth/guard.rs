//! Owner check applied before every profile view and every user or feedback mutation.
//!
//! The session identity is passed in explicitly as `Option<&str>`: `None` is an
//! anonymous session, which never owns anything.

use crate::error::{Error, Result};

/// `true` when the logged-in identity is exactly the resource owner.
pub fn is_owner(identity: Option<&str>, owner: &str) -> bool {
    identity.is_some_and(|current| current == owner)
}

/// [`is_owner`] as a `Result`, so callers can bail out with `?` before touching state.
pub fn require_owner(identity: Option<&str>, owner: &str) -> Result<()> {
    if is_owner(identity, owner) {
        Ok(())
    } else {
        tracing::warn!(
            identity = identity.unwrap_or("<anonymous>"),
            owner,
            "owner check failed"
        );
        Err(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_matches() {
        assert!(is_owner(Some("alice"), "alice"));
        assert!(require_owner(Some("alice"), "alice").is_ok());
    }

    #[test]
    fn test_other_user_is_not_owner() {
        assert!(!is_owner(Some("bob"), "alice"));
        assert!(matches!(
            require_owner(Some("bob"), "alice"),
            Err(Error::Unauthorized)
        ));
    }

    #[test]
    fn test_anonymous_is_never_owner() {
        assert!(!is_owner(None, "alice"));
        assert!(!is_owner(None, ""));
    }

    #[test]
    fn test_comparison_is_exact() {
        assert!(!is_owner(Some("Alice"), "alice"));
        assert!(!is_owner(Some("alice "), "alice"));
    }
}
