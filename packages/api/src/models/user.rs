//! # User projections
//!
//! [`store::User`] is the full row and carries the password hash, so it never leaves the
//! server. [`UserInfo`] is the subset that is safe to put in a response body, and
//! [`Profile`] bundles it with the user's feedback for the detail page.

use serde::{Deserialize, Serialize};
use store::{Feedback, User};

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserInfo {
    /// "First Last", falling back to the username when both names are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// A user together with every feedback entry they own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user: UserInfo,
    pub feedback: Vec<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut info = UserInfo {
            username: "alice".into(),
            email: "a@x.com".into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
        };
        assert_eq!(info.full_name(), "Alice Liddell");

        info.first_name.clear();
        info.last_name.clear();
        assert_eq!(info.full_name(), "alice");
    }
}
