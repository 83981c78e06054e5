//! # Typed form inputs and their validation
//!
//! Each HTML form posted to the web layer deserializes into one of the structs below.
//! Every field is `#[serde(default)]`, so a missing field arrives as an empty string and
//! is reported by `validate` rather than rejected by the extractor.
//!
//! | Form | Validated into |
//! |------|----------------|
//! | [`RegisterForm`] | [`ValidRegistration`] |
//! | [`LoginForm`] | [`ValidLogin`] |
//! | [`FeedbackForm`] | [`store::FeedbackDraft`] |
//!
//! Text fields are trimmed; passwords are taken verbatim. Emails are lower-cased so the
//! unique constraint behaves case-insensitively. Length caps mirror the column sizes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use store::FeedbackDraft;

pub const USERNAME_MAX: usize = 20;
pub const EMAIL_MAX: usize = 50;
pub const NAME_MAX: usize = 30;
pub const TITLE_MAX: usize = 100;

/// Field name to messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn text(errors: &mut FieldErrors, field: &'static str, raw: &str, max: usize) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > max {
        errors.add(field, format!("Must be at most {} characters.", max));
    }
    value.to_string()
}

fn secret(errors: &mut FieldErrors, field: &'static str, raw: &str) -> String {
    if raw.is_empty() {
        errors.add(field, "This field is required.");
    }
    raw.to_string()
}

/// Usernames become a path segment in `/users/{username}`, so a leading dot is refused.
/// That rules out the `.` and `..` segments clients resolve away.
fn is_valid_username(username: &str) -> bool {
    !username.starts_with('.')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Registration form as posted.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// A registration that passed validation.
#[derive(Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for ValidRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidRegistration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = text(&mut errors, "username", &self.username, USERNAME_MAX);
        if !username.is_empty() && !is_valid_username(&username) {
            errors.add(
                "username",
                "Only letters, digits, '_', '-' and '.' are allowed, and it may not start with '.'.",
            );
        }
        let password = secret(&mut errors, "password", &self.password);
        let email = text(&mut errors, "email", &self.email, EMAIL_MAX).to_lowercase();
        if !email.is_empty() && !is_valid_email(&email) {
            errors.add("email", "Invalid email address.");
        }
        let first_name = text(&mut errors, "first_name", &self.first_name, NAME_MAX);
        let last_name = text(&mut errors, "last_name", &self.last_name, NAME_MAX);

        errors.finish(ValidRegistration {
            username,
            password,
            email,
            first_name,
            last_name,
        })
    }
}

/// Login form as posted.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ValidLogin {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ValidLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidLogin")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<ValidLogin, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = text(&mut errors, "username", &self.username, USERNAME_MAX);
        let password = secret(&mut errors, "password", &self.password);
        errors.finish(ValidLogin { username, password })
    }
}

/// Feedback add/edit form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<FeedbackDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = text(&mut errors, "title", &self.title, TITLE_MAX);
        let content = self.content.trim().to_string();
        if content.is_empty() {
            errors.add("content", "This field is required.");
        }
        errors.finish(FeedbackDraft { title, content })
    }
}

impl From<&store::Feedback> for FeedbackForm {
    fn from(feedback: &store::Feedback) -> Self {
        Self {
            title: feedback.title.clone(),
            content: feedback.content.clone(),
        }
    }
}
