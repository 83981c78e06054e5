use api::auth::Flash;
use api::forms::{FeedbackForm, LoginForm, RegisterForm};
use api::FieldErrors;
use store::Feedback;

use super::Page;

pub fn register_form(flashes: Vec<Flash>, form: &RegisterForm, errors: FieldErrors) -> Page {
    Page::new("register", flashes)
        .with_form(form)
        .with_errors(errors)
        .with_action("/register")
}

pub fn login_form(flashes: Vec<Flash>, form: &LoginForm, errors: FieldErrors) -> Page {
    Page::new("login", flashes)
        .with_form(form)
        .with_errors(errors)
        .with_action("/login")
}

/// Blank (or resubmitted) form for new feedback.
pub fn feedback_form(
    flashes: Vec<Flash>,
    owner: &str,
    form: &FeedbackForm,
    errors: FieldErrors,
) -> Page {
    Page::new("feedback_form", flashes)
        .with_form(form)
        .with_errors(errors)
        .with_action(format!("/users/{}/feedback/add", owner))
}

/// Form pre-filled from an existing entry, or from a rejected edit.
pub fn edit_feedback_form(
    flashes: Vec<Flash>,
    feedback: &Feedback,
    form: &FeedbackForm,
    errors: FieldErrors,
) -> Page {
    Page::new("feedback_form", flashes)
        .with_form(form)
        .with_errors(errors)
        .with_action(format!("/feedback/{}/update", feedback.id))
}
