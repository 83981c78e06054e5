//! JSON view models for every page the app renders.
//!
//! Markup is out of scope for this service; a page is the data a template would need.
//! Every page carries its name in `view` and the flash messages drained from the
//! session. Form pages echo the submitted values (never passwords) and field errors.

mod forms;
mod user_detail;

pub use forms::{edit_feedback_form, feedback_form, login_form, register_form};
pub use user_detail::user_detail;

use api::auth::Flash;
use api::{FieldErrors, UserInfo};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use store::Feedback;

#[derive(Debug, Serialize)]
pub struct Page {
    pub view: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub form: Value,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    /// Display title, e.g. the user's full name on the profile page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<Feedback>>,
    /// Set on the edit form so the client knows where to post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Page {
    pub fn new(view: &'static str, flashes: Vec<Flash>) -> Self {
        Self {
            view,
            flashes,
            form: Value::Null,
            errors: FieldErrors::default(),
            heading: None,
            user: None,
            feedback: None,
            action: None,
        }
    }

    pub fn with_form(mut self, form: &impl Serialize) -> Self {
        self.form = serde_json::to_value(form).unwrap_or_default();
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn render(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        self.render(StatusCode::OK)
    }
}
