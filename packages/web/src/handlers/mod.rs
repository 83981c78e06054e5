pub mod auth;
pub mod feedback;
pub mod users;

use api::auth::{messages, Flash};
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::WebError;
use crate::session::SessionContext;

fn profile_url(username: &str) -> String {
    format!("/users/{}", username)
}

/// Failed owner check: nothing was changed, send the caller home with a warning.
async fn deny(ctx: &SessionContext) -> Result<Response, WebError> {
    ctx.flash(Flash::warning(messages::NO_PERMISSION)).await?;
    Ok(Redirect::to("/").into_response())
}
