use api::auth::{messages, require_owner, Flash};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use super::deny;
use crate::error::WebError;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::views;

/// GET /users/{username}
#[tracing::instrument(skip_all, fields(%username))]
pub async fn show_user(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(username): Path<String>,
) -> Result<Response, WebError> {
    let identity = ctx.identity().await?;

    match api::feedback::profile(state.store.as_ref(), identity.as_deref(), &username).await {
        Ok(profile) => Ok(views::user_detail(ctx.take_flashes().await?, profile).into_response()),
        Err(api::Error::Unauthorized) => deny(&ctx).await,
        Err(e) => Err(e.into()),
    }
}

/// POST /users/{username}/delete
#[tracing::instrument(skip_all, fields(%username))]
pub async fn delete_user(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(username): Path<String>,
) -> Result<Response, WebError> {
    let identity = ctx.identity().await?;
    if require_owner(identity.as_deref(), &username).is_err() {
        return deny(&ctx).await;
    }

    state.credentials.delete_user(&username).await?;
    ctx.log_out().await?;
    ctx.flash(Flash::info(messages::ACCOUNT_DELETED)).await?;
    Ok(Redirect::to("/").into_response())
}
