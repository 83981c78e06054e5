use api::auth::require_owner;
use api::forms::FeedbackForm;
use api::FieldErrors;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::{deny, profile_url};
use crate::error::WebError;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::views;

/// Feedback ids are integers; anything else cannot name an existing entry.
fn parse_id(raw: &str) -> Result<i32, WebError> {
    raw.parse().map_err(|_| WebError::not_found())
}

/// GET /users/{username}/feedback/add
#[tracing::instrument(skip_all, fields(%username))]
pub async fn add_form(
    ctx: SessionContext,
    Path(username): Path<String>,
) -> Result<Response, WebError> {
    let identity = ctx.identity().await?;
    if require_owner(identity.as_deref(), &username).is_err() {
        return deny(&ctx).await;
    }

    Ok(views::feedback_form(
        ctx.take_flashes().await?,
        &username,
        &FeedbackForm::default(),
        FieldErrors::default(),
    )
    .into_response())
}

/// POST /users/{username}/feedback/add
#[tracing::instrument(skip_all, fields(%username))]
pub async fn add(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(username): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, WebError> {
    let identity = ctx.identity().await?;
    if require_owner(identity.as_deref(), &username).is_err() {
        return deny(&ctx).await;
    }

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(
                views::feedback_form(ctx.take_flashes().await?, &username, &form, errors)
                    .render(StatusCode::UNPROCESSABLE_ENTITY),
            )
        }
    };

    match api::feedback::add(state.store.as_ref(), identity.as_deref(), &username, draft).await {
        Ok(_) => Ok(Redirect::to(&profile_url(&username)).into_response()),
        Err(api::Error::Unauthorized) => deny(&ctx).await,
        Err(e) => Err(e.into()),
    }
}

/// GET /feedback/{id}/update
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn edit_form(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id)?;
    let identity = ctx.identity().await?;

    match api::feedback::load_for_edit(state.store.as_ref(), identity.as_deref(), id).await {
        Ok(feedback) => Ok(views::edit_feedback_form(
            ctx.take_flashes().await?,
            &feedback,
            &FeedbackForm::from(&feedback),
            FieldErrors::default(),
        )
        .into_response()),
        Err(api::Error::Unauthorized) => deny(&ctx).await,
        Err(e) => Err(e.into()),
    }
}

/// POST /feedback/{id}/update
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, WebError> {
    let id = parse_id(&id)?;
    let identity = ctx.identity().await?;

    // Existence and ownership come before form validation, so a stranger never sees
    // the form echoed back.
    let existing =
        match api::feedback::load_for_edit(state.store.as_ref(), identity.as_deref(), id).await {
            Ok(feedback) => feedback,
            Err(api::Error::Unauthorized) => return deny(&ctx).await,
            Err(e) => return Err(e.into()),
        };

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(
                views::edit_feedback_form(ctx.take_flashes().await?, &existing, &form, errors)
                    .render(StatusCode::UNPROCESSABLE_ENTITY),
            )
        }
    };

    match api::feedback::update(state.store.as_ref(), identity.as_deref(), id, draft).await {
        Ok(updated) => Ok(Redirect::to(&profile_url(&updated.username)).into_response()),
        Err(api::Error::Unauthorized) => deny(&ctx).await,
        Err(e) => Err(e.into()),
    }
}

/// POST /feedback/{id}/delete
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id)?;
    let identity = ctx.identity().await?;

    match api::feedback::delete(state.store.as_ref(), identity.as_deref(), id).await {
        Ok(owner) => Ok(Redirect::to(&profile_url(&owner)).into_response()),
        Err(api::Error::Unauthorized) => deny(&ctx).await,
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("5").unwrap(), 5);
        assert!(matches!(
            parse_id("abc"),
            Err(WebError::Api(api::Error::NotFound))
        ));
        assert!(parse_id("").is_err());
        assert!(parse_id("99999999999").is_err());
    }
}
