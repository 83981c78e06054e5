use api::auth::{messages, Flash};
use api::forms::{LoginForm, RegisterForm};
use api::FieldErrors;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::profile_url;
use crate::error::WebError;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::views::{self, Page};

/// GET /
pub async fn home() -> Redirect {
    Redirect::to("/register")
}

/// GET /register
pub async fn register_form(ctx: SessionContext) -> Result<Page, WebError> {
    Ok(views::register_form(
        ctx.take_flashes().await?,
        &RegisterForm::default(),
        FieldErrors::default(),
    ))
}

/// POST /register
#[tracing::instrument(skip_all, fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    ctx: SessionContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => {
            return Ok(views::register_form(ctx.take_flashes().await?, &form, errors)
                .render(StatusCode::UNPROCESSABLE_ENTITY))
        }
    };

    match state.credentials.register(registration).await {
        Ok(user) => {
            ctx.log_in(&user.username).await?;
            Ok(Redirect::to(&profile_url(&user.username)).into_response())
        }
        Err(api::Error::DuplicateIdentity) => {
            tracing::info!("Registration rejected: identity taken");
            let mut flashes = ctx.take_flashes().await?;
            flashes.push(Flash::danger(messages::IDENTITY_TAKEN));
            Ok(views::register_form(flashes, &form, FieldErrors::default())
                .render(StatusCode::CONFLICT))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(ctx: SessionContext) -> Result<Page, WebError> {
    Ok(views::login_form(
        ctx.take_flashes().await?,
        &LoginForm::default(),
        FieldErrors::default(),
    ))
}

/// POST /login
#[tracing::instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    ctx: SessionContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok(views::login_form(ctx.take_flashes().await?, &form, errors)
                .render(StatusCode::UNPROCESSABLE_ENTITY))
        }
    };

    match state
        .credentials
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => {
            ctx.log_in(&user.username).await?;
            ctx.flash(Flash::success(messages::WELCOME_BACK)).await?;
            tracing::info!("User logged in");
            Ok(Redirect::to(&profile_url(&user.username)).into_response())
        }
        Err(api::Error::InvalidCredentials) => {
            tracing::info!("Login rejected");
            let mut flashes = ctx.take_flashes().await?;
            flashes.push(Flash::danger(messages::BAD_CREDENTIALS));
            Ok(views::login_form(flashes, &form, FieldErrors::default())
                .render(StatusCode::UNAUTHORIZED))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(ctx: SessionContext) -> Result<Redirect, WebError> {
    if let Some(username) = ctx.identity().await? {
        tracing::info!(%username, "User logged out");
    }
    ctx.log_out().await?;
    ctx.flash(Flash::info(messages::GOODBYE)).await?;
    Ok(Redirect::to("/"))
}
