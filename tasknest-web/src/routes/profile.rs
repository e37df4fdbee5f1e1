/// Profile handlers: account data, password change, email change
///
/// Failures re-render the originating form with a transient message, in the
/// same way the task forms do; nothing is written on a failed attempt.
use crate::{
    app::AppState,
    error::{AppError, AppResult},
};
use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Response},
    Form,
};
use minijinja::context;
use serde::Deserialize;
use tasknest_shared::auth::password::{hash_password, verify_password};
use tasknest_shared::auth::session::AuthSession;
use tasknest_shared::models::user::User;
use tracing::info;

/// Password change form payload
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    /// The password currently on the account
    pub current_password: String,

    /// The replacement password
    pub new_password: String,

    /// Confirmation; must match `new_password`
    pub new_password_confirm: String,
}

/// Email change form payload
#[derive(Debug, Deserialize)]
pub struct EmailForm {
    /// The replacement email address
    pub email: String,

    /// Confirmation; must match `email`
    pub email_confirm: String,
}

/// GET `/profile/user_data` — the caller's profile page
pub async fn user_data(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Response> {
    let html = state
        .views
        .render("user_data.html", context! { user => auth.user })?;
    Ok(html.into_response())
}

/// GET `/profile/password` — render the password change form
pub async fn password_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Response> {
    let html = state
        .views
        .render("edit_password.html", context! { user => auth.user })?;
    Ok(html.into_response())
}

/// POST `/profile/password` — replace the stored password hash
///
/// Requires the current password to verify and the new pair to match; on
/// success the old password stops verifying immediately.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Form(form): Form<PasswordForm>,
) -> AppResult<Response> {
    let current_ok = verify_password(&form.current_password, &auth.user.password_hash)?;
    if !current_ok {
        let html = state.views.render(
            "edit_password.html",
            context! { user => auth.user, error => "Current password is incorrect" },
        )?;
        return Ok(html.into_response());
    }

    if form.new_password.is_empty() {
        let html = state.views.render(
            "edit_password.html",
            context! { user => auth.user, error => "New password must not be empty" },
        )?;
        return Ok(html.into_response());
    }

    if form.new_password != form.new_password_confirm {
        let html = state.views.render(
            "edit_password.html",
            context! { user => auth.user, error => "New passwords do not match" },
        )?;
        return Ok(html.into_response());
    }

    let password_hash = hash_password(&form.new_password)?;
    User::update_password(&state.db, auth.user.id, &password_hash).await?;

    info!(user_id = %auth.user.id, "Password changed");

    let html = state.views.render(
        "edit_password.html",
        context! { user => auth.user, message => "Password updated" },
    )?;
    Ok(html.into_response())
}

/// GET `/profile/email` — render the email change form
pub async fn email_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Response> {
    let html = state
        .views
        .render("edit_email.html", context! { user => auth.user })?;
    Ok(html.into_response())
}

/// POST `/profile/email` — replace the account email
///
/// A mismatched confirmation or an address already registered to another
/// account re-renders the form with a message.
pub async fn change_email(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Form(form): Form<EmailForm>,
) -> AppResult<Response> {
    if form.email.is_empty() {
        let html = state.views.render(
            "edit_email.html",
            context! { user => auth.user, error => "New email must not be empty" },
        )?;
        return Ok(html.into_response());
    }

    if form.email != form.email_confirm {
        let html = state.views.render(
            "edit_email.html",
            context! { user => auth.user, error => "New emails do not match" },
        )?;
        return Ok(html.into_response());
    }

    let updated = User::update_email(&state.db, auth.user.id, &form.email).await;

    match updated {
        Ok(_) => {
            info!(user_id = %auth.user.id, "Email changed");
            let html = state.views.render(
                "edit_email.html",
                context! { user => auth.user, message => "Email updated" },
            )?;
            Ok(html.into_response())
        }
        Err(e) => match AppError::from(e) {
            AppError::Conflict(msg) => {
                let html = state.views.render(
                    "edit_email.html",
                    context! { user => auth.user, error => msg },
                )?;
                Ok(html.into_response())
            }
            other => Err(other),
        },
    }
}
