/// Registration, login, and logout
///
/// Login failures return one generic message whether the username is unknown
/// or the password is wrong, so the form cannot be used to enumerate
/// accounts.
use crate::{
    app::AppState,
    error::{AppError, AppResult},
    routes::validation_message,
};
use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;
use minijinja::context;
use serde::Deserialize;
use tasknest_shared::auth::password::{hash_password, verify_password};
use tasknest_shared::auth::session::{AuthSession, Session, SESSION_COOKIE};
use tasknest_shared::models::user::{CreateUser, User};
use tracing::info;
use validator::Validate;

/// Generic invalid-credentials message; identical for unknown usernames and
/// wrong passwords
const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Registration form payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired login name
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    /// Password confirmation; must match `password`
    pub password_confirm: String,
}

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login name
    pub username: String,

    /// Password
    pub password: String,
}

/// GET `/register` — render the registration form
pub async fn register_form(State(state): State<AppState>) -> AppResult<Response> {
    let html = state.views.render("register.html", context! {})?;
    Ok(html.into_response())
}

/// POST `/register` — create an account
///
/// Mismatched confirmation is a validation failure; a duplicate username or
/// email surfaces the unique constraint as a conflict message. In both cases
/// the form is re-rendered and nothing is persisted.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let html = state.views.render(
            "register.html",
            context! { error => validation_message(&errors) },
        )?;
        return Ok(html.into_response());
    }

    if form.password != form.password_confirm {
        let html = state.views.render(
            "register.html",
            context! { error => "Passwords do not match" },
        )?;
        return Ok(html.into_response());
    }

    let password_hash = hash_password(&form.password)?;

    let created = User::create(
        &state.db,
        CreateUser {
            username: form.username,
            email: form.email,
            password_hash,
        },
    )
    .await;

    match created {
        Ok(user) => {
            info!(user_id = %user.id, "Registered new user");
            Ok(Redirect::to("/success").into_response())
        }
        Err(e) => match AppError::from(e) {
            AppError::Conflict(msg) => {
                let html = state
                    .views
                    .render("register.html", context! { error => msg })?;
                Ok(html.into_response())
            }
            other => Err(other),
        },
    }
}

/// GET `/success` — post-registration confirmation page
pub async fn register_success(State(state): State<AppState>) -> AppResult<Response> {
    let html = state.views.render("success.html", context! {})?;
    Ok(html.into_response())
}

/// GET `/login` — render the login form
pub async fn login_form(State(state): State<AppState>) -> AppResult<Response> {
    let html = state.views.render("login.html", context! {})?;
    Ok(html.into_response())
}

/// POST `/login` — verify credentials and establish a session
///
/// On success a persisted session is created and its token set as an
/// HttpOnly cookie; the browser is sent back to the task list.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = User::find_by_username(&state.db, &form.username).await?;

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        let html = state
            .views
            .render("login.html", context! { error => BAD_CREDENTIALS })?;
        return Ok(html.into_response());
    };

    let ttl = Duration::hours(state.config.session.ttl_hours);
    let (_, token) = Session::create(&state.db, user.id, ttl).await?;

    info!(user_id = %user.id, "User logged in");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// GET/POST `/logout` — invalidate the session and clear the cookie
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    jar: CookieJar,
) -> AppResult<Response> {
    Session::revoke(&state.db, auth.session_id).await?;

    info!(user_id = %auth.user.id, "User logged out");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((jar, Redirect::to("/")).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_valid() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
            password_confirm: "pw1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_bad_email() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "pw1".to_string(),
            password_confirm: "pw1".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_register_form_rejects_empty_password() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: String::new(),
            password_confirm: String::new(),
        };
        assert!(form.validate().is_err());
    }
}
