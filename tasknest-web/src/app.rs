/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with all
/// routes and middleware.
///
/// # Route Map
///
/// ```text
/// /                         GET            active task list (public)
/// /about                    GET            static page (public)
/// /register                 GET, POST      account creation (public)
/// /success                  GET            post-registration page (public)
/// /login                    GET, POST      session start (public)
/// /logout                   GET, POST      session end
/// /add                      GET, POST      create task
/// /edit?id=                 GET, POST      update task
/// /delete?id=               GET            delete task
/// /task_done?id=            GET            archive task
/// /archive                  GET            archived task list
/// /archive/undo?id=         GET            restore archived task
/// /archive/delete?id=       GET            delete archived task
/// /profile/user_data        GET            profile page
/// /profile/password         GET, POST      change password
/// /profile/email            GET, POST      change email
/// ```
///
/// Everything below `/logout` in the table requires an authenticated session;
/// the middleware redirects anonymous requests to `/login` before a handler
/// runs.
use crate::{config::Config, error::AppError, routes, views::Views};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::PgPool;
use std::sync::Arc;
use tasknest_shared::auth::session::{Session, SESSION_COOKIE};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor; the fields
/// are cheap to clone (pool handle and `Arc`s).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Compiled templates
    pub views: Arc<Views>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            views: Arc::new(Views::new()),
        }
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Public pages: task list, static pages, registration, login
    let public_routes = Router::new()
        .route("/", get(routes::tasks::home))
        .route("/about", get(routes::pages::about))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route("/success", get(routes::auth::register_success))
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        );

    // Everything else requires a resolved session
    let protected_routes = Router::new()
        .route("/logout", get(routes::auth::logout).post(routes::auth::logout))
        .route(
            "/add",
            get(routes::tasks::add_form).post(routes::tasks::add),
        )
        .route(
            "/edit",
            get(routes::tasks::edit_form).post(routes::tasks::edit),
        )
        .route("/delete", get(routes::tasks::delete))
        .route("/task_done", get(routes::tasks::task_done))
        .route("/archive", get(routes::archive::list))
        .route("/archive/undo", get(routes::archive::undo))
        .route("/archive/delete", get(routes::archive::delete))
        .route("/profile/user_data", get(routes::profile::user_data))
        .route(
            "/profile/password",
            get(routes::profile::password_form).post(routes::profile::change_password),
        )
        .route(
            "/profile/email",
            get(routes::profile::email_form).post(routes::profile::change_email),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware
///
/// Reads the session cookie, resolves it against the sessions table, and
/// injects an `AuthSession` into request extensions. Requests without a
/// resolvable session are redirected to `/login` before reaching the handler.
async fn session_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(AppError::Auth)?;

    let auth = Session::resolve(&state.db, &token)
        .await?
        .ok_or(AppError::Auth)?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
