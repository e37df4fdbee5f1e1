/// Static informational pages
use crate::{app::AppState, error::AppResult};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use minijinja::context;

/// GET `/about`
pub async fn about(State(state): State<AppState>) -> AppResult<Response> {
    let html = state.views.render("about.html", context! {})?;
    Ok(html.into_response())
}
