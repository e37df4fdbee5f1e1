/// Archive handlers
///
/// Listing is available to any authenticated user; undo and delete are
/// scoped to the caller's own archived tasks.
use crate::{
    app::AppState,
    error::{AppError, AppResult},
    routes::IdQuery,
};
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use tasknest_shared::auth::session::AuthSession;
use tasknest_shared::models::archive::ArchivedTask;

/// GET `/archive` — archived tasks, completion date ascending
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Response> {
    let archive = ArchivedTask::list_all(&state.db).await?;

    let html = state.views.render(
        "archive.html",
        context! { user => auth.user, archive => archive },
    )?;

    Ok(html.into_response())
}

/// GET `/archive/undo?id=` — restore an archived task to the active list
///
/// The restored task keeps its original creation date and gets a fresh id.
pub async fn undo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
) -> AppResult<Redirect> {
    ArchivedTask::restore(&state.db, query.id, auth.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Archived task not found".to_string()))?;

    Ok(Redirect::to("/"))
}

/// GET `/archive/delete?id=` — remove an archived task permanently
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
) -> AppResult<Redirect> {
    let removed = ArchivedTask::delete(&state.db, query.id, auth.user.id).await?;
    if !removed {
        return Err(AppError::NotFound("Archived task not found".to_string()));
    }

    Ok(Redirect::to("/archive"))
}
