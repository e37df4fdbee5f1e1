/// Active task handlers
///
/// The task list at `/` is public; every mutating operation requires an
/// authenticated session and is scoped to the caller's own tasks; a
/// guessed id belonging to someone else behaves exactly like a missing one.
use crate::{
    app::AppState,
    error::{AppError, AppResult},
    routes::{validation_message, IdQuery},
};
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::Deserialize;
use tasknest_shared::auth::session::{AuthSession, Session, SESSION_COOKIE};
use tasknest_shared::models::todo::{CreateTodo, Todo, UpdateTodo};
use validator::Validate;

/// Task form payload, shared by add and edit
#[derive(Debug, Deserialize, Validate)]
pub struct TaskForm {
    /// Task title
    #[validate(length(min = 1, max = 50, message = "Title must be 1-50 characters"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, max = 100, message = "Description must be 1-100 characters"))]
    pub description: String,

    /// Integer priority; lower sorts first
    pub priority: i32,
}

/// GET `/` — active task list, priority ascending
///
/// Public. The session is resolved opportunistically so the navigation can
/// reflect login state, but an anonymous caller sees the same list.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let tasks = Todo::list_active(&state.db).await?;

    let user = match jar.get(SESSION_COOKIE) {
        Some(cookie) => Session::resolve(&state.db, cookie.value())
            .await?
            .map(|auth| auth.user),
        None => None,
    };

    let html = state
        .views
        .render("index.html", context! { tasks => tasks, user => user })?;

    Ok(html.into_response())
}

/// GET `/add` — render the task creation form
pub async fn add_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Response> {
    let html = state
        .views
        .render("add.html", context! { user => auth.user })?;
    Ok(html.into_response())
}

/// POST `/add` — create a task
///
/// Stamps the creation date with today's calendar date. Validation failures
/// re-render the form with a message; nothing is written.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let html = state.views.render(
            "add.html",
            context! { user => auth.user, error => validation_message(&errors) },
        )?;
        return Ok(html.into_response());
    }

    Todo::create(
        &state.db,
        CreateTodo {
            title: form.title,
            description: form.description,
            priority: form.priority,
            owner_id: auth.user.id,
        },
    )
    .await?;

    Ok(Redirect::to("/").into_response())
}

/// GET `/edit?id=` — render the edit form for one of the caller's tasks
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    let todo = Todo::find_by_id(&state.db, query.id)
        .await?
        .filter(|todo| todo.owner_id == auth.user.id)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let html = state
        .views
        .render("edit.html", context! { user => auth.user, editable => todo })?;
    Ok(html.into_response())
}

/// POST `/edit?id=` — overwrite title, description, and priority
pub async fn edit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let todo = Todo::find_by_id(&state.db, query.id)
            .await?
            .filter(|todo| todo.owner_id == auth.user.id)
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        let html = state.views.render(
            "edit.html",
            context! {
                user => auth.user,
                editable => todo,
                error => validation_message(&errors),
            },
        )?;
        return Ok(html.into_response());
    }

    Todo::update(
        &state.db,
        query.id,
        auth.user.id,
        UpdateTodo {
            title: form.title,
            description: form.description,
            priority: form.priority,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    Ok(Redirect::to("/").into_response())
}

/// GET `/delete?id=` — delete one of the caller's tasks outright
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
) -> AppResult<Redirect> {
    let removed = Todo::delete(&state.db, query.id, auth.user.id).await?;
    if !removed {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    Ok(Redirect::to("/"))
}

/// GET `/task_done?id=` — move a task into the archive
///
/// The copy-then-delete runs in a single transaction; the task is never
/// visible in both lists.
pub async fn task_done(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<IdQuery>,
) -> AppResult<Redirect> {
    Todo::mark_done(&state.db, query.id, auth.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_form_valid() {
        let form = TaskForm {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            priority: 3,
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_task_form_rejects_empty_title() {
        let form = TaskForm {
            title: String::new(),
            description: "2%".to_string(),
            priority: 3,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_task_form_rejects_overlong_fields() {
        let form = TaskForm {
            title: "x".repeat(51),
            description: "ok".to_string(),
            priority: 0,
        };
        assert!(form.validate().is_err());

        let form = TaskForm {
            title: "ok".to_string(),
            description: "x".repeat(101),
            priority: 0,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_task_form_allows_any_priority() {
        // Priority has no enforced range.
        for priority in [i32::MIN, -1, 0, 7, i32::MAX] {
            let form = TaskForm {
                title: "t".to_string(),
                description: "d".to_string(),
                priority,
            };
            assert!(form.validate().is_ok());
        }
    }
}
