//! Ticket comment handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use domain::models::{Comment, CreateCommentRequest};
use persistence::repositories::{CommentRepository, TicketRepository};

use crate::app::AppState;
use crate::error::ApiError;

async fn ensure_ticket_exists(state: &AppState, ticket_id: i64) -> Result<(), ApiError> {
    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    repository
        .find_by_id(ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {} not found", ticket_id)))?;
    Ok(())
}

/// GET /api/v1/tickets/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    ensure_ticket_exists(&state, ticket_id).await?;

    let repository = CommentRepository::new(state.databases.helpdesk.clone());
    let comments: Vec<Comment> = repository
        .list_for_ticket(ticket_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(comments))
}

/// POST /api/v1/tickets/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    request.validate()?;
    ensure_ticket_exists(&state, ticket_id).await?;

    let repository = CommentRepository::new(state.databases.helpdesk.clone());
    let comment: Comment = repository
        .create(ticket_id, &request.author, &request.body)
        .await?
        .into();
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/tickets/:id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((ticket_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let repository = CommentRepository::new(state.databases.helpdesk.clone());
    let removed = repository.delete(ticket_id, comment_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!(
            "Comment {} not found on ticket {}",
            comment_id, ticket_id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
