//! Helpdesk user and role handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use domain::models::{CreateUserRequest, Role, UpdateUserRequest, User};
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let repository = UserRepository::new(state.databases.helpdesk.clone());
    let users: Vec<User> = repository
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    request.validate()?;

    let repository = UserRepository::new(state.databases.helpdesk.clone());

    if let Some(role) = request.role.as_deref() {
        repository
            .find_role(role)
            .await?
            .ok_or_else(|| ApiError::Validation(format!("Unknown role: {}", role)))?;
    }

    let user: User = repository
        .create(&request.email, &request.display_name, request.role.as_deref())
        .await?
        .into();
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let repository = UserRepository::new(state.databases.helpdesk.clone());
    let user = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;

    let repository = UserRepository::new(state.databases.helpdesk.clone());

    if let Some(role) = request.role.as_deref() {
        repository
            .find_role(role)
            .await?
            .ok_or_else(|| ApiError::Validation(format!("Unknown role: {}", role)))?;
    }

    let user = repository
        .update(
            id,
            request.display_name.as_deref(),
            request.role.as_deref(),
            request.active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = UserRepository::new(state.databases.helpdesk.clone());
    let removed = repository.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("User {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/roles
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, ApiError> {
    let repository = UserRepository::new(state.databases.helpdesk.clone());
    let roles: Vec<Role> = repository
        .list_roles()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(roles))
}
