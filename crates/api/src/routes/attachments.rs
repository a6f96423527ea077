//! Ticket attachment handlers.
//!
//! Metadata rows live in the helpdesk database; the bytes sit behind the
//! storage collaborator under an opaque blob key.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::warn;
use validator::Validate;

use domain::models::{Attachment, CreateAttachmentRequest};
use persistence::repositories::{AttachmentRepository, TicketRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::storage::{generate_blob_key, BlobStorage, StorageError};

const DELETE_ATTEMPTS: u32 = 3;

/// GET /api/v1/tickets/:id/attachments
pub async fn list_attachments(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<Vec<Attachment>>, ApiError> {
    let tickets = TicketRepository::new(state.databases.helpdesk.clone());
    tickets
        .find_by_id(ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {} not found", ticket_id)))?;

    let repository = AttachmentRepository::new(state.databases.helpdesk.clone());
    let attachments: Vec<Attachment> = repository
        .list_for_ticket(ticket_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(attachments))
}

/// POST /api/v1/tickets/:id/attachments
pub async fn create_attachment(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(request): Json<CreateAttachmentRequest>,
) -> Result<(StatusCode, Json<Attachment>), ApiError> {
    request.validate()?;

    let tickets = TicketRepository::new(state.databases.helpdesk.clone());
    tickets
        .find_by_id(ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {} not found", ticket_id)))?;

    let bytes = match request.content.as_deref() {
        Some(encoded) => BASE64
            .decode(encoded)
            .map_err(|_| ApiError::Validation("Content must be valid base64".to_string()))?,
        None => Vec::new(),
    };

    let blob_key = generate_blob_key();
    let size_bytes = bytes.len() as i64;

    let repository = AttachmentRepository::new(state.databases.helpdesk.clone());
    let repo = &repository;
    let file_name = &request.file_name;
    let content_type = &request.content_type;
    let key = blob_key.clone();
    let attachment = put_with_rollback(&*state.storage, &blob_key, bytes, move || async move {
        let entity = repo
            .create(ticket_id, file_name, content_type, &key, size_bytes)
            .await?;
        Ok(Attachment::from(entity))
    })
    .await?;
    Ok((StatusCode::CREATED, Json(attachment)))
}

/// Stores the blob, then runs the metadata insert; a failed insert
/// removes the just-written blob so no orphan is left behind.
async fn put_with_rollback<F, Fut, T>(
    storage: &dyn BlobStorage,
    blob_key: &str,
    bytes: Vec<u8>,
    insert_row: F,
) -> Result<T, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    storage.put(blob_key, bytes).await.map_err(storage_error)?;
    match insert_row().await {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(cleanup) = storage.delete(blob_key).await {
                warn!(
                    blob_key = blob_key,
                    error = %cleanup,
                    "Blob left behind after failed metadata insert"
                );
            }
            Err(e)
        }
    }
}

/// GET /api/v1/attachments/:id
pub async fn download_attachment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = AttachmentRepository::new(state.databases.helpdesk.clone());
    let attachment = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Attachment {} not found", id)))?;

    let bytes = state
        .storage
        .get(&attachment.blob_key)
        .await
        .map_err(storage_error)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment.file_name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, attachment.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// DELETE /api/v1/attachments/:id
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = AttachmentRepository::new(state.databases.helpdesk.clone());
    let attachment = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Attachment {} not found", id)))?;

    let repo = &repository;
    delete_with_retry(&*state.storage, &attachment.blob_key, DELETE_ATTEMPTS, || {
        async move {
            repo.delete(id).await?;
            Ok(())
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the blob and then the metadata row, retrying the whole pair.
///
/// The blob goes first so a failure never leaves an orphaned blob behind
/// a deleted row, and blob deletion is idempotent so retrying after a
/// row-delete failure is safe. The row delete runs at most once per
/// attempt and only after its blob delete succeeded.
async fn delete_with_retry<F, Fut>(
    storage: &dyn BlobStorage,
    blob_key: &str,
    attempts: u32,
    mut delete_row: F,
) -> Result<(), ApiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<(), ApiError>>,
{
    let mut last_error = None;
    for attempt in 1..=attempts {
        let result = match storage.delete(blob_key).await.map_err(storage_error) {
            Ok(()) => delete_row().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(
                    blob_key = blob_key,
                    attempt = attempt,
                    error = %e,
                    "Attachment delete attempt failed"
                );
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| ApiError::Internal("Attachment delete failed".to_string())))
}

fn storage_error(e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound(key) => {
            ApiError::NotFound(format!("Attachment content missing: {}", key))
        }
        other => ApiError::Internal(other.to_string()),
    }
}
