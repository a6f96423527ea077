//! Ticket CRUD, bulk import and CSV export handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use domain::models::{
    CreateTicketRequest, ImportRowResult, ImportTicketsRequest, ImportTicketsResponse, Ticket,
    TicketListQuery, UpdateTicketRequest,
};
use persistence::repositories::TicketRepository;
use shared::pagination::{PageInfo, Paginated};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_ticket_created;

/// GET /api/v1/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<Paginated<Ticket>>, ApiError> {
    let params = query.page_params();
    params.validate()?;

    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let status = query.status.map(|s| s.as_str());

    let total = repository.count(status).await?;
    let tickets: Vec<Ticket> = repository
        .list(status, params.limit(), params.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(Paginated {
        data: tickets,
        pagination: PageInfo::new(&params, total),
    }))
}

/// POST /api/v1/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    request.validate()?;

    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let ticket: Ticket = repository
        .create(
            &request.title,
            &request.description,
            request.priority.as_str(),
            &request.requester,
            request.assignee.as_deref(),
            request.vehicle_code,
        )
        .await?
        .into();

    record_ticket_created();
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/tickets/:id
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let ticket = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {} not found", id)))?;
    Ok(Json(ticket.into()))
}

/// PATCH /api/v1/tickets/:id
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>, ApiError> {
    request.validate()?;

    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let ticket = repository
        .update(
            id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.status.map(|s| s.as_str()),
            request.priority.map(|p| p.as_str()),
            request.assignee.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket {} not found", id)))?;
    Ok(Json(ticket.into()))
}

/// DELETE /api/v1/tickets/:id
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let removed = repository.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("Ticket {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tickets/import
///
/// Rows are processed independently; one bad row rejects that row only.
/// The response tallies fulfilled and rejected rows with a per-row
/// outcome in input order.
pub async fn import_tickets(
    State(state): State<AppState>,
    Json(request): Json<ImportTicketsRequest>,
) -> Result<Json<ImportTicketsResponse>, ApiError> {
    request.validate()?;

    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let mut results = Vec::with_capacity(request.tickets.len());

    for (index, row) in request.tickets.iter().enumerate() {
        results.push(import_row(&repository, index, row).await);
    }

    Ok(Json(tally_import(results)))
}

/// Folds per-row outcomes into the import summary.
fn tally_import(results: Vec<ImportRowResult>) -> ImportTicketsResponse {
    let fulfilled = results.iter().filter(|r| r.success).count();
    ImportTicketsResponse {
        total: results.len(),
        fulfilled,
        rejected: results.len() - fulfilled,
        results,
    }
}

async fn import_row(
    repository: &TicketRepository,
    index: usize,
    row: &CreateTicketRequest,
) -> ImportRowResult {
    if let Err(errors) = row.validate() {
        return ImportRowResult {
            index,
            success: false,
            ticket_id: None,
            error: Some(errors.to_string()),
        };
    }

    match repository
        .create(
            &row.title,
            &row.description,
            row.priority.as_str(),
            &row.requester,
            row.assignee.as_deref(),
            row.vehicle_code,
        )
        .await
    {
        Ok(entity) => {
            record_ticket_created();
            ImportRowResult {
                index,
                success: true,
                ticket_id: Some(entity.id),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(index = index, error = %e, "Ticket import row failed");
            ImportRowResult {
                index,
                success: false,
                ticket_id: None,
                error: Some("Database error".to_string()),
            }
        }
    }
}

/// GET /api/v1/tickets/export
///
/// Returns every ticket as CSV.
pub async fn export_tickets_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = TicketRepository::new(state.databases.helpdesk.clone());
    let tickets: Vec<Ticket> = repository
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let csv = export_payload(&tickets)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tickets.csv\"",
            ),
        ],
        csv,
    ))
}

/// Builds the CSV export body, rejecting an empty ticket table with a
/// 404 so automation does not archive empty files.
fn export_payload(tickets: &[Ticket]) -> Result<String, ApiError> {
    if tickets.is_empty() {
        return Err(ApiError::NotFound("No tickets to export".to_string()));
    }
    Ok(generate_csv(tickets))
}

/// Generates CSV content from tickets.
/// Includes UTF-8 BOM for Excel compatibility.
fn generate_csv(tickets: &[Ticket]) -> String {
    let mut csv = String::new();
    csv.push('\u{FEFF}');
    csv.push_str(
        "id,title,status,priority,requester,assignee,vehicle_code,created_at,updated_at\n",
    );

    for ticket in tickets {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            ticket.id,
            escape_csv(&ticket.title),
            ticket.status,
            ticket.priority.as_str(),
            escape_csv(&ticket.requester),
            escape_csv(ticket.assignee.as_deref().unwrap_or("")),
            ticket
                .vehicle_code
                .map(|c| c.to_string())
                .unwrap_or_default(),
            ticket.created_at.to_rfc3339(),
            ticket.updated_at.to_rfc3339(),
        ));
    }
    csv
}

/// Escapes a CSV field value, quoting when it contains separators.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::{TicketPriority, TicketStatus};

    fn ticket(id: i64, title: &str) -> Ticket {
        Ticket {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            requester: "ops@example.com".to_string(),
            assignee: None,
            vehicle_code: Some(42),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_csv_plain() {
        assert_eq!(escape_csv("hello"), "hello");
    }

    #[test]
    fn test_escape_csv_comma() {
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_escape_csv_quotes() {
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_escape_csv_newline() {
        assert_eq!(escape_csv("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_generate_csv_starts_with_bom_and_header() {
        let csv = generate_csv(&[ticket(1, "Broken screen")]);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("id,title,status"));
        assert!(csv.contains("Broken screen"));
    }

    #[test]
    fn test_generate_csv_one_line_per_ticket() {
        let csv = generate_csv(&[ticket(1, "a"), ticket(2, "b")]);
        // header + 2 rows, each newline-terminated
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_generate_csv_escapes_title() {
        let csv = generate_csv(&[ticket(1, "needs, quoting")]);
        assert!(csv.contains("\"needs, quoting\""));
    }

    #[test]
    fn test_export_payload_empty_table_is_not_found() {
        let result = export_payload(&[]);
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_export_payload_nonempty_yields_csv() {
        let csv = export_payload(&[ticket(1, "a")]).unwrap();
        assert!(csv.starts_with('\u{FEFF}'));
        assert_eq!(csv.lines().count(), 2);
    }

    fn row_result(index: usize, success: bool) -> ImportRowResult {
        ImportRowResult {
            index,
            success,
            ticket_id: success.then_some(index as i64 + 100),
            error: (!success).then(|| "Database error".to_string()),
        }
    }

    #[test]
    fn test_tally_import_counts_mixed_rows() {
        let response = tally_import(vec![
            row_result(0, true),
            row_result(1, false),
            row_result(2, true),
        ]);
        assert_eq!(response.total, 3);
        assert_eq!(response.fulfilled, 2);
        assert_eq!(response.rejected, 1);
        assert_eq!(response.results.len(), 3);
    }

    #[test]
    fn test_tally_import_empty() {
        let response = tally_import(Vec::new());
        assert_eq!(response.total, 0);
        assert_eq!(response.fulfilled, 0);
        assert_eq!(response.rejected, 0);
    }
}
