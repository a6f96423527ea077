//! Ticket entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the tickets table.
#[derive(Debug, Clone, FromRow)]
pub struct TicketEntity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub requester: String,
    pub assignee: Option<String>,
    pub vehicle_code: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketEntity> for domain::models::Ticket {
    fn from(entity: TicketEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            status: entity.status.parse().unwrap_or_default(),
            priority: entity.priority.parse().unwrap_or_default(),
            requester: entity.requester,
            assignee: entity.assignee,
            vehicle_code: entity.vehicle_code,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{TicketPriority, TicketStatus};

    fn entity(status: &str, priority: &str) -> TicketEntity {
        TicketEntity {
            id: 1,
            title: "Forklift will not start".to_string(),
            description: "Unit 7 unresponsive".to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            requester: "ops@example.com".to_string(),
            assignee: None,
            vehicle_code: Some(7),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ticket_entity_to_domain() {
        let ticket: domain::models::Ticket = entity("in_progress", "high").into();
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.vehicle_code, Some(7));
    }

    #[test]
    fn test_unknown_status_falls_back_to_default() {
        let ticket: domain::models::Ticket = entity("weird", "weird").into();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
    }
}
