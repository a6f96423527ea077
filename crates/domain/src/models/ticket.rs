//! Ticket domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Lifecycle state of a helpdesk ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(format!("unknown ticket status: {}", other)),
        }
    }
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "critical" => Ok(TicketPriority::Critical),
            other => Err(format!("unknown ticket priority: {}", other)),
        }
    }
}

/// A helpdesk ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub requester: String,
    pub assignee: Option<String>,
    /// Internal vehicle code when the ticket concerns a specific vehicle.
    pub vehicle_code: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for ticket creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 10_000, message = "Description must be at most 10000 characters"))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub priority: TicketPriority,

    #[validate(email(message = "Requester must be a valid email address"))]
    pub requester: String,

    pub assignee: Option<String>,
    pub vehicle_code: Option<i64>,
}

/// Request payload for ticket updates. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 10_000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee: Option<String>,
}

/// Query parameters for ticket listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListQuery {
    pub status: Option<TicketStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl TicketListQuery {
    pub fn page_params(&self) -> shared::pagination::PageParams {
        shared::pagination::PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Request payload for the multi-row import endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportTicketsRequest {
    #[validate(length(min = 1, max = 500, message = "Import must contain 1 to 500 tickets"))]
    pub tickets: Vec<CreateTicketRequest>,
}

/// Per-row outcome of a bulk import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Settle-all tally for a bulk import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTicketsResponse {
    pub total: usize,
    pub fulfilled: usize,
    pub rejected: usize,
    pub results: Vec<ImportRowResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ] {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("bogus".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_priority_round_trip() {
        for priority in [
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
            TicketPriority::Critical,
        ] {
            assert_eq!(
                priority.as_str().parse::<TicketPriority>().unwrap(),
                priority
            );
        }
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateTicketRequest {
            title: "Forklift will not start".to_string(),
            description: String::new(),
            priority: TicketPriority::High,
            requester: "ops@example.com".to_string(),
            assignee: None,
            vehicle_code: Some(42),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_short_title() {
        let request = CreateTicketRequest {
            title: "ab".to_string(),
            description: String::new(),
            priority: TicketPriority::default(),
            requester: "ops@example.com".to_string(),
            assignee: None,
            vehicle_code: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let request = CreateTicketRequest {
            title: "Screen flickers".to_string(),
            description: String::new(),
            priority: TicketPriority::default(),
            requester: "not-an-email".to_string(),
            assignee: None,
            vehicle_code: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_import_request_rejects_empty() {
        let request = ImportTicketsRequest { tickets: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_default_status_is_open() {
        assert_eq!(TicketStatus::default(), TicketStatus::Open);
    }
}
