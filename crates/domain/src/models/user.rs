//! User and role domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A helpdesk user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A named role users can be assigned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Request payload for user creation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(
        min = 2,
        max = 100,
        message = "Display name must be between 2 and 100 characters"
    ))]
    pub display_name: String,

    pub role: Option<String>,
}

/// Request payload for user updates.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Display name must be between 2 and 100 characters"
    ))]
    pub display_name: Option<String>,

    pub role: Option<String>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let request = CreateUserRequest {
            email: "agent@example.com".to_string(),
            display_name: "Support Agent".to_string(),
            role: Some("agent".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let request = CreateUserRequest {
            email: "nope".to_string(),
            display_name: "Support Agent".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_user_allows_partial() {
        let request = UpdateUserRequest {
            display_name: None,
            role: Some("admin".to_string()),
            active: Some(false),
        };
        assert!(request.validate().is_ok());
    }
}
