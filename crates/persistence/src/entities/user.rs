//! User and role entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            role: entity.role,
            active: entity.active,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the roles table.
#[derive(Debug, Clone, FromRow)]
pub struct RoleEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<RoleEntity> for domain::models::Role {
    fn from(entity: RoleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: 2,
            email: "agent@example.com".to_string(),
            display_name: "Support Agent".to_string(),
            role: Some("agent".to_string()),
            active: true,
            created_at: Utc::now(),
        };
        let user: domain::models::User = entity.into();
        assert_eq!(user.email, "agent@example.com");
        assert_eq!(user.role.as_deref(), Some("agent"));
        assert!(user.active);
    }

    #[test]
    fn test_role_entity_to_domain() {
        let entity = RoleEntity {
            id: 1,
            name: "admin".to_string(),
            description: None,
        };
        let role: domain::models::Role = entity.into();
        assert_eq!(role.name, "admin");
        assert!(role.description.is_none());
    }
}
