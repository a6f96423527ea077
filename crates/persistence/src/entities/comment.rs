//! Comment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the comments table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: i64,
    pub ticket_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentEntity> for domain::models::Comment {
    fn from(entity: CommentEntity) -> Self {
        Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            author: entity.author,
            body: entity.body,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_entity_to_domain() {
        let entity = CommentEntity {
            id: 5,
            ticket_id: 1,
            author: "tech@example.com".to_string(),
            body: "Replaced the screen unit.".to_string(),
            created_at: Utc::now(),
        };
        let comment: domain::models::Comment = entity.into();
        assert_eq!(comment.id, 5);
        assert_eq!(comment.ticket_id, 1);
        assert_eq!(comment.body, "Replaced the screen unit.");
    }
}
