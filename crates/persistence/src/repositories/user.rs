//! User and role repository for database operations.

use chrono::Utc;
use sqlx::PgPool;

use crate::entities::{RoleEntity, UserEntity};

/// Repository for helpdesk user accounts and roles.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new active user and return the stored row.
    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        role: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, display_name, role, active, created_at)
            VALUES ($1, $2, $3, true, $4)
            RETURNING id, email, display_name, role, active, created_at
            "#,
        )
        .bind(email)
        .bind(display_name)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, display_name, role, active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All users, sorted by display name.
    pub async fn list(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, display_name, role, active, created_at
            FROM users
            ORDER BY display_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Apply a partial update. Absent fields keep their stored values.
    pub async fn update(
        &self,
        id: i64,
        display_name: Option<&str>,
        role: Option<&str>,
        active: Option<bool>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET display_name = COALESCE($2, display_name),
                role = COALESCE($3, role),
                active = COALESCE($4, active)
            WHERE id = $1
            RETURNING id, email, display_name, role, active, created_at
            "#,
        )
        .bind(id)
        .bind(display_name)
        .bind(role)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a user. Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// All assignable roles.
    pub async fn list_roles(&self) -> Result<Vec<RoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, name, description FROM roles
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Look up a role by name.
    pub async fn find_role(&self, name: &str) -> Result<Option<RoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, name, description FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }
}
