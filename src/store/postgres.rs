use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, User, UserStore};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed user store. Uniqueness is guaranteed by the unique
/// index over `LOWER(email)`; audit timestamps are set in SQL on write.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate {
                field: "email",
                value: email.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, last_name, phone_number, email, password_hash, department_id, role, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, last_name, phone_number, email, password_hash, department_id, role, active
            "#,
        )
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.department_id)
        .bind(&user.role)
        .bind(user.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user.email))?;

        tracing::info!(user_id = created.id, "created user");
        Ok(created)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, last_name = $2, phone_number = $3, email = $4,
                password_hash = $5, department_id = $6, role = $7, active = $8,
                updated_at = now()
            WHERE id = $9
            RETURNING id, name, last_name, phone_number, email, password_hash, department_id, role, active
            "#,
        )
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.department_id)
        .bind(&user.role)
        .bind(user.active)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user.email))?;

        updated.ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, last_name, phone_number, email, password_hash, department_id, role, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, last_name, phone_number, email, password_hash, department_id, role, active
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, last_name, phone_number, email, password_hash, department_id, role, active
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn email_is_unique(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(!exists)
    }
}
