use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{CreateUser, UpdateUser, User};
use crate::services::ServiceError;

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Register a member. A duplicate email surfaces as a database error
    /// from the unique constraint.
    pub async fn create_user(&self, request: CreateUser) -> Result<User, ServiceError> {
        let now = self.clock.now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, first_name, last_name, phone, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING id, email, first_name, last_name, phone, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User, ServiceError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, phone, created_at, updated_at
             FROM users
             WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        request: UpdateUser,
    ) -> Result<User, ServiceError> {
        let now = self.clock.now();

        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 phone = COALESCE($4, phone),
                 updated_at = $5
             WHERE id = $1
             RETURNING id, email, first_name, last_name, phone, created_at, updated_at",
        )
        .bind(user_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(now)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

        Ok(user)
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<User>, ServiceError> {
        let limit = limit.unwrap_or(50).min(100);
        let offset = offset.unwrap_or(0);

        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, phone, created_at, updated_at
             FROM users
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }
}
