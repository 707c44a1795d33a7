use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{CreateTrainer, Trainer, UpdateTrainer};
use crate::services::ServiceError;

#[derive(Clone)]
pub struct TrainerService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl TrainerService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create_trainer(&self, request: CreateTrainer) -> Result<Trainer, ServiceError> {
        let now = self.clock.now();

        let trainer = sqlx::query_as::<_, Trainer>(
            "INSERT INTO trainers (id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $9, $9)
             RETURNING id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.specialization)
        .bind(&request.bio)
        .bind(request.hourly_rate)
        .bind(&request.image_url)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(trainer)
    }

    pub async fn get_trainer(&self, trainer_id: Uuid) -> Result<Trainer, ServiceError> {
        let trainer = sqlx::query_as::<_, Trainer>(
            "SELECT id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at
             FROM trainers
             WHERE id = $1",
        )
        .bind(trainer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::TrainerNotFound)?;

        Ok(trainer)
    }

    pub async fn list_trainers(&self, available_only: bool) -> Result<Vec<Trainer>, ServiceError> {
        let trainers = sqlx::query_as::<_, Trainer>(
            "SELECT id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at
             FROM trainers
             WHERE is_available = TRUE OR $1 = FALSE
             ORDER BY name ASC",
        )
        .bind(available_only)
        .fetch_all(&self.db)
        .await?;

        Ok(trainers)
    }

    pub async fn update_trainer(
        &self,
        trainer_id: Uuid,
        request: UpdateTrainer,
    ) -> Result<Trainer, ServiceError> {
        let now = self.clock.now();

        let trainer = sqlx::query_as::<_, Trainer>(
            "UPDATE trainers
             SET name = COALESCE($2, name),
                 phone = COALESCE($3, phone),
                 specialization = COALESCE($4, specialization),
                 bio = COALESCE($5, bio),
                 hourly_rate = COALESCE($6, hourly_rate),
                 is_available = COALESCE($7, is_available),
                 image_url = COALESCE($8, image_url),
                 updated_at = $9
             WHERE id = $1
             RETURNING id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at",
        )
        .bind(trainer_id)
        .bind(&request.name)
        .bind(&request.phone)
        .bind(&request.specialization)
        .bind(&request.bio)
        .bind(request.hourly_rate)
        .bind(request.is_available)
        .bind(&request.image_url)
        .bind(now)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::TrainerNotFound)?;

        Ok(trainer)
    }
}
