use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{CreateFacility, Facility, GymInfo, SetGymInfo};
use crate::services::ServiceError;

#[derive(Clone)]
pub struct FacilityService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl FacilityService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create_facility(&self, request: CreateFacility) -> Result<Facility, ServiceError> {
        let now = self.clock.now();

        let facility = sqlx::query_as::<_, Facility>(
            "INSERT INTO facilities (id, name, description, opening_hours, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING id, name, description, opening_hours, image_url, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.opening_hours)
        .bind(&request.image_url)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(facility)
    }

    pub async fn list_facilities(&self) -> Result<Vec<Facility>, ServiceError> {
        let facilities = sqlx::query_as::<_, Facility>(
            "SELECT id, name, description, opening_hours, image_url, created_at, updated_at
             FROM facilities
             ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(facilities)
    }

    pub async fn get_gym_info(&self) -> Result<Option<GymInfo>, ServiceError> {
        let info = sqlx::query_as::<_, GymInfo>(
            "SELECT id, name, address, phone, email, description, created_at, updated_at
             FROM gym_info
             ORDER BY created_at ASC
             LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(info)
    }

    /// Replace the gym's descriptive record, creating it on first use.
    pub async fn set_gym_info(&self, request: SetGymInfo) -> Result<GymInfo, ServiceError> {
        let now = self.clock.now();

        let info = match self.get_gym_info().await? {
            Some(existing) => {
                sqlx::query_as::<_, GymInfo>(
                    "UPDATE gym_info
                     SET name = $2, address = $3, phone = $4, email = $5, description = $6, updated_at = $7
                     WHERE id = $1
                     RETURNING id, name, address, phone, email, description, created_at, updated_at",
                )
                .bind(existing.id)
                .bind(&request.name)
                .bind(&request.address)
                .bind(&request.phone)
                .bind(&request.email)
                .bind(&request.description)
                .bind(now)
                .fetch_one(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, GymInfo>(
                    "INSERT INTO gym_info (id, name, address, phone, email, description, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                     RETURNING id, name, address, phone, email, description, created_at, updated_at",
                )
                .bind(Uuid::new_v4())
                .bind(&request.name)
                .bind(&request.address)
                .bind(&request.phone)
                .bind(&request.email)
                .bind(&request.description)
                .bind(now)
                .fetch_one(&self.db)
                .await?
            }
        };

        Ok(info)
    }
}
