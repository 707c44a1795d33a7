use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{ClassSchedule, CreateClassSchedule, CreateGymClass, GymClass};
use crate::services::ServiceError;

#[derive(Clone)]
pub struct GymClassService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl GymClassService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create_class(&self, request: CreateGymClass) -> Result<GymClass, ServiceError> {
        let trainer = sqlx::query_scalar::<_, Uuid>("SELECT id FROM trainers WHERE id = $1")
            .bind(request.trainer_id)
            .fetch_optional(&self.db)
            .await?;
        if trainer.is_none() {
            return Err(ServiceError::TrainerNotFound);
        }

        let now = self.clock.now();

        let class = sqlx::query_as::<_, GymClass>(
            "INSERT INTO gym_classes (id, name, description, trainer_id, duration_minutes, capacity, difficulty, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING id, name, description, trainer_id, duration_minutes, capacity, difficulty, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.trainer_id)
        .bind(request.duration_minutes)
        .bind(request.capacity)
        .bind(request.difficulty)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(class)
    }

    pub async fn get_class(&self, class_id: Uuid) -> Result<GymClass, ServiceError> {
        let class = sqlx::query_as::<_, GymClass>(
            "SELECT id, name, description, trainer_id, duration_minutes, capacity, difficulty, created_at, updated_at
             FROM gym_classes
             WHERE id = $1",
        )
        .bind(class_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::ClassNotFound)?;

        Ok(class)
    }

    pub async fn list_classes(&self) -> Result<Vec<GymClass>, ServiceError> {
        let classes = sqlx::query_as::<_, GymClass>(
            "SELECT id, name, description, trainer_id, duration_minutes, capacity, difficulty, created_at, updated_at
             FROM gym_classes
             ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(classes)
    }

    /// Schedule an instance of a class. Spots start at the class capacity.
    pub async fn create_schedule(
        &self,
        request: CreateClassSchedule,
    ) -> Result<ClassSchedule, ServiceError> {
        let class = self.get_class(request.class_id).await?;

        if request.end_time <= request.start_time {
            return Err(ServiceError::InvalidTimeRange);
        }

        let now = self.clock.now();

        let schedule = sqlx::query_as::<_, ClassSchedule>(
            "INSERT INTO class_schedules (id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $7)
             RETURNING id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(class.id)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(&request.room)
        .bind(class.capacity)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(schedule)
    }

    /// Upcoming schedules that have not been cancelled.
    pub async fn list_upcoming_schedules(&self) -> Result<Vec<ClassSchedule>, ServiceError> {
        let now = self.clock.now();

        let schedules = sqlx::query_as::<_, ClassSchedule>(
            "SELECT id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at
             FROM class_schedules
             WHERE is_cancelled = FALSE AND start_time >= $1
             ORDER BY start_time ASC",
        )
        .bind(now)
        .fetch_all(&self.db)
        .await?;

        Ok(schedules)
    }

    /// Mark a schedule as cancelled. Existing bookings are left untouched;
    /// a cancelled schedule simply stops accepting new ones.
    pub async fn cancel_schedule(&self, schedule_id: Uuid) -> Result<ClassSchedule, ServiceError> {
        let now = self.clock.now();

        let schedule = sqlx::query_as::<_, ClassSchedule>(
            "UPDATE class_schedules
             SET is_cancelled = TRUE, updated_at = $2
             WHERE id = $1
             RETURNING id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at",
        )
        .bind(schedule_id)
        .bind(now)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::ScheduleNotFound)?;

        Ok(schedule)
    }
}
