use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{
    BookPersonalTrainingRequest, PersonalTrainingSession, SessionStatus, Trainer,
    UpdatePersonalTrainingRequest,
};
use crate::services::{ensure_user_exists, ServiceError};

#[derive(Clone)]
pub struct PersonalTrainingService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl PersonalTrainingService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Book a one-on-one session with a trainer. The session must not
    /// overlap any scheduled session for the same trainer and date;
    /// back-to-back sessions sharing a boundary are allowed.
    pub async fn book_session(
        &self,
        request: BookPersonalTrainingRequest,
    ) -> Result<PersonalTrainingSession, ServiceError> {
        ensure_user_exists(&self.db, request.user_id).await?;

        let mut tx = self.db.begin().await?;

        // Lock the trainer row so concurrent bookings for the same trainer
        // serialize through the conflict check.
        let trainer = sqlx::query_as::<_, Trainer>(
            "SELECT id, name, email, phone, specialization, bio, hourly_rate, is_available, image_url, created_at, updated_at
             FROM trainers
             WHERE id = $1
             FOR UPDATE",
        )
        .bind(request.trainer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::TrainerNotFound)?;

        if !trainer.is_available {
            return Err(ServiceError::TrainerUnavailable);
        }

        let start_minute = minute_of_day(&request.start_time)?;
        let end_minute = minute_of_day(&request.end_time)?;
        if end_minute <= start_minute {
            return Err(ServiceError::InvalidTimeRange);
        }

        let booked = sqlx::query_as::<_, (String, String)>(
            "SELECT start_time, end_time FROM personal_training_sessions
             WHERE trainer_id = $1 AND session_date = $2 AND status = 'scheduled'",
        )
        .bind(request.trainer_id)
        .bind(request.session_date)
        .fetch_all(&mut *tx)
        .await?;

        let conflict = booked.iter().any(|(start, end)| {
            intervals_overlap(&request.start_time, &request.end_time, start, end)
        });
        if conflict {
            return Err(ServiceError::SessionOverlap);
        }

        let price = session_price(trainer.hourly_rate, start_minute, end_minute);
        let now = self.clock.now();

        let session = sqlx::query_as::<_, PersonalTrainingSession>(
            "INSERT INTO personal_training_sessions (id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
             RETURNING id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.trainer_id)
        .bind(request.session_date)
        .bind(&request.start_time)
        .bind(&request.end_time)
        .bind(SessionStatus::Scheduled)
        .bind(&request.notes)
        .bind(price)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(session)
    }

    /// Update a session's status and notes on behalf of its owning user.
    /// Omitted fields keep their prior value; an explicit null clears the
    /// notes. Status may move between any two values.
    pub async fn update_session(
        &self,
        session_id: Uuid,
        request: UpdatePersonalTrainingRequest,
    ) -> Result<PersonalTrainingSession, ServiceError> {
        let session = sqlx::query_as::<_, PersonalTrainingSession>(
            "SELECT id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at
             FROM personal_training_sessions
             WHERE id = $1 AND user_id = $2",
        )
        .bind(session_id)
        .bind(request.user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::SessionNotFound)?;

        let status = request.status.unwrap_or(session.status);
        let notes = match request.notes {
            Some(value) => value,
            None => session.notes,
        };
        let now = self.clock.now();

        let updated = sqlx::query_as::<_, PersonalTrainingSession>(
            "UPDATE personal_training_sessions
             SET status = $2, notes = $3, updated_at = $4
             WHERE id = $1
             RETURNING id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at",
        )
        .bind(session.id)
        .bind(status)
        .bind(&notes)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(updated)
    }

    pub async fn list_user_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PersonalTrainingSession>, ServiceError> {
        let sessions = sqlx::query_as::<_, PersonalTrainingSession>(
            "SELECT id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at
             FROM personal_training_sessions
             WHERE user_id = $1
             ORDER BY session_date DESC, start_time ASC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    pub async fn list_trainer_sessions(
        &self,
        trainer_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<PersonalTrainingSession>, ServiceError> {
        let sessions = sqlx::query_as::<_, PersonalTrainingSession>(
            "SELECT id, user_id, trainer_id, session_date, start_time, end_time, status, notes, price, created_at, updated_at
             FROM personal_training_sessions
             WHERE trainer_id = $1 AND session_date = $2
             ORDER BY start_time ASC",
        )
        .bind(trainer_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }
}

/// Minutes since midnight for a zero-padded "HH:MM" string.
pub fn minute_of_day(time: &str) -> Result<u32, ServiceError> {
    let parsed =
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ServiceError::InvalidTimeFormat)?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Half-open interval overlap: [a_start, a_end) conflicts with
/// [b_start, b_end) iff a_start < b_end and a_end > b_start. Zero-padded
/// 24-hour strings make the lexicographic comparison sound.
pub fn intervals_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    a_start < b_end && a_end > b_start
}

/// Session price: hourly rate times the duration expressed in hours.
pub fn session_price(hourly_rate: Decimal, start_minute: u32, end_minute: u32) -> Decimal {
    let hours = Decimal::from(end_minute - start_minute) / Decimal::from(60);
    (hourly_rate * hours).round_dp(2)
}
