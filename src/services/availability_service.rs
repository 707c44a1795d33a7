use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::ServiceError;

/// Hourly slot labels a trainer can be booked for, 09:00 through 20:00.
pub const BUSINESS_HOURS: [&str; 12] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
    "19:00", "20:00",
];

#[derive(Clone)]
pub struct AvailabilityService {
    db: PgPool,
}

impl AvailabilityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open hourly slots for a trainer on a given day. A slot is taken when
    /// it falls inside the half-open span of any scheduled session;
    /// cancelled and completed sessions never block.
    pub async fn get_availability(
        &self,
        trainer_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, ServiceError> {
        let is_available = sqlx::query_scalar::<_, bool>(
            "SELECT is_available FROM trainers WHERE id = $1",
        )
        .bind(trainer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::TrainerNotFound)?;

        if !is_available {
            return Err(ServiceError::TrainerUnavailable);
        }

        let booked = sqlx::query_as::<_, (String, String)>(
            "SELECT start_time, end_time FROM personal_training_sessions
             WHERE trainer_id = $1 AND session_date = $2 AND status = 'scheduled'",
        )
        .bind(trainer_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(open_slots(&booked))
    }
}

/// Filters the business-hour slots down to those not covered by any booked
/// [start, end) span. Slot labels compare lexicographically, which is sound
/// for zero-padded 24-hour strings.
pub fn open_slots(booked: &[(String, String)]) -> Vec<String> {
    let mut slots = Vec::new();
    for slot in BUSINESS_HOURS {
        let taken = booked
            .iter()
            .any(|(start, end)| slot >= start.as_str() && slot < end.as_str());
        if !taken {
            slots.push(slot.to_string());
        }
    }
    slots
}
