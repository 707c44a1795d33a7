use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{BookClassRequest, BookingStatus, ClassBooking, ClassSchedule};
use crate::services::{ensure_user_exists, ServiceError};

#[derive(Clone)]
pub struct ClassBookingService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl ClassBookingService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Book a spot in a scheduled class. The booking is confirmed while the
    /// schedule has spots left and waitlisted once it is full; a confirmed
    /// booking consumes exactly one spot in the same transaction.
    pub async fn book_class(&self, request: BookClassRequest) -> Result<ClassBooking, ServiceError> {
        ensure_user_exists(&self.db, request.user_id).await?;

        let mut tx = self.db.begin().await?;

        // Lock the schedule row so concurrent bookings of the last spot
        // serialize on the counter. A cancelled schedule is treated as
        // nonexistent for booking purposes.
        let schedule = sqlx::query_as::<_, ClassSchedule>(
            "SELECT id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at
             FROM class_schedules
             WHERE id = $1 AND is_cancelled = FALSE
             FOR UPDATE",
        )
        .bind(request.schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::ScheduleNotFound)?;

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM class_bookings
             WHERE user_id = $1 AND schedule_id = $2 AND status = 'confirmed'",
        )
        .bind(request.user_id)
        .bind(request.schedule_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(ServiceError::DuplicateBooking);
        }

        let status = if schedule.available_spots > 0 {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Waitlist
        };
        let now = self.clock.now();

        if status == BookingStatus::Confirmed {
            sqlx::query(
                "UPDATE class_schedules
                 SET available_spots = available_spots - 1, updated_at = $2
                 WHERE id = $1",
            )
            .bind(schedule.id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let booking = sqlx::query_as::<_, ClassBooking>(
            "INSERT INTO class_bookings (id, user_id, schedule_id, status, booked_at, cancelled_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NULL, $5, $5)
             RETURNING id, user_id, schedule_id, status, booked_at, cancelled_at, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.schedule_id)
        .bind(status)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Cancel a booking on behalf of its owning user. A booking id that
    /// exists but belongs to someone else reads the same as a missing one.
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> Result<ClassBooking, ServiceError> {
        let booking = sqlx::query_as::<_, ClassBooking>(
            "SELECT id, user_id, schedule_id, status, booked_at, cancelled_at, created_at, updated_at
             FROM class_bookings
             WHERE id = $1 AND user_id = $2",
        )
        .bind(booking_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::BookingNotFound)?;

        if booking.status == BookingStatus::Cancelled {
            return Err(ServiceError::BookingAlreadyCancelled);
        }

        let now = self.clock.now();

        // The spot is not returned to the schedule and no waitlisted
        // booking is promoted.
        let cancelled = sqlx::query_as::<_, ClassBooking>(
            "UPDATE class_bookings
             SET status = 'cancelled', cancelled_at = $2, updated_at = $2
             WHERE id = $1
             RETURNING id, user_id, schedule_id, status, booked_at, cancelled_at, created_at, updated_at",
        )
        .bind(booking.id)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(cancelled)
    }

    pub async fn list_user_bookings(&self, user_id: Uuid) -> Result<Vec<ClassBooking>, ServiceError> {
        let bookings = sqlx::query_as::<_, ClassBooking>(
            "SELECT id, user_id, schedule_id, status, booked_at, cancelled_at, created_at, updated_at
             FROM class_bookings
             WHERE user_id = $1
             ORDER BY booked_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(bookings)
    }
}
