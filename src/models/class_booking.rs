use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Waitlist,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookClassRequest {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub user_id: Uuid,
}
