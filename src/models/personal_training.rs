use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A one-on-one training session. Start and end times are same-day
/// zero-padded "HH:MM" wall-clock strings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonalTrainingSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trainer_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookPersonalTrainingRequest {
    pub user_id: Uuid,
    pub trainer_id: Uuid,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePersonalTrainingRequest {
    pub user_id: Uuid,
    pub status: Option<SessionStatus>,
    /// Omitted leaves notes untouched; an explicit null clears them.
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SessionDateQuery {
    pub date: NaiveDate,
}

// Maps a present-but-null field to Some(None) so it can be told apart from
// an absent field, which stays None via the serde default.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
