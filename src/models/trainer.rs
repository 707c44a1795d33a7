use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trainer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: String,
    pub bio: Option<String>,
    pub hourly_rate: Decimal,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTrainer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: String,
    pub bio: Option<String>,
    pub hourly_rate: Decimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTrainer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrainerListQuery {
    pub available_only: Option<bool>,
}
