use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "class_difficulty", rename_all = "lowercase")]
pub enum ClassDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GymClass {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub trainer_id: Uuid,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub difficulty: ClassDifficulty,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGymClass {
    pub name: String,
    pub description: String,
    pub trainer_id: Uuid,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub difficulty: ClassDifficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassSchedule {
    pub id: Uuid,
    pub class_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room: String,
    pub available_spots: i32,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateClassSchedule {
    pub class_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room: String,
}
