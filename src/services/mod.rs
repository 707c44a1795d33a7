// Business logic services

pub mod availability_service;
pub mod class_booking_service;
pub mod error;
pub mod facility_service;
pub mod gym_class_service;
pub mod membership_service;
pub mod personal_training_service;
pub mod trainer_service;
pub mod user_service;

pub use availability_service::AvailabilityService;
pub use class_booking_service::ClassBookingService;
pub use error::ServiceError;
pub use facility_service::FacilityService;
pub use gym_class_service::GymClassService;
pub use membership_service::MembershipService;
pub use personal_training_service::PersonalTrainingService;
pub use trainer_service::TrainerService;
pub use user_service::UserService;

use sqlx::PgPool;
use uuid::Uuid;

pub(crate) async fn ensure_user_exists(db: &PgPool, user_id: Uuid) -> Result<(), ServiceError> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .map(|_| ())
        .ok_or(ServiceError::UserNotFound)
}
