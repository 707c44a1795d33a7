use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health::health_check;
use super::{bookings, classes, facilities, memberships, personal_training, trainers, users};
use crate::services::{
    AvailabilityService, ClassBookingService, FacilityService, GymClassService, MembershipService,
    PersonalTrainingService, TrainerService, UserService,
};

pub fn create_routes(db: PgPool) -> Router {
    let user_service = UserService::new(db.clone());
    let membership_service = MembershipService::new(db.clone());
    let booking_service = ClassBookingService::new(db.clone());
    let personal_training_service = PersonalTrainingService::new(db.clone());
    let availability_service = AvailabilityService::new(db.clone());
    let trainer_service = TrainerService::new(db.clone());
    let gym_class_service = GymClassService::new(db.clone());
    let facility_service = FacilityService::new(db);

    let api = Router::new()
        .merge(users::routes(user_service))
        .merge(memberships::routes(membership_service))
        .merge(bookings::routes(booking_service))
        .merge(personal_training::routes(personal_training_service))
        .merge(trainers::routes(trainer_service, availability_service))
        .merge(classes::routes(gym_class_service))
        .merge(facilities::routes(facility_service));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
