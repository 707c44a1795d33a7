use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::models::{CreateTrainer, SessionDateQuery, Trainer, TrainerListQuery, UpdateTrainer};
use crate::services::{AvailabilityService, ServiceError, TrainerService};

pub fn routes(trainer_service: TrainerService, availability_service: AvailabilityService) -> Router {
    Router::new()
        .route("/trainers", get(list_trainers).post(create_trainer))
        .route("/trainers/:trainer_id", get(get_trainer).put(update_trainer))
        .with_state(trainer_service)
        .merge(
            Router::new()
                .route("/trainers/:trainer_id/availability", get(get_availability))
                .with_state(availability_service),
        )
}

#[tracing::instrument(skip(service, request))]
async fn create_trainer(
    State(service): State<TrainerService>,
    Json(request): Json<CreateTrainer>,
) -> Result<Json<Trainer>, ServiceError> {
    let trainer = service.create_trainer(request).await?;
    Ok(Json(trainer))
}

#[tracing::instrument(skip(service))]
async fn get_trainer(
    State(service): State<TrainerService>,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<Trainer>, ServiceError> {
    let trainer = service.get_trainer(trainer_id).await?;
    Ok(Json(trainer))
}

#[tracing::instrument(skip(service))]
async fn list_trainers(
    State(service): State<TrainerService>,
    Query(query): Query<TrainerListQuery>,
) -> Result<Json<Vec<Trainer>>, ServiceError> {
    let trainers = service
        .list_trainers(query.available_only.unwrap_or(false))
        .await?;
    Ok(Json(trainers))
}

#[tracing::instrument(skip(service, request))]
async fn update_trainer(
    State(service): State<TrainerService>,
    Path(trainer_id): Path<Uuid>,
    Json(request): Json<UpdateTrainer>,
) -> Result<Json<Trainer>, ServiceError> {
    let trainer = service.update_trainer(trainer_id, request).await?;
    Ok(Json(trainer))
}

/// Open hourly slots for a trainer on a given date.
#[tracing::instrument(skip(service))]
async fn get_availability(
    State(service): State<AvailabilityService>,
    Path(trainer_id): Path<Uuid>,
    Query(query): Query<SessionDateQuery>,
) -> Result<Json<Vec<String>>, ServiceError> {
    let slots = service.get_availability(trainer_id, query.date).await?;
    Ok(Json(slots))
}
