use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::models::{ClassSchedule, CreateClassSchedule, CreateGymClass, GymClass};
use crate::services::{GymClassService, ServiceError};

pub fn routes(service: GymClassService) -> Router {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/:id", get(get_class))
        .route("/schedules", get(list_schedules).post(create_schedule))
        .route("/schedules/:id/cancel", post(cancel_schedule))
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn create_class(
    State(service): State<GymClassService>,
    Json(request): Json<CreateGymClass>,
) -> Result<Json<GymClass>, ServiceError> {
    let class = service.create_class(request).await?;
    Ok(Json(class))
}

#[tracing::instrument(skip(service))]
async fn get_class(
    State(service): State<GymClassService>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<GymClass>, ServiceError> {
    let class = service.get_class(class_id).await?;
    Ok(Json(class))
}

#[tracing::instrument(skip(service))]
async fn list_classes(
    State(service): State<GymClassService>,
) -> Result<Json<Vec<GymClass>>, ServiceError> {
    let classes = service.list_classes().await?;
    Ok(Json(classes))
}

#[tracing::instrument(skip(service, request))]
async fn create_schedule(
    State(service): State<GymClassService>,
    Json(request): Json<CreateClassSchedule>,
) -> Result<Json<ClassSchedule>, ServiceError> {
    let schedule = service.create_schedule(request).await?;
    Ok(Json(schedule))
}

#[tracing::instrument(skip(service))]
async fn list_schedules(
    State(service): State<GymClassService>,
) -> Result<Json<Vec<ClassSchedule>>, ServiceError> {
    let schedules = service.list_upcoming_schedules().await?;
    Ok(Json(schedules))
}

#[tracing::instrument(skip(service))]
async fn cancel_schedule(
    State(service): State<GymClassService>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ClassSchedule>, ServiceError> {
    let schedule = service.cancel_schedule(schedule_id).await?;
    Ok(Json(schedule))
}
