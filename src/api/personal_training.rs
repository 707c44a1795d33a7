use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use crate::models::{
    BookPersonalTrainingRequest, PersonalTrainingSession, SessionDateQuery,
    UpdatePersonalTrainingRequest,
};
use crate::services::{PersonalTrainingService, ServiceError};

pub fn routes(service: PersonalTrainingService) -> Router {
    Router::new()
        .route("/personal-training", post(book_session))
        .route("/personal-training/:id", put(update_session))
        .route("/users/:user_id/personal-training", get(list_user_sessions))
        .route(
            "/trainers/:trainer_id/personal-training",
            get(list_trainer_sessions),
        )
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn book_session(
    State(service): State<PersonalTrainingService>,
    Json(request): Json<BookPersonalTrainingRequest>,
) -> Result<Json<PersonalTrainingSession>, ServiceError> {
    let session = service.book_session(request).await?;
    Ok(Json(session))
}

#[tracing::instrument(skip(service, request))]
async fn update_session(
    State(service): State<PersonalTrainingService>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdatePersonalTrainingRequest>,
) -> Result<Json<PersonalTrainingSession>, ServiceError> {
    let session = service.update_session(session_id, request).await?;
    Ok(Json(session))
}

#[tracing::instrument(skip(service))]
async fn list_user_sessions(
    State(service): State<PersonalTrainingService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PersonalTrainingSession>>, ServiceError> {
    let sessions = service.list_user_sessions(user_id).await?;
    Ok(Json(sessions))
}

#[tracing::instrument(skip(service))]
async fn list_trainer_sessions(
    State(service): State<PersonalTrainingService>,
    Path(trainer_id): Path<Uuid>,
    Query(query): Query<SessionDateQuery>,
) -> Result<Json<Vec<PersonalTrainingSession>>, ServiceError> {
    let sessions = service.list_trainer_sessions(trainer_id, query.date).await?;
    Ok(Json(sessions))
}
