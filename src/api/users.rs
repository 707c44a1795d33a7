use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::models::{CreateUser, UpdateUser, User, UserListQuery};
use crate::services::{ServiceError, UserService};

pub fn routes(service: UserService) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:user_id", get(get_user).put(update_user))
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn create_user(
    State(service): State<UserService>,
    Json(request): Json<CreateUser>,
) -> Result<Json<User>, ServiceError> {
    let user = service.create_user(request).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(service))]
async fn get_user(
    State(service): State<UserService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ServiceError> {
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(service, request))]
async fn update_user(
    State(service): State<UserService>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUser>,
) -> Result<Json<User>, ServiceError> {
    let user = service.update_user(user_id, request).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(service))]
async fn list_users(
    State(service): State<UserService>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<User>>, ServiceError> {
    let users = service.list_users(query.limit, query.offset).await?;
    Ok(Json(users))
}
