use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

use crate::models::{CreateFacility, Facility, GymInfo, SetGymInfo};
use crate::services::{FacilityService, ServiceError};

pub fn routes(service: FacilityService) -> Router {
    Router::new()
        .route("/facilities", get(list_facilities).post(create_facility))
        .route("/gym-info", get(get_gym_info).put(set_gym_info))
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn create_facility(
    State(service): State<FacilityService>,
    Json(request): Json<CreateFacility>,
) -> Result<Json<Facility>, ServiceError> {
    let facility = service.create_facility(request).await?;
    Ok(Json(facility))
}

#[tracing::instrument(skip(service))]
async fn list_facilities(
    State(service): State<FacilityService>,
) -> Result<Json<Vec<Facility>>, ServiceError> {
    let facilities = service.list_facilities().await?;
    Ok(Json(facilities))
}

#[tracing::instrument(skip(service))]
async fn get_gym_info(
    State(service): State<FacilityService>,
) -> Result<Json<Option<GymInfo>>, ServiceError> {
    let info = service.get_gym_info().await?;
    Ok(Json(info))
}

#[tracing::instrument(skip(service, request))]
async fn set_gym_info(
    State(service): State<FacilityService>,
    Json(request): Json<SetGymInfo>,
) -> Result<Json<GymInfo>, ServiceError> {
    let info = service.set_gym_info(request).await?;
    Ok(Json(info))
}
