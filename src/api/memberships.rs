use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::models::{CreateMembership, CreateMembershipTier, MembershipTier, UserMembership};
use crate::services::{MembershipService, ServiceError};

pub fn routes(service: MembershipService) -> Router {
    Router::new()
        .route("/memberships", post(create_membership))
        .route("/membership-tiers", get(list_tiers).post(create_tier))
        .route("/membership-tiers/:id", get(get_tier))
        .route("/users/:user_id/membership", get(get_current_membership))
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn create_membership(
    State(service): State<MembershipService>,
    Json(request): Json<CreateMembership>,
) -> Result<Json<UserMembership>, ServiceError> {
    let membership = service.create_membership(request).await?;
    Ok(Json(membership))
}

/// The user's current membership, or a null body when there is none.
#[tracing::instrument(skip(service))]
async fn get_current_membership(
    State(service): State<MembershipService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<UserMembership>>, ServiceError> {
    let membership = service.get_current_membership(user_id).await?;
    Ok(Json(membership))
}

#[tracing::instrument(skip(service, request))]
async fn create_tier(
    State(service): State<MembershipService>,
    Json(request): Json<CreateMembershipTier>,
) -> Result<Json<MembershipTier>, ServiceError> {
    let tier = service.create_tier(request).await?;
    Ok(Json(tier))
}

#[tracing::instrument(skip(service))]
async fn list_tiers(
    State(service): State<MembershipService>,
) -> Result<Json<Vec<MembershipTier>>, ServiceError> {
    let tiers = service.list_active_tiers().await?;
    Ok(Json(tiers))
}

#[tracing::instrument(skip(service))]
async fn get_tier(
    State(service): State<MembershipService>,
    Path(tier_id): Path<Uuid>,
) -> Result<Json<MembershipTier>, ServiceError> {
    let tier = service
        .get_tier(tier_id)
        .await?
        .ok_or(ServiceError::TierNotFound)?;
    Ok(Json(tier))
}
