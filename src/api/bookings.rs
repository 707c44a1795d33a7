use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::models::{BookClassRequest, CancelBookingRequest, ClassBooking};
use crate::services::{ClassBookingService, ServiceError};

pub fn routes(service: ClassBookingService) -> Router {
    Router::new()
        .route("/bookings", post(book_class))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/users/:user_id/bookings", get(list_user_bookings))
        .with_state(service)
}

#[tracing::instrument(skip(service, request))]
async fn book_class(
    State(service): State<ClassBookingService>,
    Json(request): Json<BookClassRequest>,
) -> Result<Json<ClassBooking>, ServiceError> {
    let booking = service.book_class(request).await?;
    Ok(Json(booking))
}

#[tracing::instrument(skip(service, request))]
async fn cancel_booking(
    State(service): State<ClassBookingService>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<Json<ClassBooking>, ServiceError> {
    let booking = service.cancel_booking(booking_id, request.user_id).await?;
    Ok(Json(booking))
}

#[tracing::instrument(skip(service))]
async fn list_user_bookings(
    State(service): State<ClassBookingService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ClassBooking>>, ServiceError> {
    let bookings = service.list_user_bookings(user_id).await?;
    Ok(Json(bookings))
}
