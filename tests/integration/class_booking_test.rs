use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;

use gymbook::clock::FixedClock;
use gymbook::models::{BookClassRequest, BookingStatus, ClassSchedule};
use gymbook::services::{ClassBookingService, GymClassService, ServiceError};

use crate::common;

async fn fetch_schedule(db: &sqlx::PgPool, schedule_id: Uuid) -> ClassSchedule {
    sqlx::query_as::<_, ClassSchedule>(
        "SELECT id, class_id, start_time, end_time, room, available_spots, is_cancelled, created_at, updated_at
         FROM class_schedules WHERE id = $1",
    )
    .bind(schedule_id)
    .fetch_one(db)
    .await
    .expect("fetch schedule")
}

#[tokio::test]
#[serial]
async fn last_spot_confirms_then_waitlists() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 1).await;
    let first_user = common::seed_user(&db).await;
    let second_user = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    let first = service
        .book_class(BookClassRequest {
            user_id: first_user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("first booking");
    assert_eq!(first.status, BookingStatus::Confirmed);
    assert!(first.cancelled_at.is_none());
    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 0);

    let second = service
        .book_class(BookClassRequest {
            user_id: second_user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("second booking");
    assert_eq!(second.status, BookingStatus::Waitlist);
    // Waitlisting leaves the counter untouched.
    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 0);
}

#[tokio::test]
#[serial]
async fn spots_cap_the_number_of_confirmed_bookings() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 2).await;
    let service = ClassBookingService::new(db.clone());

    let mut statuses = Vec::new();
    for _ in 0..4 {
        let user = common::seed_user(&db).await;
        let booking = service
            .book_class(BookClassRequest {
                user_id: user.id,
                schedule_id: schedule.id,
            })
            .await
            .expect("booking");
        statuses.push(booking.status);
    }

    let confirmed = statuses
        .iter()
        .filter(|s| **s == BookingStatus::Confirmed)
        .count();
    assert_eq!(confirmed, 2);
    assert_eq!(statuses.len() - confirmed, 2);
    // The first two callers get the spots, the rest queue up.
    assert_eq!(statuses[0], BookingStatus::Confirmed);
    assert_eq!(statuses[1], BookingStatus::Confirmed);
    assert_eq!(statuses[2], BookingStatus::Waitlist);
    assert_eq!(statuses[3], BookingStatus::Waitlist);
    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 0);
}

#[tokio::test]
#[serial]
async fn duplicate_confirmed_booking_conflicts() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 5).await;
    let user = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("first booking");

    let result = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await;
    assert_matches!(result, Err(ServiceError::DuplicateBooking));

    // The failed attempt must not have touched the counter.
    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 4);
}

#[tokio::test]
#[serial]
async fn rebooking_after_cancellation_is_allowed() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 5).await;
    let user = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    let booking = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("book");
    service
        .cancel_booking(booking.id, user.id)
        .await
        .expect("cancel");

    // Cancelled history rows may coexist with a fresh confirmed booking.
    let again = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("rebook");
    assert_eq!(again.status, BookingStatus::Confirmed);
}

#[tokio::test]
#[serial]
async fn cancelling_twice_fails_the_second_time() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 3).await;
    let user = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    let booking = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("book");

    let cancelled = service
        .cancel_booking(booking.id, user.id)
        .await
        .expect("first cancel");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    let result = service.cancel_booking(booking.id, user.id).await;
    assert_matches!(result, Err(ServiceError::BookingAlreadyCancelled));
}

#[tokio::test]
#[serial]
async fn cancelling_someone_elses_booking_reads_as_missing() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 3).await;
    let owner = common::seed_user(&db).await;
    let intruder = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    let booking = service
        .book_class(BookClassRequest {
            user_id: owner.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("book");

    let result = service.cancel_booking(booking.id, intruder.id).await;
    assert_matches!(result, Err(ServiceError::BookingNotFound));
}

#[tokio::test]
#[serial]
async fn cancelled_schedule_is_not_bookable() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 3).await;
    let user = common::seed_user(&db).await;

    GymClassService::new(db.clone())
        .cancel_schedule(schedule.id)
        .await
        .expect("cancel schedule");

    let result = ClassBookingService::new(db.clone())
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await;
    assert_matches!(result, Err(ServiceError::ScheduleNotFound));
}

#[tokio::test]
#[serial]
async fn cancelling_a_booking_does_not_release_the_spot() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 1).await;
    let user = common::seed_user(&db).await;
    let service = ClassBookingService::new(db.clone());

    let booking = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("book");
    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 0);

    service
        .cancel_booking(booking.id, user.id)
        .await
        .expect("cancel");

    assert_eq!(fetch_schedule(&db, schedule.id).await.available_spots, 0);
}

#[tokio::test]
#[serial]
async fn booking_timestamps_come_from_the_clock() {
    let db = match common::try_connect().await {
        Some(db) => db,
        None => return,
    };

    let schedule = common::seed_schedule(&db, 3).await;
    let user = common::seed_user(&db).await;

    let booked_at = Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap();
    let service = ClassBookingService::with_clock(db.clone(), Arc::new(FixedClock(booked_at)));

    let booking = service
        .book_class(BookClassRequest {
            user_id: user.id,
            schedule_id: schedule.id,
        })
        .await
        .expect("book");
    assert_eq!(booking.booked_at, booked_at);

    let cancelled_at = Utc.with_ymd_and_hms(2024, 5, 11, 9, 0, 0).unwrap();
    let service = ClassBookingService::with_clock(db.clone(), Arc::new(FixedClock(cancelled_at)));

    let cancelled = service
        .cancel_booking(booking.id, user.id)
        .await
        .expect("cancel");
    assert_eq!(cancelled.cancelled_at, Some(cancelled_at));
    assert_eq!(cancelled.updated_at, cancelled_at);
}
