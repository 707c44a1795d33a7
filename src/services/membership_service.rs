use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{
    CreateMembership, CreateMembershipTier, MembershipStatus, MembershipTier, UserMembership,
};
use crate::services::{ensure_user_exists, ServiceError};

#[derive(Clone)]
pub struct MembershipService {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl MembershipService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Purchase a membership for a user. The end date is derived from the
    /// tier's duration in whole calendar months.
    pub async fn create_membership(
        &self,
        request: CreateMembership,
    ) -> Result<UserMembership, ServiceError> {
        ensure_user_exists(&self.db, request.user_id).await?;

        let tier = self
            .get_tier(request.membership_tier_id)
            .await?
            .ok_or(ServiceError::TierNotFound)?;

        if !tier.is_active {
            return Err(ServiceError::TierInactive);
        }

        let end_date = advance_by_months(request.start_date, tier.duration_months);
        let now = self.clock.now();

        let membership = sqlx::query_as::<_, UserMembership>(
            "INSERT INTO user_memberships (id, user_id, tier_id, start_date, end_date, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING id, user_id, tier_id, start_date, end_date, status, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.membership_tier_id)
        .bind(request.start_date)
        .bind(end_date)
        .bind(MembershipStatus::Active)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(membership)
    }

    /// The user's current membership: the most recently created row that is
    /// still marked active. The stored status decides, not the date range.
    pub async fn get_current_membership(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserMembership>, ServiceError> {
        let membership = sqlx::query_as::<_, UserMembership>(
            "SELECT id, user_id, tier_id, start_date, end_date, status, created_at, updated_at
             FROM user_memberships
             WHERE user_id = $1 AND status = 'active'
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(membership)
    }

    pub async fn create_tier(
        &self,
        request: CreateMembershipTier,
    ) -> Result<MembershipTier, ServiceError> {
        let now = self.clock.now();

        let tier = sqlx::query_as::<_, MembershipTier>(
            "INSERT INTO membership_tiers (id, name, description, price, duration_months, features, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING id, name, description, price, duration_months, features, is_active, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.duration_months)
        .bind(&request.features)
        .bind(request.is_active.unwrap_or(true))
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(tier)
    }

    pub async fn list_active_tiers(&self) -> Result<Vec<MembershipTier>, ServiceError> {
        let tiers = sqlx::query_as::<_, MembershipTier>(
            "SELECT id, name, description, price, duration_months, features, is_active, created_at, updated_at
             FROM membership_tiers
             WHERE is_active = TRUE
             ORDER BY price ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(tiers)
    }

    pub async fn get_tier(&self, tier_id: Uuid) -> Result<Option<MembershipTier>, ServiceError> {
        let tier = sqlx::query_as::<_, MembershipTier>(
            "SELECT id, name, description, price, duration_months, features, is_active, created_at, updated_at
             FROM membership_tiers
             WHERE id = $1",
        )
        .bind(tier_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(tier)
    }
}

/// Advances a timestamp by whole calendar months, preserving the wall-clock
/// time. When the target month is shorter than the start day, the date rolls
/// forward into the following month rather than clamping: 2024-02-29 plus
/// 12 months lands on 2025-03-01, not 2025-02-28.
pub fn advance_by_months(start: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let date = add_calendar_months(start.date_naive(), months);
    DateTime::from_naive_utc_and_offset(date.and_time(start.time()), Utc)
}

fn add_calendar_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;

    match NaiveDate::from_ymd_opt(year, month, date.day()) {
        Some(rolled) => rolled,
        None => {
            // The start day overflows the target month; spill the excess
            // days into the month that follows.
            let last = days_in_month(year, month);
            let end_of_month = NaiveDate::from_ymd_opt(year, month, last)
                .expect("last day of month is a valid date");
            end_of_month + Duration::days(i64::from(date.day() - last))
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}
