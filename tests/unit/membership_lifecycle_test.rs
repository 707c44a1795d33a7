use chrono::{DateTime, TimeZone, Utc};
use gymbook::services::membership_service::advance_by_months;
use pretty_assertions::assert_eq;

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

#[test]
fn six_months_from_january_first() {
    assert_eq!(advance_by_months(utc(2024, 1, 1), 6), utc(2024, 7, 1));
}

#[test]
fn twelve_months_crossing_a_year_boundary() {
    assert_eq!(advance_by_months(utc(2024, 11, 15), 3), utc(2025, 2, 15));
    assert_eq!(advance_by_months(utc(2024, 1, 1), 24), utc(2026, 1, 1));
}

#[test]
fn leap_day_plus_a_year_rolls_into_march() {
    // 2025 has no Feb 29, so the date spills forward rather than clamping
    // to Feb 28.
    assert_eq!(advance_by_months(utc(2024, 2, 29), 12), utc(2025, 3, 1));
}

#[test]
fn leap_day_plus_four_years_stays_on_leap_day() {
    assert_eq!(advance_by_months(utc(2024, 2, 29), 48), utc(2028, 2, 29));
}

#[test]
fn month_end_overflow_rolls_by_the_excess_days() {
    // January 31st into February: two days over in a leap year, three in a
    // common year.
    assert_eq!(advance_by_months(utc(2024, 1, 31), 1), utc(2024, 3, 2));
    assert_eq!(advance_by_months(utc(2023, 1, 31), 1), utc(2023, 3, 3));
}

#[test]
fn thirty_first_into_a_thirty_day_month() {
    assert_eq!(advance_by_months(utc(2024, 3, 31), 1), utc(2024, 5, 1));
}

#[test]
fn wall_clock_time_is_preserved() {
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 45).unwrap();
    let end = advance_by_months(start, 3);
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 4, 15, 8, 30, 45).unwrap());
}
