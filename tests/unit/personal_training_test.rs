use assert_matches::assert_matches;
use gymbook::services::personal_training_service::{
    intervals_overlap, minute_of_day, session_price,
};
use gymbook::services::ServiceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[test]
fn minute_of_day_parses_zero_padded_times() {
    assert_eq!(minute_of_day("00:00").unwrap(), 0);
    assert_eq!(minute_of_day("09:00").unwrap(), 540);
    assert_eq!(minute_of_day("23:59").unwrap(), 1439);
}

#[test]
fn minute_of_day_rejects_malformed_input() {
    assert_matches!(minute_of_day("25:00"), Err(ServiceError::InvalidTimeFormat));
    assert_matches!(minute_of_day("09:60"), Err(ServiceError::InvalidTimeFormat));
    assert_matches!(minute_of_day("morning"), Err(ServiceError::InvalidTimeFormat));
    assert_matches!(minute_of_day(""), Err(ServiceError::InvalidTimeFormat));
}

#[test]
fn overlapping_intervals_conflict() {
    assert!(intervals_overlap("10:00", "11:00", "09:30", "10:30"));
    assert!(intervals_overlap("09:30", "10:30", "10:00", "11:00"));
    // Containment in both directions.
    assert!(intervals_overlap("09:00", "12:00", "10:00", "11:00"));
    assert!(intervals_overlap("10:00", "11:00", "09:00", "12:00"));
    // An identical slot conflicts with itself.
    assert!(intervals_overlap("09:00", "10:00", "09:00", "10:00"));
}

#[test]
fn back_to_back_intervals_do_not_conflict() {
    assert!(!intervals_overlap("09:00", "10:00", "10:00", "11:00"));
    assert!(!intervals_overlap("10:00", "11:00", "09:00", "10:00"));
}

#[test]
fn disjoint_intervals_do_not_conflict() {
    assert!(!intervals_overlap("09:00", "10:00", "14:00", "15:00"));
    assert!(!intervals_overlap("14:00", "15:00", "09:00", "10:00"));
}

#[test]
fn price_is_rate_times_hours() {
    let start = minute_of_day("09:00").unwrap();
    let end = minute_of_day("10:30").unwrap();
    assert_eq!(session_price(dec("75.00"), start, end), dec("112.50"));

    let one_hour_end = minute_of_day("10:00").unwrap();
    assert_eq!(session_price(dec("50.00"), start, one_hour_end), dec("50.00"));
}

#[test]
fn price_of_a_short_session_rounds_to_cents() {
    // 20 minutes at 50/h is a third of the rate.
    let start = minute_of_day("09:00").unwrap();
    let end = minute_of_day("09:20").unwrap();
    assert_eq!(session_price(dec("50.00"), start, end), dec("16.67"));
}

#[test]
fn zero_rate_yields_zero_price() {
    let start = minute_of_day("09:00").unwrap();
    let end = minute_of_day("10:00").unwrap();
    assert_eq!(session_price(Decimal::ZERO, start, end), Decimal::ZERO);
}
