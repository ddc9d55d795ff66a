use std::cmp::Ordering;

use date_facilities::{dates, FormatPattern, Instant, Component, Error};
use serial_test::serial;


fn instant(text: &str) -> Instant {
    text.parse().unwrap()
}


#[test]
#[serial]
fn convert_server_date_to_ui_date() {
    let text = dates::convert("2024-03-15", FormatPattern::DEFAULT_SERVER_DATE, FormatPattern::UI_DATE_FORMAT);
    assert_eq!(text.as_deref(), Some("15/03/2024"));
}

#[test]
#[serial]
fn convert_is_parse_then_format() {
    let parsed = dates::parse("2024-03-15 13:45:00", FormatPattern::DEFAULT_SERVER_DATE_TIME).unwrap();
    let direct = dates::format(parsed, FormatPattern::MMM_dd_hh_mm_a);
    let converted = dates::convert("2024-03-15 13:45:00", FormatPattern::DEFAULT_SERVER_DATE_TIME, FormatPattern::MMM_dd_hh_mm_a);

    assert_eq!(direct, "Mar 15, 01:45 PM");
    assert_eq!(converted, Some(direct));
}

#[test]
#[serial]
fn malformed_text_is_absent() {
    assert_eq!(dates::parse("not-a-date", FormatPattern::DEFAULT_SERVER_DATE), None);
    assert_eq!(dates::convert("not-a-date", FormatPattern::DEFAULT_SERVER_DATE, FormatPattern::yyyy), None);
}

#[test]
#[serial]
fn format_optional_passes_absence_through() {
    assert_eq!(dates::format_optional(None, FormatPattern::DEFAULT_SERVER_DATE), None);
    assert_eq!(dates::format_optional(Some(instant("2024-03-15T01:00:00Z")), FormatPattern::DEFAULT_SERVER_DATE),
               Some("2024-03-15".to_owned()));
}

#[test]
#[serial]
fn same_day_is_the_same() {
    let a = instant("2024-03-15T01:00:00Z");
    let b = instant("2024-03-15T23:00:00Z");
    assert_eq!(dates::compare_dates(a, b), Ordering::Equal);
    assert_eq!(dates::compare_dates(b, a), Ordering::Equal);
}

#[test]
#[serial]
fn next_day_is_after() {
    let a = instant("2024-03-15T23:59:59Z");
    let b = instant("2024-03-16T00:00:00Z");
    assert_eq!(dates::compare_dates(a, b), Ordering::Less);
    assert_eq!(dates::compare_dates(b, a), Ordering::Greater);
}

#[test]
#[serial]
fn in_month_range() {
    let start  = instant("2024-01-01T00:00:00Z");
    let end    = instant("2024-01-31T23:59:59Z");
    let target = instant("2024-01-15T12:00:00Z");
    assert!(dates::is_date_in_range(target, start, end, true));
}

#[test]
#[serial]
fn range_without_time_of_day() {
    let start  = instant("2024-01-01T08:00:00Z");
    let end    = instant("2024-01-01T20:00:00Z");
    let early  = instant("2024-01-01T06:00:00Z");

    assert!(!dates::is_date_in_range(early, start, end, true));
    assert!(dates::is_date_in_range(early, start, end, false));
}

#[test]
#[serial]
fn range_endpoints_count() {
    let start = instant("2024-01-01T08:00:00Z");
    let end   = instant("2024-01-02T08:00:00Z");

    for &include_time in &[true, false] {
        assert!(dates::is_date_in_range(start, start, end, include_time));
        assert!(dates::is_date_in_range(end, start, end, include_time));
    }
}

#[test]
#[serial]
fn zeroing_is_idempotent() {
    let x = Instant::at_ms(1_710_544_321, 987);
    let once = dates::zero_out_time(x);
    assert_eq!(dates::zero_out_time(once), once);
    assert_eq!(once, instant("2024-03-15T00:00:00Z"));
}

#[test]
#[serial]
fn age_on_a_fixed_day() {
    let now = instant("2024-06-01T00:00:00Z");
    assert_eq!(dates::age_in_years_at("20000101", FormatPattern::DOB_DATE, now), Ok("24".to_owned()));
}

#[test]
#[serial]
fn age_of_nonsense_is_an_error() {
    let now = instant("2024-06-01T00:00:00Z");
    match dates::age_in_years_at("yesterday", FormatPattern::DOB_DATE, now) {
        Err(Error::Parse { text, pattern, .. }) => {
            assert_eq!(text, "yesterday");
            assert_eq!(pattern, FormatPattern::DOB_DATE);
        },
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
#[serial]
fn age_against_the_clock() {
    let age: i64 = dates::age_in_years("19700101", FormatPattern::DOB_DATE).unwrap().parse().unwrap();
    assert!(age >= 54);
}

#[test]
#[serial]
fn only_requested_components() {
    let parts = dates::date_components(vec![Component::Year, Component::Weekday], instant("2024-03-15T01:00:00Z"));
    assert_eq!(parts.year(), Some(2024));
    assert_eq!(parts.weekday(), Some(6));
    assert_eq!(parts.month(), None);
    assert_eq!(parts.len(), 2);
}

#[test]
#[serial]
fn age_on_a_leap_day_birthday() {
    let now = instant("2001-02-28T12:00:00Z");
    assert_eq!(dates::age_in_years_at("20000229", FormatPattern::DOB_DATE, now), Ok("1".to_owned()));
}

#[test]
#[serial]
fn enormous_numbers_are_absent() {
    assert_eq!(dates::parse("999999999999999999-01-01", FormatPattern::DEFAULT_SERVER_DATE), None);
    assert_eq!(dates::parse("2024-01-999999999999999999", FormatPattern::DEFAULT_SERVER_DATE), None);
    assert_eq!(dates::convert("2024-03-15 999999999999999999:00:00", FormatPattern::DEFAULT_SERVER_DATE_TIME, FormatPattern::UI_DATE_FORMAT), None);
}

#[test]
#[serial]
fn zeroing_the_first_instant() {
    let zeroed = dates::zero_out_time(Instant::at(i64::MIN));
    assert_eq!(zeroed, Instant::MIN);
    assert_eq!(dates::zero_out_time(zeroed), zeroed);
}

#[test]
#[serial]
fn in_range_with_time() {
    let start  = instant("2024-01-01T08:00:00Z");
    let end    = instant("2024-01-01T20:00:00Z");
    assert!(dates::is_date_in_range_with_time(instant("2024-01-01T12:00:00Z"), start, end));
    assert!(!dates::is_date_in_range_with_time(instant("2024-01-01T06:00:00Z"), start, end));
}
