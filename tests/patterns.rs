use date_facilities::format::ParseError;
use date_facilities::{FormatPattern, FormattingContext, Formatter, Instant, Offset};


fn instant(text: &str) -> Instant {
    text.parse().unwrap()
}

macro_rules! round_trip {
    ($name: ident: $pattern: ident, $when: expr => $text: expr) => {
        #[test]
        fn $name() {
            let formatter = FormattingContext::posix().formatter(FormatPattern::$pattern);
            let when = instant($when);
            assert_eq!(formatter.format(when), $text);
            assert_eq!(formatter.parse($text), Ok(when));
        }
    };
}

round_trip!(server_date_time:  DEFAULT_SERVER_DATE_TIME,  "2024-03-15T13:45:30Z" => "2024-03-15 13:45:30");
round_trip!(server_minutes:    DEFAULT_SERVER_DATE_TIME2, "2024-03-15T13:45:00Z" => "2024-03-15 13:45");
round_trip!(iso_t:             DEFAULT,                   "2024-03-15T13:45:30Z" => "2024-03-15T13:45:30");
round_trip!(packed_birthday:   DOB_DATE,                  "1987-11-02T00:00:00Z" => "19871102");
round_trip!(ui_date:           UI_DATE_FORMAT,            "2024-03-05T00:00:00Z" => "05/03/2024");
round_trip!(dashes:            dd_MM_yyyy_dashes,         "2024-03-05T00:00:00Z" => "05-03-2024");
round_trip!(long_month:        dd_MMMM_yyyy,              "2024-09-05T00:00:00Z" => "05 September 2024");
round_trip!(short_month:       d_MMM_yyyy_spaces,         "2024-09-05T00:00:00Z" => "5 Sep 2024");
round_trip!(twelve_hour:       yyyy_MM_dd_hh_mm_a,        "2024-03-15T00:30:00Z" => "2024-03-15 12:30 AM");
round_trip!(twelve_hour_pm:    EXPIRY_DATE_IN,            "2024-12-31T23:59:59Z" => "12/31/2024 11:59:59 PM");
round_trip!(glued_day_period:  NORMAL_DATE_TIME,          "2024-03-15T12:05:00Z" => "15/03/2024 12:05:PM");
round_trip!(spaced_numbers:    yyyy_MM_dd,                "2024-03-15T00:00:00Z" => "2024 03 15");


#[test]
fn partial_patterns_fill_in_the_rest() {
    let formatter = FormattingContext::posix().formatter(FormatPattern::HH_mm_ss);
    assert_eq!(formatter.parse("07:08:09"), Ok(instant("2000-01-01T07:08:09Z")));

    let formatter = FormattingContext::posix().formatter(FormatPattern::MMMM_yyyy);
    assert_eq!(formatter.parse("February 2023"), Ok(instant("2023-02-01T00:00:00Z")));
}

#[test]
fn names_ignore_case() {
    let formatter = FormattingContext::posix().formatter(FormatPattern::dd_MMM);
    assert_eq!(formatter.parse("07 mAr"), Ok(instant("2000-03-07T00:00:00Z")));
}

#[test]
fn weekday_names_are_read_and_ignored() {
    let formatter = FormattingContext::posix().formatter(FormatPattern::DAY_TITLE_FULL);
    assert_eq!(formatter.parse("Wednesday"), Ok(instant("2000-01-01T00:00:00Z")));
    assert!(formatter.parse("Someday").is_err());
}

#[test]
fn lenient_trims_but_strict_does_not() {
    let lenient = FormattingContext::posix().formatter(FormatPattern::DEFAULT_SERVER_DATE);
    let strict  = FormattingContext::posix().with_lenient(false).formatter(FormatPattern::DEFAULT_SERVER_DATE);

    assert_eq!(lenient.parse("  2024-03-15 "), Ok(instant("2024-03-15T00:00:00Z")));
    assert!(strict.parse("  2024-03-15 ").is_err());
}

#[test]
fn lenient_rolls_hours_into_the_next_day() {
    let formatter = FormattingContext::posix().formatter(FormatPattern::DEFAULT_SERVER_DATE_TIME);
    assert_eq!(formatter.parse("2024-03-15 25:00:00"), Ok(instant("2024-03-16T01:00:00Z")));
}

#[test]
fn strict_rejects_out_of_range() {
    let formatter = FormattingContext::posix().with_lenient(false).formatter(FormatPattern::DEFAULT_SERVER_DATE_TIME);
    assert_eq!(formatter.parse("2024-03-15 25:00:00"), Err(ParseError::OutOfRange));
}

#[test]
fn leftovers_are_an_error() {
    let formatter = FormattingContext::posix().formatter(FormatPattern::DEFAULT_SERVER_DATE);
    assert_eq!(formatter.parse("2024-03-15 10:00"), Err(ParseError::TrailingInput { pos: 10 }));
}

#[test]
fn parsing_happens_in_the_context_zone() {
    let context = FormattingContext::posix().with_time_zone(Offset::of_hours_and_minutes(5, 30).unwrap());
    let formatter = context.formatter(FormatPattern::DEFAULT);
    assert_eq!(formatter.parse("2024-03-15T06:30:00"), Ok(instant("2024-03-15T01:00:00Z")));
}

#[test]
fn posix_formatter_uses_utc() {
    let formatter = Formatter::posix(FormatPattern::DEFAULT);
    assert!(formatter.context().time_zone.is_utc());
    assert_eq!(formatter.format(instant("2024-03-15T01:00:00Z")), "2024-03-15T01:00:00");
}

#[test]
fn custom_pattern_strings() {
    let formatter = Formatter::new("EEE, d MMM yyyy 'at' HH:mm", FormattingContext::posix()).unwrap();
    assert_eq!(formatter.format(instant("2024-03-15T01:00:00Z")), "Fri, 15 Mar 2024 at 01:00");
}
