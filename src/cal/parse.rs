//! ISO-8601 input, through the `iso8601` crate.
//!
//! These are mostly a convenience for writing instants down in code and
//! tests; the named patterns don’t go through here.

use std::str::FromStr;

use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime, Month, Error as DateTimeError};
use crate::cal::offset::{Offset, Error as OffsetError};
use crate::cal::DatePiece;
use crate::instant::Instant;


impl FromStr for LocalDate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::date(input).map_err(Error::Parse)?;
        Ok(fields_to_date(fields)?)
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;

        let date = fields_to_date(fields.date)?;
        let time = fields_to_time(fields.time)?;
        Ok(Self::new(date, time))
    }
}

/// Reads an instant such as `2024-03-15T01:00:00Z` or
/// `2024-03-15T06:30:00+05:30`. A missing offset means UTC.
impl FromStr for Instant {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;
        let (hours, minutes) = (fields.time.tz_offset_hours, fields.time.tz_offset_minutes);

        let date   = fields_to_date(fields.date)?;
        let time   = fields_to_time(fields.time)?;
        let offset = Offset::of_hours_and_minutes(hours as i8, minutes as i8)?;
        let instant = offset.to_instant(LocalDateTime::new(date, time)).ok_or(DateTimeError::OutOfRange)?;
        Ok(instant)
    }
}


fn fields_to_date(fields: iso8601::Date) -> Result<LocalDate, DateTimeError> {
    match fields {
        iso8601::Date::YMD { year, month, day } => {
            let month = Month::from_one(month as i8)?;
            LocalDate::ymd(i64::from(year), month, day as i8)
        },
        iso8601::Date::Week { year, ww, d } => {
            if ww < 1 || ww > 53 || d < 1 || d > 7 {
                return Err(DateTimeError::OutOfRange);
            }

            // The 4th of January is always in week 1.
            let jan_4 = LocalDate::ymd(i64::from(year), Month::January, 4)?;
            let monday = jan_4.days_since_epoch() - i64::from(jan_4.weekday().days_from_monday_as_one()) + 1;
            Ok(LocalDate::from_days_since_epoch(monday + 7 * (i64::from(ww) - 1) + i64::from(d) - 1))
        },
        iso8601::Date::Ordinal { year, ddd } => {
            let jan_1 = LocalDate::ymd(i64::from(year), Month::January, 1)?;
            let date = LocalDate::from_days_since_epoch(jan_1.days_since_epoch() + i64::from(ddd) - 1);
            if ddd < 1 || date.year() != jan_1.year() {
                return Err(DateTimeError::OutOfRange);
            }
            Ok(date)
        },
    }
}

fn fields_to_time(fields: iso8601::Time) -> Result<LocalTime, DateTimeError> {
    LocalTime::hms_ms(fields.hour as i8, fields.minute as i8, fields.second as i8, fields.millisecond as i16)
}


#[derive(PartialEq, Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("parsing resulted in an invalid date: {0}")]
    Date(#[from] DateTimeError),

    #[error("parsing resulted in an invalid offset: {0}")]
    Offset(#[from] OffsetError),

    #[error("parse error: {0}")]
    Parse(String),
}
