//! Dates, times, datetimes, months, and weekdays.

use std::cmp::Ordering;
use std::fmt;

use crate::cal::{DatePiece, TimePiece};
use crate::util::{split_cycles, RangeExt};

use self::Month::*;
use self::Weekday::*;


/// A single year.
///
/// This is just a wrapper around `i64` that performs year-related tests.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    ///
    /// ### Examples
    ///
    /// ```
    /// use date_facilities::cal::Year;
    ///
    /// assert_eq!(Year(2000).is_leap_year(), true);
    /// assert_eq!(Year(1900).is_leap_year(), false);
    /// ```
    pub fn is_leap_year(self) -> bool {
        self.0 % 400 == 0 || (self.0 % 4 == 0 && self.0 % 100 != 0)
    }

    /// The number of days in this year: 365, or 366 for a leap year.
    pub fn day_count(self) -> i64 {
        if self.is_leap_year() { 366 } else { 365 }
    }
}


/// Number of days in four hundred years, the length of a full Gregorian
/// cycle.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i64 = 365 * 100 + 24;

/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y:   i64 = 365 *   4 +  1;

/// Number of seconds in a day. Leap seconds are ignored.
pub(crate) const SECONDS_IN_DAY: i64 = 86400;

/// Number of days between **1st January, 1970** and **1st March, 2000**.
///
/// Counting years from the 1st of March puts the leap day at the very end
/// of every year, and 2000 is a multiple of 400, so splitting a day count
/// into years becomes plain division by the cycle lengths above.
const EPOCH_DIFFERENCE: i64 = 30 * 365   // 30 years between 2000 and 1970...
                            + 7          // plus seven days for leap years...
                            + 31 + 29;   // plus January and February 2000.

/// Days elapsed at the start of each month, in a year that starts in
/// March. February sits at the end, so its length never matters.
const MARCH_OFFSETS: [i64; 12] = [
      0,  31,  61,   // March, April, May
     92, 122, 153,   // June, July, August
    184, 214, 245,   // September, October, November
    275, 306, 337,   // December, January, February
];


/// Number of days since the Unix epoch of the given year, month, and day.
///
/// No validity checking happens here: the day is simply added to the
/// start of the month, so the 32nd of January is the 1st of February.
/// Returns `None` if the count doesn’t fit in an `i64`.
fn days_since_epoch(year: i64, month: Month, day: i64) -> Option<i64> {
    let months_from_march = (month.months_from_january() as i64 + 10) % 12;
    let march_year = if months_from_march >= 10 { year.checked_sub(1)? } else { year };

    let (num_400y_cycles, year_of_cycle) = split_cycles(march_year.checked_sub(2000)?, 400);
    let day_of_cycle = year_of_cycle * 365
                     + year_of_cycle / 4
                     - year_of_cycle / 100
                     + MARCH_OFFSETS[months_from_march as usize]
                     - 1;

    num_400y_cycles.checked_mul(DAYS_IN_400Y)?
                   .checked_add(day_of_cycle + EPOCH_DIFFERENCE)?
                   .checked_add(day)
}

/// Computes the weekday, given the number of days since the Unix epoch.
fn days_to_weekday(days: i64) -> Weekday {
    // The 1st of January 1970 was a Thursday.
    WEEKDAYS[(days.rem_euclid(7) + 4) as usize % 7]
}


/// A **local date** is a day-long span on the timeline, *without a time
/// zone*.
#[derive(Eq, Clone, Copy)]
pub struct LocalDate {
    year:    i64,
    month:   Month,
    day:     i8,
    yearday: i16,
    weekday: Weekday,
    days:    i64,
}

impl LocalDate {

    /// Creates a new local date instance from the given year, month, and day
    /// fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an error.
    ///
    /// ```rust
    /// use date_facilities::cal::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(LocalDate::ymd(2100, Month::February, 29).is_err());
    /// assert!(LocalDate::ymd(i64::MAX, Month::January, 1).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        if day < 1 || day > month.days_in_month(Year(year).is_leap_year()) {
            return Err(Error::OutOfRange);
        }

        days_since_epoch(year, month, i64::from(day))
            .map(Self::from_days_since_epoch)
            .ok_or(Error::OutOfRange)
    }

    /// Computes a date given the number of days since the Unix epoch.
    pub fn from_days_since_epoch(days: i64) -> Self {
        // Whole cycles come off first, so the shift to a March-based
        // count can’t overflow at either end of the range.
        let (outer_cycles, day_of_cycle) = split_cycles(days, DAYS_IN_400Y);
        let (shift, mut remainder) = split_cycles(day_of_cycle - EPOCH_DIFFERENCE, DAYS_IN_400Y);
        let num_400y_cycles = outer_cycles + shift;

        // The leap day at the end of the 400-year cycle makes the last
        // century one day longer, and the same goes for the last year in
        // each four-year cycle, hence the clamping.
        let num_100y_cycles = (remainder / DAYS_IN_100Y).min(3);
        remainder -= num_100y_cycles * DAYS_IN_100Y;

        let num_4y_cycles = remainder / DAYS_IN_4Y;
        remainder -= num_4y_cycles * DAYS_IN_4Y;

        let num_years = (remainder / 365).min(3);
        remainder -= num_years * 365;

        let march_year = 2000
                       + 400 * num_400y_cycles
                       + 100 * num_100y_cycles
                       +   4 * num_4y_cycles
                       + num_years;

        // `remainder` is now the number of days since the 1st of March.
        let months_from_march = MARCH_OFFSETS.iter()
                                             .rposition(|offset| *offset <= remainder)
                                             .unwrap_or(0);

        let day = remainder - MARCH_OFFSETS[months_from_march] + 1;
        let month = MONTHS[(months_from_march + 2) % 12];
        let year = if months_from_march >= 10 { march_year + 1 } else { march_year };

        let leap_day = if Year(year).is_leap_year() && month >= March { 1 } else { 0 };

        Self {
            year,
            month,
            day:     day as i8,
            yearday: month.days_before_start() + leap_day + day as i16,
            weekday: days_to_weekday(days),
            days,
        }
    }

    /// Returns the number of days between the Unix epoch and this date.
    pub fn days_since_epoch(&self) -> i64 {
        self.days
    }
}

impl DatePiece for LocalDate {
    fn year(&self) -> i64 { self.year }
    fn month(&self) -> Month { self.month }
    fn day(&self) -> i8 { self.day }
    fn yearday(&self) -> i16 { self.yearday }
    fn weekday(&self) -> Weekday { self.weekday }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.year.is_within(0 .. 10000) {
            write!(f, "LocalDate({:04}-{:02}-{:02})", self.year, self.month as i8, self.day)
        }
        else {
            write!(f, "LocalDate({:+05}-{:02}-{:02})", self.year, self.month as i8, self.day)
        }
    }
}

impl PartialEq for LocalDate {
    fn eq(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }
}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}


/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalTime {
    hour:   i8,
    minute: i8,
    second: i8,
    millisecond: i16,
}

impl LocalTime {

    /// Computes the number of hours, minutes, and seconds, based on the
    /// number of seconds that have elapsed since midnight.
    pub fn from_seconds_and_milliseconds_since_midnight(seconds: i64, millisecond_of_second: i16) -> Self {
        Self {
            hour:   (seconds / 60 / 60) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            millisecond: millisecond_of_second,
        }
    }

    /// Returns the time at midnight, with all fields initialised to 0.
    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    /// Creates a new timestamp instance with the given hour, minute, and
    /// second fields. The millisecond field is set to 0.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, second, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute,
    /// second, and millisecond fields.
    pub fn hms_ms(hour: i8, minute: i8, second: i8, millisecond: i16) -> Result<Self, Error> {
        if hour.is_within(0..24)   && minute.is_within(0..60)
        && second.is_within(0..60) && millisecond.is_within(0..1000)
        {
            Ok(Self { hour, minute, second, millisecond })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Calculate the number of seconds since midnight this time is at,
    /// ignoring milliseconds.
    pub fn to_seconds(self) -> i64 {
        i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn millisecond(&self) -> i16 { self.millisecond }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalTime({:02}:{:02}:{:02}.{:03})", self.hour, self.minute, self.second, self.millisecond)
    }
}


/// A **local date-time** is an exact instant on the timeline, *without a
/// time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

impl LocalDateTime {

    /// Creates a new local date time from a local date and a local time.
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// Computes a complete date-time based on the number of seconds that
    /// have elapsed since **midnight, 1st January, 1970**.
    pub fn at_ms(seconds_since_1970_epoch: i64, millisecond_of_second: i16) -> Self {
        let (days, secs) = split_cycles(seconds_since_1970_epoch, SECONDS_IN_DAY);

        Self {
            date: LocalDate::from_days_since_epoch(days),
            time: LocalTime::from_seconds_and_milliseconds_since_midnight(secs, millisecond_of_second),
        }
    }

    /// Builds a date-time out of raw field values, rolling any that
    /// overflow into the next larger field: month 13 is January of the
    /// following year, the 30th of February is early March, and hour 24
    /// is midnight the next day. Negative values roll backwards.
    ///
    /// Returns `None` when the result is too far from the epoch to count
    /// its seconds in an `i64`.
    pub fn rolled_over(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, millisecond: i64) -> Option<Self> {
        let (extra_years, month_index) = split_cycles(month.checked_sub(1)?, 12);
        let first_of_month = days_since_epoch(year.checked_add(extra_years)?, MONTHS[month_index as usize], 1)?;
        let days = first_of_month.checked_add(day.checked_sub(1)?)?;

        let (extra_seconds, millisecond) = split_cycles(millisecond, 1000);
        let seconds = days.checked_mul(SECONDS_IN_DAY)?
                          .checked_add(hour.checked_mul(3600)?)?
                          .checked_add(minute.checked_mul(60)?)?
                          .checked_add(second)?
                          .checked_add(extra_seconds)?;

        Some(Self::at_ms(seconds, millisecond as i16))
    }

    /// Builds a date-time out of raw field values, refusing any value
    /// outside its calendar range.
    pub fn checked(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, millisecond: i64) -> Result<Self, Error> {
        let month = Month::from_one(narrow(month)?)?;
        let date = LocalDate::ymd(year, month, narrow(day)?)?;
        let millisecond = i16::try_from(millisecond).map_err(|_| Error::OutOfRange)?;
        let time = LocalTime::hms_ms(narrow(hour)?, narrow(minute)?, narrow(second)?, millisecond)?;
        Ok(Self::new(date, time))
    }

    /// Returns the date portion of this date-time stamp.
    pub fn date(&self) -> LocalDate {
        self.date
    }

    /// Returns the time portion of this date-time stamp.
    pub fn time(&self) -> LocalTime {
        self.time
    }

    /// The number of seconds between the Unix epoch and this date-time,
    /// reading it as though it were in UTC. Milliseconds are ignored.
    /// `None` for dates too far out to count in seconds.
    pub fn to_epoch_seconds(&self) -> Option<i64> {
        self.date.days.checked_mul(SECONDS_IN_DAY)?
                      .checked_add(self.time.to_seconds())
    }
}

fn narrow(value: i64) -> Result<i8, Error> {
    i8::try_from(value).map_err(|_| Error::OutOfRange)
}

impl DatePiece for LocalDateTime {
    fn year(&self) -> i64 { self.date.year }
    fn month(&self) -> Month { self.date.month }
    fn day(&self) -> i8 { self.date.day }
    fn yearday(&self) -> i16 { self.date.yearday }
    fn weekday(&self) -> Weekday { self.date.weekday }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn millisecond(&self) -> i16 { self.time.millisecond }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (d, t) = (&self.date, &self.time);
        write!(f, "LocalDateTime({:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03})",
               d.year, d.month as i8, d.day, t.hour, t.minute, t.second, t.millisecond)
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone, thiserror::Error)]
pub enum Error {
    #[error("datetime field out of range")]
    OutOfRange,
}


/// A month of the year, starting with January, and ending with December.
///
/// This is 1-indexed, so January becomes 1 when you use `as i8`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

static MONTHS: [Month; 12] = [
    January,  February,  March,
    April,    May,       June,
    July,     August,    September,
    October,  November,  December,
];

#[allow(clippy::match_same_arms)]
impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            January   => 31, February  => if leap_year { 29 } else { 28 },
            March     => 31, April     => 30,
            May       => 31, June      => 30,
            July      => 31, August    => 31,
            September => 30, October   => 31,
            November  => 30, December  => 31,
        }
    }

    /// Returns the number of days that have elapsed in a year *before* this
    /// month begins, with no leap year check.
    fn days_before_start(self) -> i16 {
        match self {
            January =>   0, February =>  31, March     =>  59,
            April   =>  90, May      => 120, June      => 151,
            July    => 181, August   => 212, September => 243,
            October => 273, November => 304, December  => 334,
        }
    }

    pub fn months_from_january(self) -> usize {
        self as usize - 1
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```rust
    /// use date_facilities::cal::Month;
    /// assert_eq!(Month::from_one(5), Ok(Month::May));
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self, Error> {
        if month.is_within(1..13) { Ok(MONTHS[month as usize - 1]) }
                             else { Err(Error::OutOfRange) }
    }
}


/// A named day of the week.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

static WEEKDAYS: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

// Weekdays deliberately have no Ord instance: there’s no agreement on
// whether the week starts on Sunday or Monday.

impl Weekday {

    /// Sunday is 0, Saturday is 6.
    pub fn days_from_sunday(self) -> usize {
        self as usize
    }

    /// Monday is 1, Sunday is 7, as in ISO-8601.
    pub fn days_from_monday_as_one(self) -> i8 {
        match self {
            Sunday => 7,
            other  => other as i8,
        }
    }

    /// Return the weekday based on a number, with Sunday as Day 0, Monday as
    /// Day 1, and so on.
    ///
    /// ```rust
    /// use date_facilities::cal::Weekday;
    /// assert_eq!(Weekday::from_zero(4), Ok(Weekday::Thursday));
    /// assert!(Weekday::from_zero(7).is_err());
    /// ```
    pub fn from_zero(weekday: i8) -> Result<Self, Error> {
        if weekday.is_within(0..7) { Ok(WEEKDAYS[weekday as usize]) }
                              else { Err(Error::OutOfRange) }
    }
}
