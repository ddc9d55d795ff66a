//! Calendars: reading fields out of instants, comparing instants at a
//! chosen granularity, and field-wise arithmetic.
//!
//! A `Calendar` is a calendar system paired with the time zone whose wall
//! clock it reads. Both supported systems share Gregorian arithmetic; they
//! only differ in how weeks are numbered.

use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

use crate::cal::datetime::{LocalDate, LocalDateTime, Weekday, Year, SECONDS_IN_DAY};
use crate::cal::offset::Offset;
use crate::cal::{DatePiece, TimePiece};
use crate::instant::Instant;


/// The calendar systems a `Calendar` can follow.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub enum CalendarIdentifier {

    /// The Gregorian calendar with United States week rules: weeks start
    /// on Sunday, and the week containing the 1st of January is week 1.
    #[default]
    Gregorian,

    /// The ISO-8601 calendar: weeks start on Monday, and week 1 is the
    /// first week with at least four days in the new year.
    Iso8601,
}

impl CalendarIdentifier {
    pub fn name(self) -> &'static str {
        match self {
            CalendarIdentifier::Gregorian  => "gregorian",
            CalendarIdentifier::Iso8601    => "iso8601",
        }
    }
}

impl fmt::Display for CalendarIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarIdentifier {
    type Err = UnknownCalendar;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "gregorian"            => Ok(CalendarIdentifier::Gregorian),
            "iso8601" | "iso-8601" => Ok(CalendarIdentifier::Iso8601),
            _                      => Err(UnknownCalendar(input.to_owned())),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
#[error("unknown calendar identifier {0:?}")]
pub struct UnknownCalendar(pub String);


/// A field that can be read out of an instant by a `Calendar`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Component {

    /// 1 for years from 1 onwards, 0 for the year 0 and earlier.
    Era,

    /// The proleptic Gregorian year, where 1 BCE is the year 0.
    Year,

    /// 1 to 12.
    Month,

    /// Day of the month, 1 to 31.
    Day,

    Hour,
    Minute,
    Second,
    Millisecond,

    /// Day of the week, with Sunday as 1 and Saturday as 7.
    Weekday,

    /// Day of the year, 1 to 366.
    DayOfYear,

    /// Week of the year, numbered by the calendar’s week rules.
    WeekOfYear,

    /// 1 to 4.
    Quarter,
}


/// The components requested from `Calendar::components`, and only those.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct DateComponents {
    values: BTreeMap<Component, i64>,
}

impl DateComponents {

    /// The value of the given component, if it was requested.
    pub fn get(&self, component: Component) -> Option<i64> {
        self.values.get(&component).copied()
    }

    pub fn contains(&self, component: Component) -> bool {
        self.values.contains_key(&component)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=(Component, i64)> + '_ {
        self.values.iter().map(|(c, v)| (*c, *v))
    }

    pub fn year(&self) -> Option<i64>    { self.get(Component::Year) }
    pub fn month(&self) -> Option<i64>   { self.get(Component::Month) }
    pub fn day(&self) -> Option<i64>     { self.get(Component::Day) }
    pub fn hour(&self) -> Option<i64>    { self.get(Component::Hour) }
    pub fn minute(&self) -> Option<i64>  { self.get(Component::Minute) }
    pub fn second(&self) -> Option<i64>  { self.get(Component::Second) }
    pub fn weekday(&self) -> Option<i64> { self.get(Component::Weekday) }
}

impl IntoIterator for DateComponents {
    type Item = (Component, i64);
    type IntoIter = btree_map::IntoIter<Component, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}


/// A calendar system reading the wall clock of a fixed-offset time zone.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct Calendar {
    identifier: CalendarIdentifier,
    time_zone: Offset,
}

impl Calendar {
    pub fn new(identifier: CalendarIdentifier, time_zone: Offset) -> Self {
        Self { identifier, time_zone }
    }

    /// The Gregorian calendar in UTC.
    pub fn gregorian() -> Self {
        Self::new(CalendarIdentifier::Gregorian, Offset::utc())
    }

    pub fn identifier(&self) -> CalendarIdentifier {
        self.identifier
    }

    pub fn time_zone(&self) -> Offset {
        self.time_zone
    }

    /// The day each week starts on.
    pub fn first_weekday(&self) -> Weekday {
        match self.identifier {
            CalendarIdentifier::Gregorian  => Weekday::Sunday,
            CalendarIdentifier::Iso8601    => Weekday::Monday,
        }
    }

    /// How many days of the new year the first week needs to have.
    pub fn minimum_days_in_first_week(&self) -> i64 {
        match self.identifier {
            CalendarIdentifier::Gregorian  => 1,
            CalendarIdentifier::Iso8601    => 4,
        }
    }

    /// The wall-clock reading of this calendar’s time zone.
    pub fn local(&self, instant: Instant) -> LocalDateTime {
        self.time_zone.to_local(instant)
    }

    /// Reads a single component out of the instant.
    pub fn component(&self, component: Component, instant: Instant) -> i64 {
        self.read(component, &self.local(instant))
    }

    /// Reads every requested component out of the instant. Components
    /// that weren’t asked for are absent from the result, not zero.
    pub fn components<I>(&self, components: I, instant: Instant) -> DateComponents
    where I: IntoIterator<Item=Component>
    {
        let local = self.local(instant);
        let values = components.into_iter()
                               .map(|c| (c, self.read(c, &local)))
                               .collect();
        DateComponents { values }
    }

    fn read(&self, component: Component, local: &LocalDateTime) -> i64 {
        match component {
            Component::Era          => if local.year() > 0 { 1 } else { 0 },
            Component::Year         => local.year(),
            Component::Month        => local.month() as i64,
            Component::Day          => i64::from(local.day()),
            Component::Hour         => i64::from(local.hour()),
            Component::Minute       => i64::from(local.minute()),
            Component::Second       => i64::from(local.second()),
            Component::Millisecond  => i64::from(local.millisecond()),
            Component::Weekday      => local.weekday().days_from_sunday() as i64 + 1,
            Component::DayOfYear    => i64::from(local.yearday()),
            Component::WeekOfYear   => self.week_of_year(&local.date()),
            Component::Quarter      => local.month().months_from_january() as i64 / 3 + 1,
        }
    }

    /// Numbers the week containing the date. Days before the first week
    /// belong to the last week of the previous year, and days in a week
    /// that counts as next year’s first week are week 1.
    fn week_of_year(&self, date: &LocalDate) -> i64 {
        let yearday = i64::from(date.yearday());
        let weekday = self.days_from_first_weekday(date.weekday());
        let jan_1 = (weekday - (yearday - 1)).rem_euclid(7);

        let first_week_start = self.first_week_start(jan_1);
        if yearday < first_week_start {
            let dec_31 = LocalDate::from_days_since_epoch(date.days_since_epoch() - yearday);
            return self.week_of_year(&dec_31);
        }

        let days_in_year = Year(date.year()).day_count();
        let next_jan_1 = (jan_1 + days_in_year).rem_euclid(7);
        if yearday >= days_in_year + self.first_week_start(next_jan_1) {
            return 1;
        }

        (yearday - first_week_start) / 7 + 1
    }

    /// The day of the year on which week 1 begins, given where the 1st of
    /// January falls in the week. This can be zero or negative, when
    /// week 1 starts in December.
    fn first_week_start(&self, jan_1: i64) -> i64 {
        if 7 - jan_1 >= self.minimum_days_in_first_week() { 1 - jan_1 }
                                                     else { 8 - jan_1 }
    }

    fn days_from_first_weekday(&self, weekday: Weekday) -> i64 {
        let first = self.first_weekday().days_from_sunday() as i64;
        (weekday.days_from_sunday() as i64 - first).rem_euclid(7)
    }

    /// Compares two instants, ignoring every field smaller than the given
    /// granularity.
    pub fn compare(&self, a: Instant, b: Instant, granularity: Component) -> Ordering {
        if granularity == Component::Era {
            return self.component(Component::Era, a).cmp(&self.component(Component::Era, b));
        }

        self.truncated(a, granularity).cmp(&self.truncated(b, granularity))
    }

    /// The wall-clock fields of the instant, largest first, with every
    /// field below the granularity zeroed. Both instants being compared
    /// are read in the same zone, so these sort the way the instants do.
    fn truncated(&self, instant: Instant, granularity: Component) -> [i64; 7] {
        let local = self.local(instant);
        let (y, m, d) = (local.year(), local.month() as i64, i64::from(local.day()));
        let (h, min, s) = (i64::from(local.hour()), i64::from(local.minute()), i64::from(local.second()));

        match granularity {
            Component::Era | Component::Year  => [y, 0, 0, 0, 0, 0, 0],
            Component::Quarter                => [y, (m - 1) / 3, 0, 0, 0, 0, 0],
            Component::Month                  => [y, m, 0, 0, 0, 0, 0],
            Component::WeekOfYear             => {
                let back = self.days_from_first_weekday(local.weekday());
                let start = LocalDate::from_days_since_epoch(local.date().days_since_epoch() - back);
                [start.year(), start.month() as i64, i64::from(start.day()), 0, 0, 0, 0]
            },
            Component::Day | Component::Weekday | Component::DayOfYear
                                              => [y, m, d, 0, 0, 0, 0],
            Component::Hour                   => [y, m, d, h, 0, 0, 0],
            Component::Minute                 => [y, m, d, h, min, 0, 0],
            Component::Second                 => [y, m, d, h, min, s, 0],
            Component::Millisecond            => [y, m, d, h, min, s, i64::from(local.millisecond())],
        }
    }

    /// Adds a number of the given component to the instant.
    ///
    /// Years, quarters, and months move the calendar fields and clamp the
    /// day to the end of a shorter month; everything else is a fixed
    /// number of seconds. Eras can’t be added to, so they return `None`,
    /// as does anything that lands outside the range of instants.
    pub fn date_by_adding(&self, component: Component, value: i64, instant: Instant) -> Option<Instant> {
        let seconds = match component {
            Component::Era          => return None,
            Component::Year         => return self.add_months(value.checked_mul(12)?, instant),
            Component::Quarter      => return self.add_months(value.checked_mul(3)?, instant),
            Component::Month        => return self.add_months(value, instant),
            Component::WeekOfYear   => value.checked_mul(7 * SECONDS_IN_DAY)?,
            Component::Day | Component::Weekday | Component::DayOfYear
                                    => value.checked_mul(SECONDS_IN_DAY)?,
            Component::Hour         => value.checked_mul(3600)?,
            Component::Minute       => value.checked_mul(60)?,
            Component::Second       => value,
            Component::Millisecond  => {
                let milliseconds = i64::from(instant.milliseconds()).checked_add(value)?;
                return Instant::checked_at_ms(instant.seconds(), milliseconds);
            },
        };

        instant.checked_plus_seconds(seconds)
    }

    fn add_months(&self, months: i64, instant: Instant) -> Option<Instant> {
        let local = self.local(instant);
        let month = (local.month() as i64).checked_add(months)?;

        // Find the length of the target month by rolling to its first day.
        let first = LocalDateTime::rolled_over(local.year(), month, 1, 0, 0, 0, 0)?;
        let last_day = first.month().days_in_month(Year(first.year()).is_leap_year());
        let day = local.day().min(last_day);

        let moved = LocalDateTime::rolled_over(
            first.year(), first.month() as i64, i64::from(day),
            i64::from(local.hour()), i64::from(local.minute()), i64::from(local.second()),
            i64::from(local.millisecond()))?;

        self.time_zone.to_instant(moved)
    }

    /// The number of whole years between two instants. The difference of
    /// the year fields counts unless adding that many years to `from`,
    /// the way `date_by_adding` does, goes past `to`; then it’s one
    /// fewer. A birthday on the 29th of February is reached on the 28th
    /// in other years. Negative when `to` comes before `from`.
    pub fn years_between(&self, from: Instant, to: Instant) -> i64 {
        if to < from {
            return -self.years_between(to, from);
        }

        let years = self.local(to).year() - self.local(from).year();
        match self.date_by_adding(Component::Year, years, from) {
            Some(anniversary) if anniversary <= to  => years,
            _                                       => years - 1,
        }
    }
}
