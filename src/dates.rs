//! Formatting, parsing, and calendar questions about instants.
//!
//! Every operation is a method on `FormattingContext`, and also a free
//! function of the same name that uses whatever the defaults are at the
//! moment it’s called.
//!
//! ```rust
//! use date_facilities::{dates, FormatPattern};
//!
//! let text = dates::convert("2024-03-15", FormatPattern::DEFAULT_SERVER_DATE, FormatPattern::UI_DATE_FORMAT);
//! assert_eq!(text.as_deref(), Some("15/03/2024"));
//! ```

use std::cmp::Ordering;

use log::debug;

use crate::cal::{Component, DateComponents};
use crate::catalog::FormatPattern;
use crate::context::{defaults, Formatter, FormattingContext};
use crate::error::Error;
use crate::instant::Instant;


impl FormattingContext {

    /// Renders an instant with one of the named patterns. This can’t fail.
    pub fn format(&self, instant: Instant, pattern: FormatPattern) -> String {
        self.formatter(pattern).format(instant)
    }

    pub fn format_optional(&self, instant: Option<Instant>, pattern: FormatPattern) -> Option<String> {
        instant.map(|i| self.format(i, pattern))
    }

    /// Reads text written in one of the named patterns, returning `None`
    /// if it doesn’t match.
    pub fn parse(&self, text: &str, pattern: FormatPattern) -> Option<Instant> {
        self.try_parse(text, pattern).ok()
    }

    /// Reads text in one pattern and writes it back out in another.
    pub fn convert(&self, text: &str, from: FormatPattern, to: FormatPattern) -> Option<String> {
        self.parse(text, from).map(|instant| self.format(instant, to))
    }

    /// How many whole years old someone born at the given date is today.
    pub fn age_in_years(&self, birth_date: &str, pattern: FormatPattern) -> Result<String, Error> {
        self.age_in_years_at(birth_date, pattern, Instant::now())
    }

    /// How many whole years old someone born at the given date is at
    /// `now`, counted by calendar fields: the birthday has to have been
    /// reached for the last year to count.
    pub fn age_in_years_at(&self, birth_date: &str, pattern: FormatPattern, now: Instant) -> Result<String, Error> {
        let birth = self.try_parse(birth_date, pattern)?;
        let years = self.calendar().years_between(birth, now);
        Ok(years.to_string())
    }

    /// The requested components of an instant. Nothing else is filled in.
    pub fn date_components<I>(&self, components: I, instant: Instant) -> DateComponents
    where I: IntoIterator<Item=Component>
    {
        self.calendar().components(components, instant)
    }

    /// Compares two instants by the day they fall on, so any two times on
    /// the same day are equal.
    pub fn compare_dates(&self, a: Instant, b: Instant) -> Ordering {
        self.calendar().compare(a, b, Component::Day)
    }

    /// Whether `target` lies between `start` and `end`, both included.
    ///
    /// Without time components, all three are moved to the start of
    /// their day first. A range whose start comes after its end is taken
    /// as it is: only its two endpoints are in it.
    pub fn is_date_in_range(&self, target: Instant, start: Instant, end: Instant, include_time_components: bool) -> bool {
        let (target, start, end) = if include_time_components {
            (target, start, end)
        }
        else {
            (self.zero_out_time(target), self.zero_out_time(start), self.zero_out_time(end))
        };

        target == start || target == end || (start < target && target < end)
    }

    /// `is_date_in_range` with the time components included.
    pub fn is_date_in_range_with_time(&self, target: Instant, start: Instant, end: Instant) -> bool {
        self.is_date_in_range(target, start, end, true)
    }

    /// The instant at the start of the same day, with the hour, minute,
    /// second, and fraction of a second all zero.
    pub fn zero_out_time(&self, instant: Instant) -> Instant {
        let parts = self.date_components([Component::Hour, Component::Minute, Component::Second], instant);
        let since_midnight = parts.hour().unwrap_or(0) * 3600
                           + parts.minute().unwrap_or(0) * 60
                           + parts.second().unwrap_or(0);

        instant.plus_seconds(-since_midnight).truncated_to_second()
    }

    fn try_parse(&self, text: &str, pattern: FormatPattern) -> Result<Instant, Error> {
        self.formatter(pattern).parse(text).map_err(|source| {
            debug!("Failed to parse {:?} as {}: {}", text, pattern.name(), source);
            Error::Parse { text: text.to_owned(), pattern, source }
        })
    }
}


pub fn format(instant: Instant, pattern: FormatPattern) -> String {
    defaults().format(instant, pattern)
}

pub fn format_optional(instant: Option<Instant>, pattern: FormatPattern) -> Option<String> {
    defaults().format_optional(instant, pattern)
}

/// Renders an instant with a formatter the caller has already set up,
/// ignoring the defaults.
pub fn format_with(instant: Instant, formatter: &Formatter<'_>) -> String {
    formatter.format(instant)
}

pub fn format_optional_with(instant: Option<Instant>, formatter: &Formatter<'_>) -> Option<String> {
    instant.map(|i| formatter.format(i))
}

pub fn parse(text: &str, pattern: FormatPattern) -> Option<Instant> {
    defaults().parse(text, pattern)
}

pub fn convert(text: &str, from: FormatPattern, to: FormatPattern) -> Option<String> {
    defaults().convert(text, from, to)
}

pub fn age_in_years(birth_date: &str, pattern: FormatPattern) -> Result<String, Error> {
    defaults().age_in_years(birth_date, pattern)
}

pub fn age_in_years_at(birth_date: &str, pattern: FormatPattern, now: Instant) -> Result<String, Error> {
    defaults().age_in_years_at(birth_date, pattern, now)
}

pub fn date_components<I>(components: I, instant: Instant) -> DateComponents
where I: IntoIterator<Item=Component>
{
    defaults().date_components(components, instant)
}

pub fn compare_dates(a: Instant, b: Instant) -> Ordering {
    defaults().compare_dates(a, b)
}

pub fn is_date_in_range(target: Instant, start: Instant, end: Instant, include_time_components: bool) -> bool {
    defaults().is_date_in_range(target, start, end, include_time_components)
}

pub fn is_date_in_range_with_time(target: Instant, start: Instant, end: Instant) -> bool {
    defaults().is_date_in_range_with_time(target, start, end)
}

pub fn zero_out_time(instant: Instant) -> Instant {
    defaults().zero_out_time(instant)
}
