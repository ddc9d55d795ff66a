//! Reading date-times back out of text, field by field.
//!
//! Whatever the pattern doesn’t mention is filled in from the 1st of
//! January 2000 at midnight. Weekday names are checked for being names,
//! then ignored.

use log::trace;

use crate::cal::{LocalDateTime, Year};
use crate::context::Locale;
use crate::format::custom::{DateFormat, Field, NumArguments};
use crate::format::{ParseError, Pos};


/// The longest run of digits read for a single field.
const MAX_DIGITS: usize = 18;


impl<'a> DateFormat<'a> {

    /// Parses the whole of `input` against this pattern.
    ///
    /// When `lenient` is set, numbers outside their field’s range roll
    /// over into the next field and surrounding whitespace is ignored;
    /// otherwise out-of-range values are an error.
    pub fn scan(&self, input: &str, locale: &Locale, lenient: bool) -> Result<LocalDateTime, ParseError> {
        let input = if lenient { input.trim() } else { input };
        let mut scanner = Scanner { input, pos: 0 };
        let mut parsed = Parsed::default();

        for (index, field) in self.fields.iter().enumerate() {
            let adjacent = self.fields.get(index + 1).map_or(false, Field::is_numeric);
            let exact = |a: NumArguments| if adjacent { Some(a.width) } else { None };

            match *field {
                Field::Literal(s)          => scanner.literal(s)?,
                Field::Year(a)             => parsed.year = Some(scanner.number(exact(a), true)?),
                Field::YearOfCentury       => parsed.year = Some(2000 + scanner.number(Some(2), false)?),
                Field::Month(a)            => parsed.month = Some(scanner.number(exact(a), false)?),
                Field::MonthName(_)        => parsed.month = Some(scanner.month_name(locale)? as i64 + 1),
                Field::Day(a)              => parsed.day = Some(scanner.number(exact(a), false)?),
                Field::DayOfYear(a)        => parsed.yearday = Some(scanner.number(exact(a), false)?),
                Field::WeekdayName(_)      => { let _ = scanner.weekday_name(locale)?; },
                Field::Hour(a)             => parsed.hour = Some(scanner.number(exact(a), false)?),
                Field::Hour12(a)           => parsed.hour12 = Some(scanner.number(exact(a), false)?),
                Field::Minute(a)           => parsed.minute = Some(scanner.number(exact(a), false)?),
                Field::Second(a)           => parsed.second = Some(scanner.number(exact(a), false)?),
                Field::Fraction(digits)    => {
                    let start = scanner.pos;
                    let value = scanner.number(if adjacent { Some(digits) } else { None }, false)?;
                    parsed.millisecond = Some(fraction_to_millis(value, scanner.pos - start));
                },
                Field::DayPeriod           => parsed.pm = Some(scanner.day_period(locale)?),
            }
        }

        if scanner.pos < input.len() {
            return Err(ParseError::TrailingInput { pos: scanner.pos });
        }

        trace!("Scanned {:?} into {:?}", input, parsed);
        parsed.resolve(lenient)
    }
}

/// Scales a fraction with this many digits into milliseconds, dropping
/// anything finer.
fn fraction_to_millis(value: i64, digits: usize) -> i64 {
    match digits {
        0 ..= 3  => value * 10_i64.pow(3 - digits as u32),
        _        => value / 10_i64.pow(digits as u32 - 3),
    }
}


struct Scanner<'i> {
    input: &'i str,
    pos:   Pos,
}

impl<'i> Scanner<'i> {
    fn rest(&self) -> &'i str {
        &self.input[self.pos ..]
    }

    /// Whether the input continues with this text, ignoring ASCII case.
    fn starts_with(&self, text: &str) -> bool {
        self.rest().get(.. text.len())
                   .map_or(false, |s| !text.is_empty() && s.eq_ignore_ascii_case(text))
    }

    fn literal(&mut self, text: &str) -> Result<(), ParseError> {
        if self.starts_with(text) {
            self.pos += text.len();
            Ok(())
        }
        else {
            Err(ParseError::Expected { expected: text.to_owned(), pos: self.pos })
        }
    }

    /// Reads a number. With an exact width, exactly that many digits are
    /// read; otherwise as many as there are.
    fn number(&mut self, exact: Option<usize>, signed: bool) -> Result<i64, ParseError> {
        let start = self.pos;
        let negative = signed && self.rest().starts_with('-');
        let digits_start = if negative { start + 1 } else { start };

        let available = self.input[digits_start ..].bytes()
                                                   .take_while(u8::is_ascii_digit)
                                                   .count();

        let count = match exact {
            Some(width) if available < width => return Err(ParseError::ExpectedNumber { pos: start }),
            Some(width)                      => width,
            None if available == 0           => return Err(ParseError::ExpectedNumber { pos: start }),
            None                             => available,
        };

        if count > MAX_DIGITS {
            return Err(ParseError::OutOfRange);
        }

        let digits = &self.input[digits_start .. digits_start + count];
        let value: i64 = digits.parse().map_err(|_| ParseError::ExpectedNumber { pos: start })?;
        self.pos = digits_start + count;

        Ok(if negative { -value } else { value })
    }

    /// Matches the longest of the given names, returning its index.
    fn longest_name<'n, I>(&mut self, names: I) -> Result<usize, ParseError>
    where I: IntoIterator<Item=(usize, &'n str)>
    {
        let best = names.into_iter()
                        .filter(|(_, name)| self.starts_with(name))
                        .max_by_key(|(_, name)| name.len());

        match best {
            Some((index, name)) => {
                self.pos += name.len();
                Ok(index)
            },
            None => Err(ParseError::UnknownName { pos: self.pos }),
        }
    }

    /// Either the long or the short name is accepted, whichever the
    /// pattern asked for.
    fn month_name(&mut self, locale: &Locale) -> Result<usize, ParseError> {
        let names = (0 .. 12).flat_map(|m| [(m, locale.long_month_name(m)), (m, locale.short_month_name(m))]);
        self.longest_name(names)
    }

    fn weekday_name(&mut self, locale: &Locale) -> Result<usize, ParseError> {
        let names = (0 .. 7).flat_map(|d| [(d, locale.long_day_name(d)), (d, locale.short_day_name(d))]);
        self.longest_name(names)
    }

    /// Returns whether the marker was the afternoon one.
    fn day_period(&mut self, locale: &Locale) -> Result<bool, ParseError> {
        let index = self.longest_name([(0, locale.day_period(true)), (1, locale.day_period(false))])?;
        Ok(index == 1)
    }
}


/// Field values as they were read, before being checked or rolled over.
#[derive(Default, Debug)]
struct Parsed {
    year:        Option<i64>,
    month:       Option<i64>,
    day:         Option<i64>,
    yearday:     Option<i64>,
    hour:        Option<i64>,
    hour12:      Option<i64>,
    minute:      Option<i64>,
    second:      Option<i64>,
    millisecond: Option<i64>,
    pm:          Option<bool>,
}

impl Parsed {
    fn resolve(&self, lenient: bool) -> Result<LocalDateTime, ParseError> {
        let year = self.year.unwrap_or(2000);

        // A day of the year only counts when there’s no month or day.
        let (month, day) = match (self.month, self.day, self.yearday) {
            (None, None, Some(yearday)) => {
                if !lenient && !(1 ..= Year(year).day_count()).contains(&yearday) {
                    return Err(ParseError::OutOfRange);
                }
                (1, yearday)
            },
            (month, day, _) => (month.unwrap_or(1), day.unwrap_or(1)),
        };

        let hour = match (self.hour, self.hour12) {
            (Some(hour), _)       => hour,
            (None, Some(hour12))  => {
                if !lenient && !(1 ..= 12).contains(&hour12) {
                    return Err(ParseError::OutOfRange);
                }
                let hour = if hour12 == 12 { 0 } else { hour12 };
                if self.pm == Some(true) { hour + 12 } else { hour }
            },
            (None, None)          => if self.pm == Some(true) { 12 } else { 0 },
        };

        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        let millisecond = self.millisecond.unwrap_or(0);

        if lenient {
            LocalDateTime::rolled_over(year, month, day, hour, minute, second, millisecond)
                .ok_or(ParseError::OutOfRange)
        }
        else {
            LocalDateTime::checked(year, month, day, hour, minute, second, millisecond)
                .map_err(|_| ParseError::OutOfRange)
        }
    }
}
