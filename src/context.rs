//! Formatting contexts, and the process-wide default one.
//!
//! Every operation that renders or reads text needs a locale, a time
//! zone, a calendar, and a leniency setting. Those travel together as a
//! `FormattingContext`, an immutable value. Operations that aren’t handed
//! one read the **defaults**: a single shared context that is replaced
//! whole, never edited in place, so a reader always sees one consistent
//! set of values.
//!
//! ```rust
//! use date_facilities::{context, Offset};
//!
//! context::set_default_time_zone(Offset::of_hours_and_minutes(5, 30).unwrap());
//! assert_eq!(context::default_time_zone().seconds_from_utc(), 19_800);
//! context::reset_defaults();
//! ```

use std::sync::Arc;

use log::{debug, trace};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::cal::{Calendar, CalendarIdentifier, Offset};
use crate::catalog::FormatPattern;
use crate::format::{DateFormat, FormatError, ParseError};
use crate::instant::Instant;


/// The identifier of the locale every context starts out with.
pub const POSIX_LOCALE: &str = "en_US_POSIX";


/// The names a locale gives to months, weekdays, and the two halves of
/// the day.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Locale {
    identifier:   String,
    long_months:  Vec<String>,
    short_months: Vec<String>,
    long_days:    Vec<String>,
    short_days:   Vec<String>,
    am:           String,
    pm:           String,
}

impl Locale {

    /// The fixed, English, POSIX locale.
    pub fn posix() -> Self {
        Self::from_time(POSIX_LOCALE, &locale::Time::english())
    }

    /// A locale using the month and weekday names of a `locale::Time`
    /// table. The day periods start out as `AM` and `PM`.
    pub fn from_time(identifier: impl Into<String>, time: &locale::Time) -> Self {
        Self {
            identifier:   identifier.into(),
            long_months:  (0 .. 12).map(|m| time.long_month_name(m)).collect(),
            short_months: (0 .. 12).map(|m| time.short_month_name(m)).collect(),
            long_days:    (0 .. 7).map(|d| time.long_day_name(d)).collect(),
            short_days:   (0 .. 7).map(|d| time.short_day_name(d)).collect(),
            am:           "AM".to_owned(),
            pm:           "PM".to_owned(),
        }
    }

    pub fn with_day_periods(self, am: impl Into<String>, pm: impl Into<String>) -> Self {
        Self { am: am.into(), pm: pm.into(), ..self }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn long_month_name(&self, months_from_january: usize) -> &str {
        &self.long_months[months_from_january]
    }

    pub fn short_month_name(&self, months_from_january: usize) -> &str {
        &self.short_months[months_from_january]
    }

    pub fn long_day_name(&self, days_from_sunday: usize) -> &str {
        &self.long_days[days_from_sunday]
    }

    pub fn short_day_name(&self, days_from_sunday: usize) -> &str {
        &self.short_days[days_from_sunday]
    }

    /// The marker for the morning, or for the afternoon.
    pub fn day_period(&self, morning: bool) -> &str {
        if morning { &self.am } else { &self.pm }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::posix()
    }
}


/// Everything needed to turn instants into text and back.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FormattingContext {
    pub locale:     Locale,
    pub time_zone:  Offset,
    pub calendar_identifier: CalendarIdentifier,
    pub lenient:    bool,
}

impl FormattingContext {

    /// The POSIX locale in UTC with the Gregorian calendar, parsing
    /// leniently.
    pub fn posix() -> Self {
        Self {
            locale:    Locale::posix(),
            time_zone: Offset::utc(),
            calendar_identifier: CalendarIdentifier::Gregorian,
            lenient:   true,
        }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        Self { locale, ..self }
    }

    pub fn with_time_zone(self, time_zone: Offset) -> Self {
        Self { time_zone, ..self }
    }

    pub fn with_calendar(self, calendar_identifier: CalendarIdentifier) -> Self {
        Self { calendar_identifier, ..self }
    }

    pub fn with_lenient(self, lenient: bool) -> Self {
        Self { lenient, ..self }
    }

    /// The calendar this context’s arithmetic happens in.
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.calendar_identifier, self.time_zone)
    }

    /// A formatter for one of the named patterns in this context.
    pub fn formatter(&self, pattern: FormatPattern) -> Formatter<'static> {
        Formatter::from_pattern(pattern, self.clone())
    }
}

impl Default for FormattingContext {
    fn default() -> Self {
        Self::posix()
    }
}


/// A pattern bound to a context, ready to format and parse.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Formatter<'a> {
    format:  DateFormat<'a>,
    context: FormattingContext,
}

impl<'a> Formatter<'a> {

    /// A formatter for an arbitrary pattern string, which is checked here.
    pub fn new(pattern: &'a str, context: FormattingContext) -> Result<Self, FormatError> {
        trace!("Building formatter for {:?}", pattern);
        let format = DateFormat::parse(pattern)?;
        Ok(Self { format, context })
    }

    pub fn context(&self) -> &FormattingContext {
        &self.context
    }

    pub fn date_format(&self) -> &DateFormat<'a> {
        &self.format
    }

    pub fn format(&self, instant: Instant) -> String {
        let local = self.context.time_zone.to_local(instant);
        self.format.format(&local, &self.context.locale)
    }

    pub fn parse(&self, text: &str) -> Result<Instant, ParseError> {
        let local = self.format.scan(text, &self.context.locale, self.context.lenient)?;
        self.context.time_zone.to_instant(local).ok_or(ParseError::OutOfRange)
    }
}

impl Formatter<'static> {

    /// A formatter for one of the named patterns.
    pub fn from_pattern(pattern: FormatPattern, context: FormattingContext) -> Self {
        Self { format: pattern.date_format(), context }
    }

    /// A formatter for one of the named patterns in the current defaults.
    pub fn with_defaults(pattern: FormatPattern) -> Self {
        Self::from_pattern(pattern, (*defaults()).clone())
    }

    /// A formatter pinned to the POSIX locale and UTC, whatever the
    /// defaults say, for talking to machines.
    pub fn posix(pattern: FormatPattern) -> Self {
        let context = FormattingContext {
            calendar_identifier: CalendarIdentifier::Iso8601,
            ..FormattingContext::posix()
        };
        Self::from_pattern(pattern, context)
    }
}


static DEFAULTS: Lazy<RwLock<Arc<FormattingContext>>> =
    Lazy::new(|| RwLock::new(Arc::new(FormattingContext::posix())));


/// A snapshot of the current defaults. Later changes to the defaults
/// don’t affect a snapshot already taken.
pub fn defaults() -> Arc<FormattingContext> {
    Arc::clone(&DEFAULTS.read())
}

/// Replaces the defaults.
pub fn set_defaults(context: FormattingContext) {
    debug!("Default formatting context is now {:?}", context);
    *DEFAULTS.write() = Arc::new(context);
}

/// Replaces the defaults with a modified copy of themselves. The write
/// lock is held throughout, so concurrent updates can’t lose each other.
pub fn update_defaults<F>(change: F)
where F: FnOnce(FormattingContext) -> FormattingContext
{
    let mut slot = DEFAULTS.write();
    let context = change((**slot).clone());
    debug!("Default formatting context is now {:?}", context);
    *slot = Arc::new(context);
}

/// Puts the defaults back to the POSIX locale, UTC, and Gregorian.
pub fn reset_defaults() {
    set_defaults(FormattingContext::posix());
}

pub fn default_locale() -> Locale {
    defaults().locale.clone()
}

pub fn set_default_locale(locale: Locale) {
    update_defaults(|c| c.with_locale(locale));
}

pub fn default_time_zone() -> Offset {
    defaults().time_zone
}

pub fn set_default_time_zone(time_zone: Offset) {
    update_defaults(|c| c.with_time_zone(time_zone));
}

pub fn default_calendar_identifier() -> CalendarIdentifier {
    defaults().calendar_identifier
}

pub fn set_default_calendar_identifier(calendar: CalendarIdentifier) {
    update_defaults(|c| c.with_calendar(calendar));
}

/// The calendar derived from the current default identifier and time
/// zone.
pub fn default_calendar() -> Calendar {
    defaults().calendar()
}


#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;

    #[test]
    fn posix_names() {
        let locale = Locale::posix();
        assert_eq!(locale.identifier(), "en_US_POSIX");
        assert_eq!(locale.long_month_name(0), "January");
        assert_eq!(locale.short_month_name(11), "Dec");
        assert_eq!(locale.long_day_name(0), "Sunday");
        assert_eq!(locale.short_day_name(5), "Fri");
        assert_eq!(locale.day_period(false), "PM");
    }

    #[test]
    fn custom_day_periods() {
        let locale = Locale::posix().with_day_periods("a.m.", "p.m.");
        assert_eq!(locale.day_period(true), "a.m.");
    }

    #[test]
    fn builder_leaves_the_original_alone() {
        let posix = FormattingContext::posix();
        let strict = posix.clone().with_lenient(false);
        assert!(posix.lenient);
        assert!(!strict.lenient);
    }

    #[test]
    fn formatter_from_any_pattern() {
        let formatter = Formatter::new("yyyy/MM/dd", FormattingContext::posix()).unwrap();
        assert_eq!(formatter.format(Instant::at(0)), "1970/01/01");
        assert_eq!(formatter.parse("1970/01/02"), Ok(Instant::at(86_400)));
    }

    #[test]
    fn formatter_refuses_bad_patterns() {
        assert!(Formatter::new("yyyy-qq", FormattingContext::posix()).is_err());
    }

    #[test]
    fn formatter_in_another_zone() {
        let context = FormattingContext::posix().with_time_zone(Offset::of_hours_and_minutes(-3, 0).unwrap());
        let formatter = context.formatter(FormatPattern::DEFAULT_SERVER_DATE_TIME);
        assert_eq!(formatter.format(Instant::at(0)), "1969-12-31 21:00:00");
    }

    #[test]
    #[serial]
    fn snapshots_are_stable() {
        reset_defaults();
        let before = defaults();
        set_default_time_zone(Offset::of_hours_and_minutes(2, 0).unwrap());

        assert!(before.time_zone.is_utc());
        assert_eq!(default_time_zone().seconds_from_utc(), 7200);
        reset_defaults();
    }

    #[test]
    #[serial]
    fn setters_touch_one_field() {
        reset_defaults();
        set_default_calendar_identifier(CalendarIdentifier::Iso8601);

        assert_eq!(default_calendar_identifier(), CalendarIdentifier::Iso8601);
        assert_eq!(default_locale(), Locale::posix());
        assert_eq!(default_calendar(), Calendar::new(CalendarIdentifier::Iso8601, Offset::utc()));
        reset_defaults();
    }

    #[test]
    #[serial]
    fn posix_formatter_ignores_defaults() {
        reset_defaults();
        set_default_time_zone(Offset::of_hours_and_minutes(9, 0).unwrap());

        assert_eq!(Formatter::posix(FormatPattern::HH_mm).format(Instant::at(0)), "00:00");
        assert_eq!(Formatter::with_defaults(FormatPattern::HH_mm).format(Instant::at(0)), "09:00");
        reset_defaults();
    }
}
