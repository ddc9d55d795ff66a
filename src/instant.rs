//! Exact points on a timeline.

use std::fmt;

use crate::system::sys_time;
use crate::util::split_cycles;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with millisecond precision.
///
/// Internally, this is represented by a 64-bit integer of seconds since the
/// Unix epoch, and a 16-bit integer of milliseconds that is always kept in
/// the range `0 .. 1000`, so the derived ordering is the timeline’s order.
///
/// Instants are kept between `Instant::MIN` and `Instant::MAX`, a hundred
/// billion years either side of the epoch. Inside that range, reading
/// calendar fields in any time zone never overflows. The plain
/// constructors clamp to it; the `checked_` ones return `None` instead.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    milliseconds: i16,
}

/// A hundred billion years of 365.2425 days. This is a whole number of
/// days, so both ends of the range fall on midnight UTC.
const LIMIT_SECONDS: i64 = 100_000_000_000 * 31_556_952;

impl Instant {

    /// The earliest instant there is.
    pub const MIN: Instant = Instant { seconds: -LIMIT_SECONDS, milliseconds: 0 };

    /// The latest instant there is.
    pub const MAX: Instant = Instant { seconds: LIMIT_SECONDS, milliseconds: 0 };

    /// Creates a new Instant set to the number of seconds since the Unix
    /// epoch, and zero milliseconds.
    pub fn at(seconds: i64) -> Self {
        Self::clamped(seconds, 0)
    }

    /// Creates a new Instant set to the number of seconds since the
    /// Unix epoch, along with a number of milliseconds. Milliseconds
    /// outside `0 .. 1000` carry into the seconds.
    pub fn at_ms(seconds: i64, milliseconds: i64) -> Self {
        let (carry, milliseconds) = split_cycles(milliseconds, 1000);
        Self::clamped(seconds.saturating_add(carry), milliseconds as i16)
    }

    /// Like `at_ms`, but `None` outside the range of instants.
    pub fn checked_at_ms(seconds: i64, milliseconds: i64) -> Option<Self> {
        let (carry, milliseconds) = split_cycles(milliseconds, 1000);
        let instant = Self { seconds: seconds.checked_add(carry)?, milliseconds: milliseconds as i16 };
        if Self::MIN <= instant && instant <= Self::MAX { Some(instant) }
                                                    else { None }
    }

    fn clamped(seconds: i64, milliseconds: i16) -> Self {
        Self { seconds, milliseconds }.clamp(Self::MIN, Self::MAX)
    }

    /// Creates a new Instant set to the computer’s current time.
    pub fn now() -> Self {
        let (seconds, milliseconds) = sys_time();
        Self::at_ms(seconds, i64::from(milliseconds))
    }

    /// Creates a new Instant set to the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Returns the number of seconds at this instant
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the number of milliseconds at this instant
    pub fn milliseconds(&self) -> i16 {
        self.milliseconds
    }

    /// Returns a new instant this many seconds later (or earlier, for a
    /// negative count), keeping the milliseconds. Stops at either end of
    /// the range.
    pub fn plus_seconds(self, seconds: i64) -> Self {
        Self::clamped(self.seconds.saturating_add(seconds), self.milliseconds)
    }

    /// Like `plus_seconds`, but `None` past either end of the range.
    pub fn checked_plus_seconds(self, seconds: i64) -> Option<Self> {
        Self::checked_at_ms(self.seconds.checked_add(seconds)?, i64::from(self.milliseconds))
    }

    /// Returns a new instant with the sub-second part dropped.
    pub fn truncated_to_second(self) -> Self {
        Self::at(self.seconds)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instant({}s/{}ms)", self.seconds, self.milliseconds)
    }
}
