//! Fixed UTC offsets, the only kind of time zone this crate knows about.

use std::fmt;

use crate::cal::datetime::LocalDateTime;
use crate::cal::TimePiece;
use crate::instant::Instant;
use crate::util::RangeExt;


/// A fixed distance from UTC, with no daylight-saving rules attached.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Default)]
pub struct Offset {
    offset_seconds: i32,
}

impl Offset {

    /// The zero offset.
    pub fn utc() -> Self {
        Self { offset_seconds: 0 }
    }

    /// An offset this many seconds east of UTC. Anything a whole day or
    /// more away is refused.
    pub fn of_seconds(seconds: i32) -> Result<Self, Error> {
        if seconds.is_within(-86399..86400) {
            Ok(Self { offset_seconds: seconds })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    pub fn of_hours_and_minutes(hours: i8, minutes: i8) -> Result<Self, Error> {
        if (hours.is_positive() && minutes.is_negative())
        || (hours.is_negative() && minutes.is_positive()) {
            Err(Error::SignMismatch)
        }
        else if hours <= -24 || hours >= 24 || minutes <= -60 || minutes >= 60 {
            Err(Error::OutOfRange)
        }
        else {
            Self::of_seconds(i32::from(hours) * (60 * 60) + i32::from(minutes) * 60)
        }
    }

    pub fn is_utc(self) -> bool {
        self.offset_seconds == 0
    }

    /// Seconds east of UTC.
    pub fn seconds_from_utc(self) -> i32 {
        self.offset_seconds
    }

    /// The wall-clock reading at the given instant in this zone.
    pub fn to_local(self, instant: Instant) -> LocalDateTime {
        // Instants stay far enough inside `i64` for any offset.
        LocalDateTime::at_ms(instant.seconds() + i64::from(self.offset_seconds), instant.milliseconds())
    }

    /// The instant at which this zone’s wall clock reads the given
    /// date-time, or `None` if that’s outside the range of instants.
    pub fn to_instant(self, local: LocalDateTime) -> Option<Instant> {
        let seconds = local.to_epoch_seconds()?.checked_sub(i64::from(self.offset_seconds))?;
        Instant::checked_at_ms(seconds, i64::from(local.millisecond()))
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_utc() {
            return write!(f, "Offset(Z)");
        }

        let sign = if self.offset_seconds < 0 { '-' } else { '+' };
        let total = self.offset_seconds.abs();
        write!(f, "Offset({}{:02}:{:02}", sign, total / 3600, total / 60 % 60)?;
        if total % 60 != 0 {
            write!(f, ":{:02}", total % 60)?;
        }
        write!(f, ")")
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone, thiserror::Error)]
pub enum Error {
    #[error("offset field out of range")]
    OutOfRange,

    #[error("sign mismatch")]
    SignMismatch,
}
