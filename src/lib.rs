#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Named date formats, lenient parsing, and day-level comparisons.
//!
//! Dates are written and read through a fixed catalog of patterns,
//! `FormatPattern`, in a `FormattingContext` that carries the locale,
//! time zone, and calendar. Operations that aren’t given a context use
//! the process-wide defaults, which start out as `en_US_POSIX` in UTC.
//!
//! # Examples
//!
//! ```
//! use date_facilities::{dates, FormatPattern, Instant};
//! use std::cmp::Ordering;
//!
//! let morning = dates::parse("2024-03-15 01:00:00", FormatPattern::DEFAULT_SERVER_DATE_TIME).unwrap();
//! let evening = dates::parse("2024-03-15 23:00:00", FormatPattern::DEFAULT_SERVER_DATE_TIME).unwrap();
//! assert_eq!(dates::compare_dates(morning, evening), Ordering::Equal);
//!
//! assert_eq!(dates::parse("not-a-date", FormatPattern::DEFAULT_SERVER_DATE), None);
//! assert_eq!(dates::format(Instant::at(0), FormatPattern::UI_DATE_FORMAT), "01/01/1970");
//! ```

mod system;
mod util;

pub mod cal;
pub mod catalog;
pub mod context;
pub mod dates;
pub mod error;
pub mod format;
pub mod instant;

pub use crate::cal::{Calendar, CalendarIdentifier, Component, DateComponents, Offset};
pub use crate::catalog::FormatPattern;
pub use crate::context::{FormattingContext, Formatter, Locale};
pub use crate::error::Error;
pub use crate::instant::Instant;
