//! # Date and Time Formatting
//!
//! A pattern such as `"dd/MM/yyyy hh:mm a"` is first tokenized into a
//! `DateFormat`, a list of fields. Once that succeeds, formatting with it
//! can’t fail, and parsing with it only fails when the *input* is wrong.
//!
//! ```rust
//! use date_facilities::format::DateFormat;
//! use date_facilities::cal::LocalDateTime;
//! use date_facilities::Locale;
//!
//! let format = DateFormat::parse("d MMM yyyy").unwrap();
//! let when = LocalDateTime::rolled_over(2024, 3, 15, 0, 0, 0, 0).unwrap();
//! assert_eq!(format.format(&when, &Locale::posix()), "15 Mar 2024");
//! ```
//!
//! Month and weekday names, and the AM/PM markers, come from a `Locale`.

mod custom;
mod scan;

pub use self::custom::{DateFormat, Field, NumArguments};

/// A byte position in a pattern or in parsed input.
pub type Pos = usize;


/// A problem with a pattern string itself.
#[derive(PartialEq, Eq, Clone, Copy, Debug, thiserror::Error)]
pub enum FormatError {

    /// An ASCII letter that doesn’t stand for any field. Letters meant
    /// literally have to be quoted.
    #[error("unsupported pattern letter {c:?} at position {pos}")]
    UnsupportedField { c: char, pos: Pos },

    #[error("quote opened at position {open_pos} is never closed")]
    UnterminatedQuote { open_pos: Pos },
}


/// A problem with text being parsed against a pattern.
#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected:?} at position {pos}")]
    Expected { expected: String, pos: Pos },

    #[error("expected a number at position {pos}")]
    ExpectedNumber { pos: Pos },

    #[error("no month, weekday, or day period name at position {pos}")]
    UnknownName { pos: Pos },

    #[error("unexpected input after position {pos}")]
    TrailingInput { pos: Pos },

    /// A field value that strict parsing won’t roll over, or a number too
    /// large to hold at all.
    #[error("parsed field is out of range")]
    OutOfRange,
}
