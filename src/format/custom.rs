//! Pattern strings, and turning date-times into text with them.
//!
//! Patterns use the Unicode (LDML) letters that most date libraries
//! share: a run of one letter is one field, and the length of the run
//! picks the width or style. `'quoted'` text is copied as-is, `''` is an
//! apostrophe, and anything that isn’t an ASCII letter is a literal.

use std::fmt::Display;
use std::iter::Peekable;
use std::str::CharIndices;

use num_traits::{PrimInt, Signed};
use pad::{Alignment, PadStr};

use crate::cal::{DatePiece, TimePiece};
use crate::context::Locale;
use crate::format::{FormatError, Pos};


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field<'a> {
    Literal(&'a str),

    Year(NumArguments),
    YearOfCentury,

    Month(NumArguments),
    MonthName(bool),

    Day(NumArguments),
    DayOfYear(NumArguments),
    WeekdayName(bool),

    Hour(NumArguments),
    Hour12(NumArguments),
    Minute(NumArguments),
    Second(NumArguments),
    Fraction(usize),

    DayPeriod,
}

impl<'a> Field<'a> {

    /// Whether this field reads digits when parsing. Two of these next to
    /// each other, as in `yyyyMMdd`, can only be told apart by width.
    pub fn is_numeric(&self) -> bool {
        !matches!(*self, Field::Literal(_) | Field::MonthName(_) | Field::WeekdayName(_) | Field::DayPeriod)
    }

    fn format<T>(&self, when: &T, w: &mut String, locale: &Locale) where T: DatePiece+TimePiece {
        match *self {
            Field::Literal(s)           => w.push_str(s),
            Field::Year(a)              => a.format(w, when.year()),
            Field::YearOfCentury        => NumArguments::width(2).format(w, when.year_of_century()),
            Field::Month(a)             => a.format(w, when.month() as i8),
            Field::MonthName(true)      => w.push_str(locale.long_month_name(when.month().months_from_january())),
            Field::MonthName(false)     => w.push_str(locale.short_month_name(when.month().months_from_january())),
            Field::Day(a)               => a.format(w, when.day()),
            Field::DayOfYear(a)         => a.format(w, when.yearday()),
            Field::WeekdayName(true)    => w.push_str(locale.long_day_name(when.weekday().days_from_sunday())),
            Field::WeekdayName(false)   => w.push_str(locale.short_day_name(when.weekday().days_from_sunday())),
            Field::Hour(a)              => a.format(w, when.hour()),
            Field::Hour12(a)            => a.format(w, match when.hour() % 12 { 0 => 12, h => h }),
            Field::Minute(a)            => a.format(w, when.minute()),
            Field::Second(a)            => a.format(w, when.second()),
            Field::Fraction(digits)     => format_fraction(w, when.millisecond(), digits),
            Field::DayPeriod            => w.push_str(locale.day_period(when.hour() < 12)),
        }
    }
}

/// Milliseconds shown to the given number of digits, truncating when
/// there are fewer than three and padding with zeroes when there are more.
fn format_fraction(w: &mut String, millisecond: i16, digits: usize) {
    let three = format!("{:03}", millisecond);
    if digits <= 3 {
        w.push_str(&three[.. digits]);
    }
    else {
        w.push_str(&three.pad(digits, '0', Alignment::Left, false));
    }
}


/// How wide a number should be. Numbers shorter than this get padded with
/// zeroes; longer ones are left alone.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NumArguments {
    pub width: usize,
}

impl NumArguments {
    pub fn width(width: usize) -> Self {
        Self { width }
    }

    fn format<N: PrimInt + Signed + Display>(self, w: &mut String, number: N) {
        let digits = number.abs().to_string();
        if number.is_negative() {
            w.push('-');
        }
        w.push_str(&digits.pad(self.width, '0', Alignment::Right, false));
    }
}


/// A tokenized pattern.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DateFormat<'a> {
    pub fields: Vec<Field<'a>>,
}

impl<'a> DateFormat<'a> {
    pub fn format<T>(&self, when: &T, locale: &Locale) -> String where T: DatePiece+TimePiece {
        let mut buf = String::new();

        for field in &self.fields {
            field.format(when, &mut buf, locale);
        }

        buf
    }

    pub fn parse(input: &'a str) -> Result<DateFormat<'a>, FormatError> {
        let mut parser = FormatParser::new(input);
        parser.parse_format_string()?;

        Ok(DateFormat { fields: parser.fields })
    }
}


struct FormatParser<'a> {
    iter:   Peekable<CharIndices<'a>>,
    fields: Vec<Field<'a>>,
    input:  &'a str,
    anchor: Option<Pos>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> FormatParser<'a> {
        FormatParser {
            iter:   input.char_indices().peekable(),
            fields: Vec::new(),
            input,
            anchor: None,
        }
    }

    /// Turns the run of plain characters since the anchor into one
    /// literal field.
    fn collect_up_to_anchor(&mut self, position: Option<Pos>) {
        if let Some(pos) = self.anchor.take() {
            let text = match position {
                Some(new_pos) => &self.input[pos..new_pos],
                None          => &self.input[pos..],
            };
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_format_string(&mut self) -> Result<(), FormatError> {
        while let Some((pos, c)) = self.iter.next() {
            match c {
                '\'' => {
                    self.collect_up_to_anchor(Some(pos));
                    self.parse_quoted(pos)?;
                },
                c if c.is_ascii_alphabetic() => {
                    self.collect_up_to_anchor(Some(pos));
                    let count = 1 + self.count_repeats(c);
                    let field = letter_field(c, count).ok_or(FormatError::UnsupportedField { c, pos })?;
                    self.fields.push(field);
                },
                _ => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                },
            }
        }

        self.collect_up_to_anchor(None);
        Ok(())
    }

    fn count_repeats(&mut self, c: char) -> usize {
        let mut count = 0;
        while self.iter.next_if(|&(_, next)| next == c).is_some() {
            count += 1;
        }
        count
    }

    /// Handles everything after an apostrophe: either `''`, which is an
    /// apostrophe on its own, or quoted text up to the closing one, where
    /// `''` again stands for an apostrophe.
    fn parse_quoted(&mut self, open_pos: Pos) -> Result<(), FormatError> {
        if let Some((pos, _)) = self.iter.next_if(|&(_, c)| c == '\'') {
            self.fields.push(Field::Literal(&self.input[pos ..= pos]));
            return Ok(());
        }

        let mut start = open_pos + 1;
        loop {
            match self.iter.next() {
                Some((pos, '\'')) => {
                    if pos > start {
                        self.fields.push(Field::Literal(&self.input[start .. pos]));
                    }

                    match self.iter.next_if(|&(_, c)| c == '\'') {
                        Some((escaped, _)) => {
                            self.fields.push(Field::Literal(&self.input[escaped ..= escaped]));
                            start = escaped + 1;
                        },
                        None => return Ok(()),
                    }
                },
                Some(_) => {},
                None    => return Err(FormatError::UnterminatedQuote { open_pos }),
            }
        }
    }
}

fn letter_field<'a>(c: char, count: usize) -> Option<Field<'a>> {
    let num = NumArguments::width(count);

    Some(match (c, count) {
        ('y', 2)       => Field::YearOfCentury,
        ('y', _)       => Field::Year(num),
        ('M', 1 | 2)   => Field::Month(num),
        ('M', 3)       => Field::MonthName(false),
        ('M', _)       => Field::MonthName(true),
        ('d', _)       => Field::Day(num),
        ('D', _)       => Field::DayOfYear(num),
        ('E', 1..=3)   => Field::WeekdayName(false),
        ('E', _)       => Field::WeekdayName(true),
        ('H', _)       => Field::Hour(num),
        ('h', _)       => Field::Hour12(num),
        ('m', _)       => Field::Minute(num),
        ('s', _)       => Field::Second(num),
        ('S', _)       => Field::Fraction(count),
        ('a', _)       => Field::DayPeriod,
        _              => return None,
    })
}


#[cfg(test)]
mod test {
    pub(crate) use super::{DateFormat, NumArguments};
    pub(crate) use super::Field::*;
    pub(crate) use crate::format::FormatError;

    mod parse {
        use super::*;

        macro_rules! test {
            ($name: ident: $input: expr => $result: expr) => {
                #[test]
                fn $name() {
                    assert_eq!(DateFormat::parse($input), $result)
                }
            };
        }

        fn n(width: usize) -> NumArguments {
            NumArguments::width(width)
        }

        test!(empty_string: ""                      => Ok(DateFormat { fields: vec![] }));
        test!(entirely_literal: "12:34!"            => Ok(DateFormat { fields: vec![ Literal("12:34!") ] }));
        test!(single_element: "yyyy"                => Ok(DateFormat { fields: vec![ Year(n(4)) ] }));
        test!(adjacent: "yyyyMMdd"                  => Ok(DateFormat { fields: vec![ Year(n(4)), Month(n(2)), Day(n(2)) ] }));
        test!(surrounded: "(dd)"                    => Ok(DateFormat { fields: vec![ Literal("("), Day(n(2)), Literal(")") ] }));
        test!(two_digit_year: "yy"                  => Ok(DateFormat { fields: vec![ YearOfCentury ] }));
        test!(month_styles: "M MM MMM MMMM"         => Ok(DateFormat { fields: vec![ Month(n(1)), Literal(" "), Month(n(2)), Literal(" "), MonthName(false), Literal(" "), MonthName(true) ] }));
        test!(weekday_styles: "E EEEE"              => Ok(DateFormat { fields: vec![ WeekdayName(false), Literal(" "), WeekdayName(true) ] }));
        test!(twelve_hour: "hh:mm a"                => Ok(DateFormat { fields: vec![ Hour12(n(2)), Literal(":"), Minute(n(2)), Literal(" "), DayPeriod ] }));
        test!(fraction: "ss.SSS"                    => Ok(DateFormat { fields: vec![ Second(n(2)), Literal("."), Fraction(3) ] }));

        test!(quoted: "yyyy-MM-dd'T'HH"             => Ok(DateFormat { fields: vec![ Year(n(4)), Literal("-"), Month(n(2)), Literal("-"), Day(n(2)), Literal("T"), Hour(n(2)) ] }));
        test!(lone_apostrophe: "h''"                => Ok(DateFormat { fields: vec![ Hour12(n(1)), Literal("'") ] }));
        test!(apostrophe_in_quotes: "'o''clock'"    => Ok(DateFormat { fields: vec![ Literal("o"), Literal("'"), Literal("clock") ] }));
        test!(quoted_letters: "'at' HH"             => Ok(DateFormat { fields: vec![ Literal("at"), Literal(" "), Hour(n(2)) ] }));

        test!(unsupported: "yyyy-QQ"                => Err(FormatError::UnsupportedField { c: 'Q', pos: 5 }));
        test!(unterminated: "HH 'oops"              => Err(FormatError::UnterminatedQuote { open_pos: 3 }));
    }

    mod format {
        use super::*;
        use crate::cal::LocalDateTime;
        use crate::context::Locale;

        macro_rules! test {
            ($name: ident: $pattern: expr, $when: expr => $result: expr) => {
                #[test]
                fn $name() {
                    let when = LocalDateTime::rolled_over($when.0, $when.1, $when.2, $when.3, $when.4, $when.5, $when.6).unwrap();
                    let format = DateFormat::parse($pattern).unwrap();
                    assert_eq!(format.format(&when, &Locale::posix()), $result)
                }
            };
        }

        test!(server_date:    "yyyy-MM-dd",           (2024, 3, 15, 0, 0, 0, 0)     => "2024-03-15");
        test!(unpadded:       "M/d/yyyy",             (2024, 3, 5, 0, 0, 0, 0)      => "3/5/2024");
        test!(noon_is_pm:     "hh:mm a",              (2024, 3, 5, 12, 0, 0, 0)     => "12:00 PM");
        test!(midnight_is_12: "hh:mm a",              (2024, 3, 5, 0, 7, 0, 0)      => "12:07 AM");
        test!(names:          "EEEE, d MMMM",         (2024, 3, 15, 0, 0, 0, 0)     => "Friday, 15 March");
        test!(short_names:    "E dd MMM",             (2024, 3, 15, 0, 0, 0, 0)     => "Fri 15 Mar");
        test!(fraction:       "HH:mm:ss.SS",          (2024, 3, 15, 8, 9, 10, 987)  => "08:09:10.98");
        test!(long_fraction:  "s.SSSSS",              (2024, 3, 15, 8, 9, 10, 987)  => "10.98700");
        test!(old_year:       "yyyy",                 (-753, 12, 1, 0, 0, 0, 0)     => "-0753");
        test!(short_year:     "yy",                   (2009, 1, 1, 0, 0, 0, 0)      => "09");
        test!(day_of_year:    "D",                    (2016, 12, 31, 0, 0, 0, 0)    => "366");
    }
}
