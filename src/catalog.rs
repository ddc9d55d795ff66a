//! The fixed set of named date patterns.
//!
//! Each variant is named after the pattern it stands for, which is why
//! some of them are lowercase. The set is closed: callers who need a
//! different layout build a `Formatter` from their own pattern string.

use std::fmt;
use std::str::FromStr;

use crate::format::DateFormat;


macro_rules! patterns {
    ($($name: ident => $pattern: expr,)*) => {

        #[allow(non_camel_case_types)]
        #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
        pub enum FormatPattern {
            $( $name, )*
        }

        impl FormatPattern {

            /// Every named pattern, in declaration order.
            pub const ALL: &'static [FormatPattern] = &[ $( FormatPattern::$name, )* ];

            /// The pattern string this name stands for.
            pub fn pattern(self) -> &'static str {
                match self {
                    $( FormatPattern::$name => $pattern, )*
                }
            }

            /// The symbolic name, exactly as it’s spelt in the enum.
            pub fn name(self) -> &'static str {
                match self {
                    $( FormatPattern::$name => stringify!($name), )*
                }
            }
        }
    };
}

patterns! {
    ONLY_DAY                  => "dd",
    ONLY_DAY_SMALL            => "d",
    DAY_TITLE_FULL            => "EEEE",
    DAY_TITLE_SMALL           => "E",
    JUST_12HOURS_TIME         => "hh:mm a",
    NORMAL_DATE_TIME          => "dd/MM/yyyy hh:mm:a",
    EXPIRY_DATE_IN            => "M/d/yyyy hh:mm:ss a",
    yyyy_MM_dd_hh_mm_a        => "yyyy-MM-dd hh:mm a",
    DOB_DATE                  => "yyyyMMdd",
    HH_mm_ss                  => "HH:mm:ss",
    HH_mm                     => "HH:mm",
    UI_DATE_FORMAT            => "dd/MM/yyyy",
    DEFAULT_SERVER_DATE_TIME  => "yyyy-MM-dd HH:mm:ss",
    DEFAULT_SERVER_DATE_TIME2 => "yyyy-MM-dd HH:mm",
    DEFAULT                   => "yyyy-MM-dd'T'HH:mm:ss",
    dd_MMMM_yyyy              => "dd MMMM yyyy",
    yyyy_MM_dd                => "yyyy MM dd",
    DEFAULT_SERVER_DATE       => "yyyy-MM-dd",
    dd_MM_yyyy_dashes         => "dd-MM-yyyy",
    d_MMM_yyyy_spaces         => "d MMM yyyy",
    MMMM_yyyy                 => "MMMM yyyy",
    yyyy                      => "yyyy",
    MM                        => "MM",
    dd_MMM                    => "dd MMM",
    MMMM                      => "MMMM",
    MMM_dd_hh_mm_a            => "MMM dd, hh:mm a",
}

impl FormatPattern {

    /// The tokenized form of the pattern.
    pub fn date_format(self) -> DateFormat<'static> {
        // The catalog is closed and every pattern string in it is a
        // constant that tokenizes; `every_pattern_tokenizes` walks all of
        // them, so the error arm can only be hit by editing the table.
        match DateFormat::parse(self.pattern()) {
            Ok(format) => format,
            Err(e)     => unreachable!("named pattern {} doesn’t tokenize: {}", self.name(), e),
        }
    }
}

impl fmt::Display for FormatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for FormatPattern {
    type Err = UnknownPattern;

    /// Looks a pattern up by its symbolic name, such as `"DOB_DATE"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .copied()
                 .find(|p| p.name() == input)
                 .ok_or_else(|| UnknownPattern(input.to_owned()))
    }
}

#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
#[error("no date pattern is named {0:?}")]
pub struct UnknownPattern(pub String);


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::LocalDateTime;
    use crate::context::Locale;
    use crate::format::Field;

    #[test]
    fn every_pattern_tokenizes() {
        for pattern in FormatPattern::ALL {
            let format = DateFormat::parse(pattern.pattern());
            assert!(format.is_ok(), "{}", pattern.name());
            assert_eq!(format.ok(), Some(pattern.date_format()));
        }
    }

    #[test]
    fn there_are_twenty_six() {
        assert_eq!(FormatPattern::ALL.len(), 26);
    }

    #[test]
    fn second_server_pattern_has_no_seconds() {
        assert_eq!(FormatPattern::DEFAULT_SERVER_DATE_TIME2.pattern(), "yyyy-MM-dd HH:mm");
    }

    #[test]
    fn quoted_t() {
        let format = FormatPattern::DEFAULT.date_format();
        assert!(format.fields.contains(&Field::Literal("T")));
    }

    #[test]
    fn names_round_trip() {
        for pattern in FormatPattern::ALL {
            assert_eq!(pattern.name().parse::<FormatPattern>(), Ok(*pattern));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!("yyyy-MM-dd".parse::<FormatPattern>(), Err(UnknownPattern("yyyy-MM-dd".into())));
    }

    #[test]
    fn display_is_the_pattern() {
        assert_eq!(FormatPattern::UI_DATE_FORMAT.to_string(), "dd/MM/yyyy");
    }

    #[test]
    fn sample_renderings() {
        let when = LocalDateTime::rolled_over(2024, 3, 15, 14, 5, 9, 0).unwrap();
        let locale = Locale::posix();
        let render = |p: FormatPattern| p.date_format().format(&when, &locale);

        assert_eq!(render(FormatPattern::ONLY_DAY_SMALL), "15");
        assert_eq!(render(FormatPattern::DAY_TITLE_FULL), "Friday");
        assert_eq!(render(FormatPattern::DAY_TITLE_SMALL), "Fri");
        assert_eq!(render(FormatPattern::JUST_12HOURS_TIME), "02:05 PM");
        assert_eq!(render(FormatPattern::NORMAL_DATE_TIME), "15/03/2024 02:05:PM");
        assert_eq!(render(FormatPattern::EXPIRY_DATE_IN), "3/15/2024 02:05:09 PM");
        assert_eq!(render(FormatPattern::DOB_DATE), "20240315");
        assert_eq!(render(FormatPattern::DEFAULT), "2024-03-15T14:05:09");
        assert_eq!(render(FormatPattern::dd_MMMM_yyyy), "15 March 2024");
        assert_eq!(render(FormatPattern::MMM_dd_hh_mm_a), "Mar 15, 02:05 PM");
    }
}
