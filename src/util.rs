//! Misc stuff.

use std::ops::Range;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given range of values.
    fn is_within(&self, range: Range<Self>) -> bool where Self: Sized;
}

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: Range<Self>) -> bool {
        *self >= range.start && *self < range.end
    }
}


/// Split a number of periods into a number of whole cycles, and the
/// number of periods left over that don’t fit into a cycle.
///
/// This is floored division: a negative input gets its remainder wrapped
/// around to be positive, taking one more cycle away instead.
pub(crate) fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    (number_of_periods.div_euclid(cycle_length), number_of_periods.rem_euclid(cycle_length))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positive_cycles() {
        assert_eq!(split_cycles(86_401, 86_400), (1, 1));
    }

    #[test]
    fn negative_cycles_wrap() {
        assert_eq!(split_cycles(-1, 86_400), (-1, 86_399));
    }

    #[test]
    fn within() {
        assert!(5.is_within(0..6));
        assert!(!6.is_within(0..6));
    }
}
