//! Purchase Quantity
//!
//! An integer kept inside [1, 10] however it is edited.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn clamp(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parse text input the way a number field is read: leading integer
    /// prefix ("3abc" -> 3, "4.9" -> 4); no digits, or zero, falls back to 1
    pub fn parse(input: &str) -> Self {
        match leading_integer(input) {
            Some(0) | None => Self(Self::MIN),
            Some(value) => Self::clamp(value),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::clamp(self.0 as i64 + 1)
    }

    pub fn decrement(self) -> Self {
        Self::clamp(self.0 as i64 - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
    }

    seen.then(|| if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_edges() {
        assert_eq!(Quantity::clamp(0).get(), 1);
        assert_eq!(Quantity::clamp(11).get(), 10);
        assert_eq!(Quantity::clamp(5).get(), 5);
        assert_eq!(Quantity::clamp(i64::MIN).get(), 1);
    }

    #[test]
    fn test_parse_like_number_input() {
        assert_eq!(Quantity::parse("7").get(), 7);
        assert_eq!(Quantity::parse("  3abc").get(), 3);
        assert_eq!(Quantity::parse("4.9").get(), 4);
        assert_eq!(Quantity::parse("abc").get(), 1);
        assert_eq!(Quantity::parse("").get(), 1);
        assert_eq!(Quantity::parse("0").get(), 1);
        assert_eq!(Quantity::parse("-4").get(), 1);
        assert_eq!(Quantity::parse("250").get(), 10);
        assert_eq!(Quantity::parse("99999999999999999999999").get(), 10);
    }

    #[test]
    fn test_stepper_saturates() {
        let max = Quantity::clamp(10);
        assert_eq!(max.increment(), max);
        let min = Quantity::default();
        assert_eq!(min.decrement(), min);
        assert_eq!(min.increment().get(), 2);
    }

    proptest! {
        #[test]
        fn prop_clamp_in_range(x in any::<i64>()) {
            let q = Quantity::clamp(x).get();
            prop_assert!((Quantity::MIN..=Quantity::MAX).contains(&q));
        }

        #[test]
        fn prop_parse_in_range(s in ".*") {
            let q = Quantity::parse(&s).get();
            prop_assert!((Quantity::MIN..=Quantity::MAX).contains(&q));
        }
    }
}
