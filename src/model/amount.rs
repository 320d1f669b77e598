use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Fraction digits kept for every amount.
const SCALE_DIGITS: usize = 12;
/// Raw units per whole currency unit.
const UNIT: i128 = 10_i128.pow(SCALE_DIGITS as u32);
/// Raw units per cent.
const UNITS_PER_CENT: i128 = UNIT / 100;

/// Exact decimal currency value with twelve fraction digits.
///
/// Amounts read from a budget keep their full precision while they are
/// summed; only rendering rounds to cents. Addition is checked, so a total
/// never wraps silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

/// Raised when text cannot be read as a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a decimal amount")]
pub struct AmountParseError(pub String);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(i128::from(cents) * UNITS_PER_CENT)
    }

    /// The amount rounded half away from zero to whole cents.
    pub fn cents(self) -> i128 {
        let magnitude = self.0.unsigned_abs();
        let per_cent = UNITS_PER_CENT.unsigned_abs();
        let cents = ((magnitude + per_cent / 2) / per_cent) as i128;
        if self.0 < 0 { -cents } else { cents }
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Sums `amounts`, or `None` when the total does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |total, amount| total.checked_add(amount))
    }

    /// Renders the amount the way the report prints it, e.g. `$1,234.56`.
    pub fn to_currency(self) -> String {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let magnitude = cents.unsigned_abs();
        let whole = group_thousands(&(magnitude / 100).to_string(), ',');
        format!("{sign}${whole}.{:02}", magnitude % 100)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let magnitude = cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Accepts an optional sign, digits with optional `,` grouping and an
    /// optional `.` fraction. Digits past the twelfth fraction digit round
    /// half away from zero.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountParseError(text.to_string());

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let whole: String = whole.chars().filter(|ch| *ch != ',').collect();

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let mut units: i128 = 0;
        for digit in whole.bytes() {
            units = units
                .checked_mul(10)
                .and_then(|value| value.checked_add(i128::from(digit - b'0')))
                .ok_or_else(invalid)?;
        }

        let fraction = fraction.as_bytes();
        let digit_at = |index: usize| fraction.get(index).map_or(0, |b| i128::from(b - b'0'));
        let mut fractional_units =
            (0..SCALE_DIGITS).fold(0, |acc, index| acc * 10 + digit_at(index));
        if digit_at(SCALE_DIGITS) >= 5 {
            fractional_units += 1;
        }

        units = units
            .checked_mul(UNIT)
            .and_then(|value| value.checked_add(fractional_units))
            .ok_or_else(invalid)?;

        Ok(Amount(if negative { -units } else { units }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}
