//! Expiry policy strings.
//!
//! An expiry policy is a human-readable timespan such as `"15m"`, `"1h"`,
//! `"2 days"` or `"1.5h"`. A bare number is a count of **milliseconds**, so
//! `"500"` is half a second and `"3600"` is 3.6 seconds.
//!
//! # Grammar
//!
//! `-?(digits | digits? "." digits) " "* unit?`, at most
//! [`MAX_EXPIRY_LEN`] bytes, units matched case-insensitively:
//!
//! | unit        | spellings                                          |
//! |-------------|----------------------------------------------------|
//! | millisecond | `ms`, `msec`, `msecs`, `millisecond`, `milliseconds` |
//! | second      | `s`, `sec`, `secs`, `second`, `seconds`            |
//! | minute      | `m`, `min`, `mins`, `minute`, `minutes`            |
//! | hour        | `h`, `hr`, `hrs`, `hour`, `hours`                  |
//! | day         | `d`, `day`, `days`                                 |
//! | week        | `w`, `week`, `weeks`                               |
//! | year        | `y`, `yr`, `yrs`, `year`, `years` (365.25 days)    |

use std::str::FromStr;

/// Longest expiry string that will be considered.
pub const MAX_EXPIRY_LEN: usize = 100;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const YEAR_MS: f64 = DAY_MS * 365.25;

/// Error returned when an expiry policy string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryParseError {
    /// The string is empty.
    Empty,
    /// The string is longer than [`MAX_EXPIRY_LEN`].
    TooLong(usize),
    /// The leading number is missing or malformed.
    InvalidNumber(String),
    /// The unit suffix is not recognised.
    UnknownUnit(String),
}

impl std::fmt::Display for ExpiryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry must not be empty"),
            Self::TooLong(len) => write!(
                f,
                "expiry is {len} bytes long (at most {MAX_EXPIRY_LEN} allowed)"
            ),
            Self::InvalidNumber(value) => write!(f, "'{value}' does not start with a number"),
            Self::UnknownUnit(unit) => write!(f, "unknown expiry unit '{unit}'"),
        }
    }
}

impl std::error::Error for ExpiryParseError {}

/// A parsed expiry policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiresIn {
    millis: f64,
}

impl ExpiresIn {
    /// Parse an expiry policy string.
    pub fn parse(value: &str) -> Result<Self, ExpiryParseError> {
        if value.is_empty() {
            return Err(ExpiryParseError::Empty);
        }
        if value.len() > MAX_EXPIRY_LEN {
            return Err(ExpiryParseError::TooLong(value.len()));
        }

        let number_len = leading_number_len(value)
            .ok_or_else(|| ExpiryParseError::InvalidNumber(value.to_string()))?;
        let (number, rest) = value.split_at(number_len);
        let amount: f64 = number
            .parse()
            .map_err(|_| ExpiryParseError::InvalidNumber(value.to_string()))?;

        let unit = rest.trim_start_matches(' ');
        let scale = unit_scale(unit)
            .ok_or_else(|| ExpiryParseError::UnknownUnit(unit.to_string()))?;

        Ok(Self {
            millis: amount * scale,
        })
    }

    /// The policy length in milliseconds. May be negative or fractional.
    #[must_use]
    pub const fn as_millis_f64(self) -> f64 {
        self.millis
    }

    /// Compute the `exp` timestamp (whole seconds) for a token issued at
    /// `issued_at_secs`.
    ///
    /// Returns `None` if the result is negative or does not fit in a `u64`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )] // Range is checked before the cast back to u64
    pub fn expires_at(self, issued_at_secs: u64) -> Option<u64> {
        let exp = (issued_at_secs as f64 + self.millis / SECOND_MS).floor();
        if !exp.is_finite() || exp < 0.0 || exp >= u64::MAX as f64 {
            return None;
        }
        Some(exp as u64)
    }
}

impl FromStr for ExpiresIn {
    type Err = ExpiryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Length in bytes of the leading `-?(\d+|\d*\.\d+)` of `value`, if any.
fn leading_number_len(value: &str) -> Option<usize> {
    let bytes = value.as_bytes();
    let mut pos = usize::from(bytes.first() == Some(&b'-'));

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            return Some(frac_end);
        }
        // A trailing "." is never part of the number.
        return None;
    }

    (int_digits > 0).then_some(pos)
}

fn unit_scale(unit: &str) -> Option<f64> {
    let scale = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND_MS,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE_MS,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR_MS,
        "d" | "day" | "days" => DAY_MS,
        "w" | "week" | "weeks" => WEEK_MS,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR_MS,
        _ => return None,
    };
    Some(scale)
}
