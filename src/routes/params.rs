//! Lenient query-parameter normalization.
//!
//! Nothing here rejects a request: malformed values fall back to defaults or
//! are treated as absent.

use crate::repository::PeakRange;

/// Raw query-string pairs in arrival order.
///
/// A repeated key resolves to its first value, so `?limit=5&limit=10` reads as 5.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    #[must_use]
    pub fn first(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Absent uses `default`; otherwise true only for `"1"` or any casing of `"true"`.
#[must_use]
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
    }
}

/// Accepts only `YYYY-MM-DD` (after trimming). Shape is checked, not calendar validity.
#[must_use]
pub fn parse_date_only(value: Option<&str>) -> Option<&str> {
    let trimmed = value?.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    well_formed.then_some(trimmed)
}

/// Positive integer with a fallback and an upper clamp.
///
/// Reads the leading decimal digits after optional whitespace and sign, so
/// `"12abc"` is 12. Missing digits, zero and negatives fall back to `default`;
/// anything above `max`, including values too large to represent, becomes `max`.
#[must_use]
pub fn parse_positive_int(value: Option<&str>, default: u64, max: u64) -> u64 {
    let Some(raw) = value else {
        return default;
    };

    let raw = raw.trim_start();
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return default;
    }

    match unsigned[..digits_len].parse::<u64>() {
        Ok(0) => default,
        Ok(n) => n.min(max),
        Err(_) => max,
    }
}

/// `hasData` is honoured only when exactly `"0"` or `"1"`.
#[must_use]
pub fn parse_has_data(value: Option<&str>) -> Option<i32> {
    match value {
        Some("0") => Some(0),
        Some("1") => Some(1),
        _ => None,
    }
}

/// Normalized `peakStart`/`peakEnd` pair as an inclusive whole-day range.
#[must_use]
pub fn peak_range(peak_start: Option<&str>, peak_end: Option<&str>) -> PeakRange {
    PeakRange::from_dates(parse_date_only(peak_start), parse_date_only(peak_end))
}

/// Path segments arrive percent-decoded; blank after trimming means missing.
#[must_use]
pub fn clean_path_segment(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|s| !s.is_empty())
}
