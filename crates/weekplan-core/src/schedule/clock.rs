//! Conversion between `HH:MM` clock strings and fractional day hours.

use crate::error::ValidationError;

/// Parse an editor clock string into fractional hours (`H + M/60`).
///
/// Hours are one or two digits and minutes exactly two. A missing minute
/// part counts as zero, so `"9"` is `9.0`. `"24:00"` is accepted as the end
/// of the day.
pub fn parse_clock(input: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidClock(input.to_string());
    let trimmed = input.trim();

    let (hours, minutes) = match trimmed.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (trimmed, None),
    };

    if !is_digits(hours, 1..=2) {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = match minutes {
        Some("") | None => 0,
        Some(m) if is_digits(m, 2..=2) => m.parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return Err(invalid());
    }

    Ok(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// ASCII digits only, with a length in `len`. Rejects signs and whitespace.
fn is_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Format fractional hours as a zero-padded `HH:MM` string.
///
/// Minutes are rounded to the nearest whole minute; a rounding that reaches
/// 60 carries into the hour.
pub fn format_clock(hours: f64) -> String {
    let clamped = hours.clamp(0.0, 24.0);
    let mut h = clamped.floor() as u32;
    let mut m = ((clamped - clamped.floor()) * 60.0).round() as u32;
    if m == 60 {
        h += 1;
        m = 0;
    }
    format!("{h:02}:{m:02}")
}
