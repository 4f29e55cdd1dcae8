// Author: Dustin Pilgrim
// License: MIT

use crate::core::error::Error;

pub const MAX_HOURS: i64 = 99;
pub const MAX_MINUTES: i64 = 59;
pub const MAX_SECONDS: i64 = 59;

/// Hours / minutes / seconds fields as typed by a user.
///
/// Each field is clamped on its own: hours to 0..=99, minutes and seconds
/// to 0..=59. Out-of-range input is pulled into range, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationInput {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    pub fn clamped(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours: hours.clamp(0, MAX_HOURS) as u64,
            minutes: minutes.clamp(0, MAX_MINUTES) as u64,
            seconds: seconds.clamp(0, MAX_SECONDS) as u64,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn from_total(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

/// `HH:MM:SS`, zero padded.
pub fn format_hms(total: u64) -> String {
    let d = DurationInput::from_total(total);
    format!("{:02}:{:02}:{:02}", d.hours, d.minutes, d.seconds)
}

/// Parse a duration the way users type them.
///
/// Accepts clock forms (`SS`, `MM:SS`, `HH:MM:SS`) and unit forms such as
/// `90s`, `25m`, `1h30m` or `1h 30m 15s`. Clock fields go through the same
/// clamping as the interactive inputs; a leading `-` clamps to zero.
pub fn parse_duration(s: &str) -> Result<u64, Error> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidDuration(s.to_string()));
    }

    if trimmed.contains(':') {
        return parse_clock(trimmed);
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n.max(0) as u64);
    }

    parse_units(trimmed)
}

fn parse_clock(s: &str) -> Result<u64, Error> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    let nums = parts
        .iter()
        .map(|p| p.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidDuration(s.to_string()))?;

    let input = match nums.as_slice() {
        [m, s] => DurationInput::clamped(0, *m, *s),
        [h, m, s] => DurationInput::clamped(*h, *m, *s),
        _ => return Err(Error::InvalidDuration(s.to_string())),
    };

    Ok(input.total_seconds())
}

fn parse_units(s: &str) -> Result<u64, Error> {
    let mut total = 0u64;
    let mut digits = String::new();
    let mut unit = String::new();

    let mut flush = |digits: &mut String, unit: &mut String| -> Result<(), Error> {
        if digits.is_empty() {
            return Err(Error::InvalidDuration(s.to_string()));
        }
        let n: u64 = digits
            .parse()
            .map_err(|_| Error::InvalidDuration(s.to_string()))?;
        let multiplier = match unit.to_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => 1,
            "m" | "min" | "mins" | "minute" | "minutes" => 60,
            "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
            _ => return Err(Error::InvalidDuration(s.to_string())),
        };
        total = total.saturating_add(n.saturating_mul(multiplier));
        digits.clear();
        unit.clear();
        Ok(())
    };

    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_ascii_digit() {
            if !unit.is_empty() {
                flush(&mut digits, &mut unit)?;
            }
            digits.push(c);
        } else {
            unit.push(c);
        }
    }
    flush(&mut digits, &mut unit)?;

    Ok(total)
}
