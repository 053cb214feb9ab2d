use serde::Serialize;

use crate::error::ValidationError;

/// Upper bound for a focus phase, in minutes.
pub const MAX_FOCUS_MINUTES: i64 = 120;
/// Upper bound for a break phase, in minutes.
pub const MAX_BREAK_MINUTES: i64 = 60;

/// Outcome of a command that may be refused without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Accepted,
    Rejected,
}

impl Acceptance {
    pub fn is_accepted(self) -> bool {
        self == Acceptance::Accepted
    }
}

impl From<bool> for Acceptance {
    fn from(accepted: bool) -> Self {
        if accepted {
            Acceptance::Accepted
        } else {
            Acceptance::Rejected
        }
    }
}

/// Focus and break durations.
///
/// Both durations are always positive and within their bounds; the only
/// constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerConfig {
    focus_secs: u64,
    break_secs: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

impl TimerConfig {
    /// Build from minutes, rejecting anything outside `1..=120` / `1..=60`.
    pub fn from_minutes(focus_min: i64, break_min: i64) -> Result<Self, ValidationError> {
        check_bounds("focus_minutes", focus_min, MAX_FOCUS_MINUTES)?;
        check_bounds("break_minutes", break_min, MAX_BREAK_MINUTES)?;
        Ok(Self {
            focus_secs: focus_min as u64 * 60,
            break_secs: break_min as u64 * 60,
        })
    }

    /// Build from user-entered minutes: values below 1 are refused, values
    /// above the maximum are clamped to it.
    pub fn clamped(focus_min: i64, break_min: i64) -> Option<Self> {
        if focus_min < 1 || break_min < 1 {
            return None;
        }
        Self::from_minutes(
            focus_min.min(MAX_FOCUS_MINUTES),
            break_min.min(MAX_BREAK_MINUTES),
        )
        .ok()
    }

    pub fn focus_secs(&self) -> u64 {
        self.focus_secs
    }

    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    pub fn focus_minutes(&self) -> u64 {
        self.focus_secs / 60
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_secs / 60
    }
}

fn check_bounds(field: &'static str, value: i64, max: i64) -> Result<(), ValidationError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfBounds {
            field,
            value,
            min: 1,
            max,
        })
    }
}

/// Parse a minutes field the way a number input is read: surrounding
/// whitespace is ignored and the leading integer prefix is taken
/// (`"12abc"` is 12, `"1.5"` is 1). Returns `None` when there are no digits.
pub fn parse_minutes(input: &str) -> Option<i64> {
    let s = input.trim();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overflowing digit runs saturate.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_25_5() {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.focus_secs(), 1500);
        assert_eq!(cfg.break_secs(), 300);
    }

    #[test]
    fn from_minutes_enforces_bounds() {
        assert!(TimerConfig::from_minutes(0, 5).is_err());
        assert!(TimerConfig::from_minutes(25, 0).is_err());
        assert!(TimerConfig::from_minutes(121, 5).is_err());
        assert_eq!(
            TimerConfig::from_minutes(25, 61),
            Err(ValidationError::OutOfBounds {
                field: "break_minutes",
                value: 61,
                min: 1,
                max: 60,
            })
        );
        let cfg = TimerConfig::from_minutes(120, 60).unwrap();
        assert_eq!(cfg.focus_minutes(), 120);
        assert_eq!(cfg.break_minutes(), 60);
    }

    #[test]
    fn clamped_caps_large_values() {
        let cfg = TimerConfig::clamped(500, 90).unwrap();
        assert_eq!(cfg.focus_secs(), 120 * 60);
        assert_eq!(cfg.break_secs(), 60 * 60);
        assert!(TimerConfig::clamped(0, 10).is_none());
        assert!(TimerConfig::clamped(10, -3).is_none());
    }

    #[test]
    fn parse_minutes_takes_integer_prefix() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("  40 "), Some(40));
        assert_eq!(parse_minutes("12abc"), Some(12));
        assert_eq!(parse_minutes("1.5"), Some(1));
        assert_eq!(parse_minutes("-4"), Some(-4));
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("-"), None);
        assert_eq!(parse_minutes("99999999999999999999999"), Some(i64::MAX));
    }
}
