use crate::errors::CoreError;
use crate::models::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Parses a compact duration token (`"10m"`, `"1d"`) into milliseconds.
///
/// Accepted shape is an integer count followed by one of `s`/`m`/`h`/`d`.
/// Anything else is a configuration bug and fails the calling preview.
pub fn parse_duration(token: &str) -> Result<i64, CoreError> {
    let invalid = || CoreError::InvalidDuration(token.to_string());

    let mut chars = token.chars();
    let unit = chars.next_back().ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count: i64 = digits.parse().map_err(|_| invalid())?;

    let factor = match unit {
        's' => MS_PER_SECOND,
        'm' => MS_PER_MINUTE,
        'h' => MS_PER_HOUR,
        'd' => MS_PER_DAY,
        _ => return Err(invalid()),
    };
    count.checked_mul(factor).ok_or_else(invalid)
}

/// Renders a millisecond interval as a human label. Total over all `i64`
/// inputs; bands are evaluated top to bottom, first match wins.
///
/// Boundary values of exactly one week/month/year come out as `"1 weeks"`
/// etc. Only the one-day case is singular; callers rely on the labels as-is.
pub fn format_interval(ms: i64) -> String {
    if ms < 0 {
        return "overdue".to_string();
    }
    if ms < MS_PER_SECOND {
        return "now".to_string();
    }
    if ms < MS_PER_MINUTE {
        return format!("{}s", round_div(ms, MS_PER_SECOND));
    }
    if ms < MS_PER_HOUR {
        return format!("{}m", round_div(ms, MS_PER_MINUTE));
    }
    if ms < MS_PER_DAY {
        return format!("{}h", round_div(ms, MS_PER_HOUR));
    }

    let days = round_div(ms, MS_PER_DAY);
    if days == 1 {
        "1 day".to_string()
    } else if days < 7 {
        format!("{days} days")
    } else if days < 30 {
        format!("{} weeks", round_div(days, 7))
    } else if days < 365 {
        format!("{} months", round_div(days, 30))
    } else {
        format!("{} years", round_div(days, 365))
    }
}

// Round-half-up division for non-negative n.
fn round_div(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}
