// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use crate::core::error::ParseError;

/// Parse a duration string like "500ms", "5m", "1h", "30s", or "1h 30m 15s"
pub fn parse_duration(s: &str) -> Result<Duration, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut total_ms = 0u64;

    for part in trimmed.split_whitespace() {
        // Find where the number ends and unit begins
        let split_pos = part
            .chars()
            .position(|c| !c.is_ascii_digit())
            .ok_or_else(|| ParseError::MissingUnit(part.to_string()))?;

        let (num_str, unit) = part.split_at(split_pos);
        let num: u64 = num_str
            .parse()
            .map_err(|_| ParseError::InvalidNumber(num_str.to_string()))?;

        let multiplier = match unit.to_lowercase().as_str() {
            "ms" | "msec" | "msecs" | "millis" | "millisecond" | "milliseconds" => 1,
            "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
            "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
            "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
            _ => return Err(ParseError::UnknownUnit(unit.to_string())),
        };

        total_ms = num
            .checked_mul(multiplier)
            .and_then(|ms| total_ms.checked_add(ms))
            .ok_or_else(|| ParseError::InvalidNumber(num_str.to_string()))?;
    }

    if total_ms == 0 {
        return Err(ParseError::Zero);
    }

    Ok(Duration::from_millis(total_ms))
}

/// Format a duration into a human-readable string, down to milliseconds
pub fn format_duration_readable(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let hours = total_ms / 3_600_000;
    let mins = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;

    let parts: Vec<String> = [(hours, "h"), (mins, "m"), (secs, "s"), (ms, "ms")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect();

    if parts.is_empty() {
        "0ms".to_string()
    } else {
        parts.join(" ")
    }
}
