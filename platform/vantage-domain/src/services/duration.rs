/// Parses `"45"`, `"30s"`, `"5m"`, `"2h"`, `"1d"`, `"1w"` (and the long
/// `min`/`hour`/`day`/`week` spellings) into seconds.
pub fn parse_duration_like_seconds(value: &str) -> Result<i64, String> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(seconds) = trimmed.parse::<i64>() {
        if seconds < 0 {
            return Err(format!("negative duration: {value}"));
        }
        return Ok(seconds);
    }

    let (number_part, unit) = if let Some(stripped) = trimmed.strip_suffix("min") {
        (stripped, "m")
    } else if let Some(stripped) = trimmed.strip_suffix("hour") {
        (stripped, "h")
    } else if let Some(stripped) = trimmed.strip_suffix("day") {
        (stripped, "d")
    } else if let Some(stripped) = trimmed.strip_suffix("week") {
        (stripped, "w")
    } else {
        let split = trimmed
            .char_indices()
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        trimmed.split_at(split)
    };

    let multiplier = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        _ => return Err(format!("unsupported duration unit: {unit}")),
    };

    let number: i64 = number_part
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {value}"))?;
    if number < 0 {
        return Err(format!("negative duration: {value}"));
    }
    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration overflows: {value}"))
}

/// Compact label with the two most significant units: `"1d 2h"`, `"3h 5m"`, `"42s"`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let units = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

    let mut parts = Vec::with_capacity(2);
    let mut remaining = seconds;
    for (size, label) in units {
        let count = remaining / size;
        remaining %= size;
        if count > 0 || !parts.is_empty() {
            parts.push(format!("{count}{label}"));
        }
        if parts.len() == 2 {
            break;
        }
    }

    match parts.as_slice() {
        [] => "0s".to_string(),
        [only] => only.clone(),
        [major, minor] if minor.starts_with('0') => major.clone(),
        _ => parts.join(" "),
    }
}
