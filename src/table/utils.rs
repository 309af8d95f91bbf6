/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parse an integer cell. Float literals are accepted when they carry no
/// fractional part, since spreadsheet exports often write `3.0` for `3`.
pub fn parse_integer(s: &str) -> Result<i64, String> {
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }
    let f: f64 = s.parse().map_err(|_| "not an integer".to_string())?;
    if f.fract() != 0.0 || !f.is_finite() {
        return Err("has a fractional part".into());
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err("out of range".into());
    }
    Ok(f as i64)
}

/// Parse a boolean cell, case-insensitive.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
