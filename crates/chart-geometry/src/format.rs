// File: crates/chart-geometry/src/format.rs
// Summary: Label text: key humanising, default number formatting, value-to-string.

use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// `monthlyRevenue`, `monthly_revenue` and `monthly-revenue` all become `Monthly Revenue`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// At most two decimals, trailing zeros trimmed, thousands grouped: `12345.5` -> `12,345.5`.
/// Integer parts too wide for `u128` fall back to exponent notation.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();
    let mut whole = abs.trunc();
    let mut cents = ((abs - whole) * 100.0).round() as u32;
    if cents >= 100 {
        whole += 1.0;
        cents = 0;
    }
    let sign = if value < 0.0 && (whole > 0.0 || cents > 0) { "-" } else { "" };
    if whole >= u128::MAX as f64 {
        return format!("{sign}{abs:e}");
    }

    let grouped = (whole as u128).to_formatted_string(&Locale::en);
    let frac = format!("{cents:02}");
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
}

/// Percentage text for a `0..=1` share: `0.1666` -> `16.7%`.
pub fn format_percent(share: f64) -> String {
    let pct = (share * 1000.0).round() / 10.0;
    if pct.fract() == 0.0 { format!("{pct:.0}%") } else { format!("{pct:.1}%") }
}

/// Display text for a raw record field; `None` for null, missing or blank values.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
