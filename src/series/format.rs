//! Display formatting for axis labels, tooltips, and summary values.

/// Separator between the date and time parts of an ISO-8601 bucket key.
const DATE_TIME_SEPARATOR: char = 'T';

/// `HH:MM` sits at this character offset in `YYYY-MM-DDTHH:MM...`.
const TIME_OFFSET: usize = 11;
const TIME_WIDTH: usize = 5;

/// Format a bucket key for axis labels and tooltip headers.
///
/// Keys with a date/time separator are reduced to their `HH:MM` part;
/// anything else is shown as-is. Short keys yield whatever characters remain.
pub fn format_hour(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    if key.contains(DATE_TIME_SEPARATOR) {
        return key.chars().skip(TIME_OFFSET).take(TIME_WIDTH).collect();
    }
    key.to_string()
}

/// Format a count with comma grouping and at most three fractional digits.
pub fn format_count(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Ties round away from zero; `{:.3}` alone rounds exact ties to even.
    let rounded = format!("{:.3}", (value.abs() * 1000.0).round() / 1000.0);
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
