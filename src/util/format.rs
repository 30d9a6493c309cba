//! Display formatting for phone numbers, credits, and dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Format a Brazilian phone number for display.
///
/// Eleven digits become `(11) 98765-4321`, ten become `(11) 3456-7890`, and
/// a leading `55` country code is dropped first. Anything else is returned
/// unchanged.
pub fn format_phone(raw: &str) -> String {
    let mut digits = digits_only(raw);
    if digits.len() > 11 && digits.starts_with("55") {
        digits.drain(..2);
    }
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => raw.to_owned(),
    }
}

/// Percentage of `limit` consumed by `used`, clamped to 0..=100.
pub fn usage_percent(used: u32, limit: u32) -> u8 {
    if limit == 0 {
        return if used > 0 { 100 } else { 0 };
    }
    let pct = (u64::from(used) * 100 / u64::from(limit)).min(100);
    u8::try_from(pct).unwrap_or(100)
}

/// Date part (`YYYY-MM-DD`) of an ISO-8601 timestamp, shown as `DD/MM/YYYY`.
pub fn short_date(timestamp: &str) -> String {
    let date = timestamp.get(..10).unwrap_or(timestamp);
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
            format!("{d}/{m}/{y}")
        }
        _ => timestamp.to_owned(),
    }
}

/// Price in reais as `R$ 49,90`.
pub fn brl(amount: f64) -> String {
    format!("R$ {amount:.2}").replace('.', ",")
}
