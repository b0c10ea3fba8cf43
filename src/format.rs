//! Display helpers for summary output.

use time::OffsetDateTime;
use time::macros::format_description;

/// Groups a Korean phone number with dashes.
///
/// Mobile and regional numbers use 3-3/4-4 grouping, Seoul numbers (`02`)
/// use 2-3/4-4 and eight-digit representative numbers use 4-4. Anything else
/// is returned unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let groups: &[usize] = match (digits.len(), digits.starts_with("02")) {
        (9, true) => &[2, 3, 4],
        (10, true) => &[2, 4, 4],
        (10, false) => &[3, 3, 4],
        (11, false) => &[3, 4, 4],
        (8, false) if !digits.starts_with('0') => &[4, 4],
        _ => return raw.to_string(),
    };

    let mut parts = Vec::with_capacity(groups.len());
    let mut start = 0;
    for len in groups {
        parts.push(&digits[start..start + len]);
        start += len;
    }
    parts.join("-")
}

/// `1234567` → `1,234,567`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_duration_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn format_datetime(value: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    value
        .format(&format)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn phone_grouping() {
        assert_eq!(format_phone("01012345678"), "010-1234-5678");
        assert_eq!(format_phone("010-1234-5678"), "010-1234-5678");
        assert_eq!(format_phone("0212345678"), "02-1234-5678");
        assert_eq!(format_phone("021234567"), "02-123-4567");
        assert_eq!(format_phone("0311234567"), "031-123-4567");
        assert_eq!(format_phone("15881234"), "1588-1234");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn amount_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
        assert_eq!(format_amount(-50_000), "-50,000");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration_minutes(45), "45m");
        assert_eq!(format_duration_minutes(120), "2h");
        assert_eq!(format_duration_minutes(90), "1h 30m");
    }

    #[test]
    fn datetimes() {
        assert_eq!(
            format_datetime(datetime!(2024-05-01 14:30:59 UTC)),
            "2024-05-01 14:30"
        );
    }
}
