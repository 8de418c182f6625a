//! Shared formatting helpers.

use chrono::NaiveDate;

/// Formats an integer with `,` thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
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

/// Formats a date as `mm-YYYY` for month axis labels.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%m-%Y").to_string()
}

/// English ordinal suffix for `n` (`st`, `nd`, `rd`, `th`).
pub fn ordinal_suffix(n: u64) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `n` followed by its ordinal suffix, e.g. `25th`.
pub fn ordinal(n: u64) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_210), "-45,210");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_month() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 28).unwrap();
        assert_eq!(format_month(date), "03-2020");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(25), "25th");
        assert_eq!(ordinal(100), "100th");
        assert_eq!(ordinal(113), "113th");
    }
}
