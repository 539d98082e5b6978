//! Utility functions and helpers

/// Format a price in its shortest form, keeping at least one decimal
/// (`15.0`, `12.99`, `7.5`).
pub fn format_price(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Calculate percentage change relative to `old_value`.
///
/// Returns `None` when the baseline is zero or either side is not finite.
pub fn calculate_percentage_change(old_value: f64, new_value: f64) -> Option<f64> {
    if old_value == 0.0 || !old_value.is_finite() || !new_value.is_finite() {
        return None;
    }
    Some(((new_value - old_value) / old_value) * 100.0)
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.99), "12.99");
        assert_eq!(format_price(15.0), "15.0");
        assert_eq!(format_price(7.5), "7.5");
        assert_eq!(format_price(0.0), "0.0");
    }

    #[test]
    fn test_calculate_percentage_change() {
        let pct = calculate_percentage_change(10.0, 12.5).unwrap();
        assert!((pct - 25.0).abs() < 1e-9);

        let pct = calculate_percentage_change(10.0, 8.0).unwrap();
        assert!((pct + 20.0).abs() < 1e-9);

        assert!(calculate_percentage_change(0.0, 5.0).is_none());
        assert!(calculate_percentage_change(f64::NAN, 5.0).is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("AT&T <Plus>"), "AT&amp;T &lt;Plus&gt;");
        assert_eq!(escape_html("Netflix"), "Netflix");
    }
}
