//! Formatting helpers for chart labels and tables.

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202f}');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(fraction: f64) -> String {
    if fraction.is_finite() {
        format!("{:.0}%", fraction * 100.0)
    } else {
        "—".to_string()
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "—".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(1234), "1\u{202f}234");
        assert_eq!(format_count(1234567), "1\u{202f}234\u{202f}567");
    }

    #[test]
    fn non_finite_values_render_dash() {
        assert_eq!(format_percent(f64::NAN), "—");
        assert_eq!(format_number(f64::INFINITY, 1), "—");
        assert_eq!(format_percent(0.25), "25%");
        assert_eq!(format_number(62.456, 1), "62.5");
    }
}
