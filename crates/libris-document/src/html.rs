// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small text helpers shared by the formatters.

use chrono::NaiveDate;

/// Currency glyph printed before every amount.
pub const CURRENCY: &str = "\u{20b9}";

/// Escape text for interpolation into element content or quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `₹12.50` style money text. Always two decimals.
pub fn money(amount: f64) -> String {
    // Half away from zero; `{:.2}` alone rounds half to even.
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{CURRENCY}{rounded:.2}")
}

/// `DD/MM/YYYY`.
pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(12.5), "\u{20b9}12.50");
        assert_eq!(money(0.0), "\u{20b9}0.00");
        assert_eq!(money(3.456), "\u{20b9}3.46");
    }

    #[test]
    fn money_rounds_halves_up_and_drops_negative_zero() {
        assert_eq!(money(0.125), "\u{20b9}0.13");
        assert_eq!(money(10.125), "\u{20b9}10.13");
        assert_eq!(money(-0.001), "\u{20b9}0.00");
        assert_eq!(money(-0.0), "\u{20b9}0.00");
        assert_eq!(money(-2.5), "\u{20b9}-2.50");
    }

    #[test]
    fn dates_are_day_first() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date(d), "05/03/2024");
    }
}
