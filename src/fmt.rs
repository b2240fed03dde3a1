/// Format an amount with a currency symbol and thousands separators: ₹1,234.56
pub fn money(val: f64, symbol: &str) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

pub fn pct(val: f64) -> String {
    format!("{val:.1}%")
}

/// A fixed-width bar of `width` cells, filled in proportion to `pct`.
pub fn bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56, "$"), "$1,234.56");
        assert_eq!(money(-500.00, "$"), "-$500.00");
        assert_eq!(money(0.0, "\u{20b9}"), "\u{20b9}0.00");
        assert_eq!(money(1000000.99, "$"), "$1,000,000.99");
        assert_eq!(money(2500.0, "\u{20b9}"), "\u{20b9}2,500.00");
    }

    #[test]
    fn test_pct_and_bar() {
        assert_eq!(pct(72.7272), "72.7%");
        assert_eq!(pct(0.0), "0.0%");
        assert_eq!(bar(50.0, 10).chars().filter(|c| *c == '\u{2588}').count(), 5);
        assert_eq!(bar(150.0, 4), "\u{2588}".repeat(4));
        assert_eq!(bar(0.0, 3), "\u{2591}".repeat(3));
    }
}
