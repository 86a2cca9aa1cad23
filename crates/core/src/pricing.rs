//! Indian-notation price formatting.
//!
//! Prices are whole rupees. Grouping follows the Indian numbering system:
//! the last three digits form a group, every pair above that gets its own
//! comma (`12,34,567`). Compact form uses lakh (1,00,000) and crore
//! (1,00,00,000) suffixes.

/// One lakh in rupees.
pub const LAKH: i64 = 100_000;

/// One crore in rupees.
pub const CRORE: i64 = 10_000_000;

/// Format a rupee amount with Indian digit grouping, e.g. `₹12,34,567`.
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let bytes = head.as_bytes();
        let mut start = 0;
        // The leading group may be a single digit; every following one is a
        // pair.
        let first_len = if head.len() % 2 == 1 { 1 } else { 2 };
        let mut len = first_len;
        while start < head.len() {
            parts.push(std::str::from_utf8(&bytes[start..start + len]).unwrap_or_default());
            start += len;
            len = 2;
        }
        format!("{},{}", parts.join(","), tail)
    };

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Format a rupee amount compactly: `₹75 L`, `₹1.25 Cr`.
///
/// Amounts under one lakh fall back to full grouping. At most two decimal
/// places, trailing zeros trimmed.
pub fn format_inr_compact(amount: i64) -> String {
    if amount < 0 {
        return format!("-{}", format_inr_compact(-amount));
    }
    if amount >= CRORE {
        format!("₹{} Cr", trim_decimal(amount as f64 / CRORE as f64))
    } else if amount >= LAKH {
        format!("₹{} L", trim_decimal(amount as f64 / LAKH as f64))
    } else {
        format_inr(amount)
    }
}

/// Display form of a nullable price: `None` is "price on request".
pub fn display_price(price: Option<i64>) -> String {
    match price {
        Some(amount) => format_inr(amount),
        None => "Price on Request".to_string(),
    }
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_grouping() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn indian_grouping_pairs_above_thousands() {
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(45_000), "₹45,000");
        assert_eq!(format_inr(1_23_456), "₹1,23,456");
        assert_eq!(format_inr(12_34_567), "₹12,34,567");
        assert_eq!(format_inr(1_23_45_678), "₹1,23,45,678");
        assert_eq!(format_inr(95_000_000), "₹9,50,00,000");
    }

    #[test]
    fn negative_amounts_keep_grouping() {
        assert_eq!(format_inr(-12_34_567), "-₹12,34,567");
    }

    #[test]
    fn compact_lakhs() {
        assert_eq!(format_inr_compact(7_500_000), "₹75 L");
        assert_eq!(format_inr_compact(150_000), "₹1.5 L");
        assert_eq!(format_inr_compact(100_000), "₹1 L");
    }

    #[test]
    fn compact_crores() {
        assert_eq!(format_inr_compact(12_500_000), "₹1.25 Cr");
        assert_eq!(format_inr_compact(10_000_000), "₹1 Cr");
        assert_eq!(format_inr_compact(95_000_000), "₹9.5 Cr");
    }

    #[test]
    fn compact_below_a_lakh_falls_back() {
        assert_eq!(format_inr_compact(45_000), "₹45,000");
    }

    #[test]
    fn display_price_handles_on_request() {
        assert_eq!(display_price(Some(6_800_000)), "₹68,00,000");
        assert_eq!(display_price(None), "Price on Request");
    }
}
