/// Group digits in threes with dots: `1234567` -> `"1.234.567"`
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Money amount with two decimals and its currency code, e.g. `"112.00 INR"`
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(112.0, "INR"), "112.00 INR");
        assert_eq!(format_price(99.5, "USD"), "99.50 USD");
    }
}
