/// Format a won amount in units of 10,000 won with one decimal place,
/// the way the grid displays prices: 95000 -> "9.5".
pub fn format_man_won(price: i64) -> String {
    format!("{:.1}", price as f64 / 10000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_to_one_decimal() {
        assert_eq!(format_man_won(95000), "9.5");
        assert_eq!(format_man_won(100000), "10.0");
        assert_eq!(format_man_won(123456), "12.3");
        assert_eq!(format_man_won(9000), "0.9");
    }
}
