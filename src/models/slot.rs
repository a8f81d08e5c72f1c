use chrono::NaiveDate;

use crate::parsers::hour_bucket;

/// Year used to anchor `MM/DD` labels for calendar comparison.
pub const REFERENCE_YEAR: i32 = 2025;

/// Identifies one grid row: a date label plus an hour-bucket label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub date: String,
    pub hour: String,
}

impl SlotKey {
    pub fn new(date: impl Into<String>, hour: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            hour: hour.into(),
        }
    }

    /// Row label as displayed, e.g. `"07/10 09시대"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.date, self.hour)
    }

    /// Ordering key: calendar date first, then numeric hour bucket.
    /// An unparseable date sorts before every well-formed one; a
    /// malformed hour label counts as bucket 0.
    pub fn sort_key(&self) -> (NaiveDate, u32) {
        (self.calendar_date(), hour_bucket(&self.hour))
    }

    fn calendar_date(&self) -> NaiveDate {
        let mut parts = self.date.splitn(2, '/');
        let month = parts.next().and_then(|p| p.parse().ok());
        let day = parts.next().and_then(|p| p.parse().ok());
        match (month, day) {
            (Some(m), Some(d)) => {
                NaiveDate::from_ymd_opt(REFERENCE_YEAR, m, d).unwrap_or(NaiveDate::MIN)
            }
            _ => NaiveDate::MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets_compare_numerically() {
        let nine = SlotKey::new("07/10", "9시대");
        let fourteen = SlotKey::new("07/10", "14시대");
        assert!(nine.sort_key() < fourteen.sort_key());
    }

    #[test]
    fn dates_compare_across_months() {
        let july = SlotKey::new("07/31", "14시대");
        let august = SlotKey::new("08/01", "5시대");
        assert!(july.sort_key() < august.sort_key());
    }

    #[test]
    fn malformed_hour_counts_as_bucket_zero() {
        let broken = SlotKey::new("07/10", "midnight");
        let five = SlotKey::new("07/10", "05시대");
        assert!(broken.sort_key() < five.sort_key());
    }

    #[test]
    fn malformed_date_sorts_first() {
        let broken = SlotKey::new("soon", "09시대");
        let real = SlotKey::new("01/01", "09시대");
        assert!(broken.sort_key() < real.sort_key());
    }

    #[test]
    fn label_joins_date_and_hour() {
        assert_eq!(SlotKey::new("07/10", "09시대").label(), "07/10 09시대");
    }
}
