use once_cell::sync::Lazy;
use regex::Regex;

static HOUR_BUCKET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})시대").expect("Invalid hour bucket regex")
});

/// Extract the numeric hour bucket from a label like `"09시대"`.
/// Labels without a recognizable bucket count as 0.
pub fn hour_bucket(hour: &str) -> u32 {
    HOUR_BUCKET_REGEX
        .captures(hour)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
