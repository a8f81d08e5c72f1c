use serde::{Deserialize, Serialize};

use super::Source;

/// One club/date/hour/price record as returned by the aggregation server.
///
/// `date` is formatted `MM/DD`, `hour` is an hour-of-day bucket label like
/// `"09시대"`, and `price` is a positive amount in won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub date: String,
    pub hour: String,
    pub golf: String,
    pub price: i64,
    pub source: Source,
    pub url: String,
}

/// Request body for `POST /get_ttime_grouped`.
///
/// `hour_range` serializes as JSON `null` when no hour filter is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRequest {
    pub start_date: String,
    pub end_date: String,
    pub hour_range: Option<Vec<u32>>,
    pub favorite_clubs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hour_filter_serializes_as_null() {
        let request = GroupedRequest {
            start_date: "2025-07-10".to_string(),
            end_date: "2025-07-10".to_string(),
            hour_range: None,
            favorite_clubs: vec![],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value["hour_range"].is_null());
    }

    #[test]
    fn deserializes_server_offer() {
        let offer: Offer = serde_json::from_str(
            r#"{
                "date": "07/10",
                "hour": "09시대",
                "golf": "레이크힐스",
                "price": 95000,
                "source": "teescan",
                "url": "https://www.teescanner.com/"
            }"#,
        )
        .unwrap();

        assert_eq!(offer.golf, "레이크힐스");
        assert_eq!(offer.price, 95000);
        assert_eq!(offer.source, Source::Teescan);
    }
}
