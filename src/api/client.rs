use anyhow::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

use crate::api::ApiError;
use crate::models::{GroupedRequest, Offer};

pub fn create_client(timeout_seconds: u64) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(concat!("tee-time-grid/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(2)
        .build()?;

    Ok(client)
}

/// HTTP client for the two aggregation-server endpoints.
pub struct TeeTimeClient {
    client: Client,
    base_url: String,
}

impl TeeTimeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Fetch the flat offer list for the given filter state.
    pub async fn fetch_grouped(&self, request: &GroupedRequest) -> Result<Vec<Offer>, ApiError> {
        let url = format!("{}/get_ttime_grouped", self.base_url);
        debug!(
            "Requesting tee times {}..{}",
            request.start_date, request.end_date
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        response.json().await.map_err(ApiError::Decode)
    }

    /// Fetch the full club-name catalog used by the settings modal.
    pub async fn fetch_all_clubs(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/get_all_golfclubs", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        response.json().await.map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request_without_hour_filter() -> GroupedRequest {
        GroupedRequest {
            start_date: "2025-07-10".to_string(),
            end_date: "2025-07-11".to_string(),
            hour_range: None,
            favorite_clubs: vec!["레이크힐스".to_string()],
        }
    }

    #[tokio::test]
    async fn fetch_grouped_sends_null_hour_range_and_parses_offers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get_ttime_grouped"))
            .and(body_json(json!({
                "start_date": "2025-07-10",
                "end_date": "2025-07-11",
                "hour_range": null,
                "favorite_clubs": ["레이크힐스"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "date": "07/10",
                    "hour": "09시대",
                    "golf": "레이크힐스",
                    "price": 95000,
                    "source": "teescan",
                    "url": "https://www.teescanner.com/"
                }
            ])))
            .mount(&server)
            .await;

        let api = TeeTimeClient::new(create_client(5).unwrap(), server.uri());
        let offers = api
            .fetch_grouped(&request_without_hour_filter())
            .await
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].golf, "레이크힐스");
        assert_eq!(offers[0].source, Source::Teescan);
    }

    #[tokio::test]
    async fn fetch_grouped_reports_http_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get_ttime_grouped"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = TeeTimeClient::new(create_client(5).unwrap(), server.uri());
        let err = api
            .fetch_grouped(&request_without_hour_filter())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn fetch_grouped_reports_malformed_bodies() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get_ttime_grouped"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = TeeTimeClient::new(create_client(5).unwrap(), server.uri());
        let err = api
            .fetch_grouped(&request_without_hour_filter())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_all_clubs_parses_name_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get_all_golfclubs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!(["남촌", "레이크힐스", "발안"])),
            )
            .mount(&server)
            .await;

        let api = TeeTimeClient::new(create_client(5).unwrap(), server.uri());
        let clubs = api.fetch_all_clubs().await.unwrap();

        assert_eq!(clubs, vec!["남촌", "레이크힐스", "발안"]);
    }
}
