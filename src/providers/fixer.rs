use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument};

use crate::core::error::RateError;
use crate::core::provider::{DailyRates, RateProvider};
use crate::core::rates::RateTable;

/// The anchor currency the free tier serves; the client never selects it.
pub const ANCHOR: &str = "EUR";

/// Client for a fixer.io-style exchange-rate API.
pub struct FixerProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl FixerProvider {
    pub fn new(base_url: &str, api_key: Option<String>, premium: bool) -> Result<Self> {
        // Paid plans get TLS; the free tier rejects it.
        let base_url = if premium && base_url.starts_with("http://") {
            base_url.replacen("http://", "https://", 1)
        } else {
            base_url.to_string()
        };

        let client = reqwest::Client::builder().user_agent("valuta/0.1").build()?;
        Ok(FixerProvider {
            base_url,
            api_key,
            client,
        })
    }

    fn api_key(&self) -> Result<&str, RateError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(RateError::MissingApiKey),
        }
    }

    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<FixerResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Requesting rates from {url}");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RateError::Transport {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: FixerResponse = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse rate response: {body}"))?;

        if !parsed.success {
            let message = parsed
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown provider error".to_string());
            return Err(RateError::Provider { message }.into());
        }

        Ok(parsed)
    }
}

#[derive(Deserialize, Debug)]
struct FixerResponse {
    success: bool,
    #[serde(default)]
    rates: HashMap<String, f64>,
    error: Option<FixerApiError>,
}

#[derive(Deserialize, Debug)]
struct FixerApiError {
    code: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

impl fmt::Display for FixerApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code {}: {}",
            self.code.map_or("?".to_string(), |c| c.to_string()),
            self.kind.as_deref().unwrap_or("unknown")
        )?;
        if let Some(info) = &self.info {
            write!(f, " ({info})")?;
        }
        Ok(())
    }
}

#[async_trait]
impl RateProvider for FixerProvider {
    #[instrument(name = "FixerLatest", skip(self))]
    async fn latest_rates(&self) -> Result<RateTable> {
        let key = self.api_key()?;

        let data = self.fetch("latest", &[("access_key", key)]).await?;
        let mut table = RateTable::from_rates(data.rates.into_iter().collect());
        if table.get(ANCHOR).is_none() {
            table.insert(ANCHOR, 1.0);
        }
        Ok(table)
    }

    #[instrument(name = "FixerHistory", skip(self))]
    async fn historical_rates(&self, base: &str, quote: &str, days: u32) -> Result<DailyRates> {
        if days < 1 {
            return Err(RateError::InvalidDayCount(i64::from(days)).into());
        }
        let key = self.api_key()?;

        let symbols = format!("{base},{quote}");
        let today = Utc::now().date_naive();
        let mut daily = DailyRates::new();
        for offset in 0..days {
            let date = today - Duration::days(i64::from(offset));
            let endpoint = date.format("%Y-%m-%d").to_string();
            let data = self
                .fetch(&endpoint, &[("access_key", key), ("symbols", &symbols)])
                .await?;
            daily.insert(date, data.rates);
        }
        Ok(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> FixerProvider {
        FixerProvider::new(base_url, Some("test-key".to_string()), false).unwrap()
    }

    #[tokio::test]
    async fn test_successful_latest_fetch() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "success": true,
            "base": "EUR",
            "rates": { "CHF": 0.96, "EUR": 1.0, "USD": 1.08 }
        }"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("access_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let table = provider(&mock_server.uri()).latest_rates().await.unwrap();
        assert_eq!(table.get("CHF"), Some(0.96));
        assert_eq!(table.get("USD"), Some(1.08));
        assert_eq!(table.get("EUR"), Some(1.0));
    }

    #[tokio::test]
    async fn test_anchor_defaulted_when_omitted() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "success": true,
            "rates": { "CHF": 0.96, "USD": 1.08 }
        }"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let table = provider(&mock_server.uri()).latest_rates().await.unwrap();
        assert_eq!(table.get("EUR"), Some(1.0));
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        for api_key in [None, Some("".to_string()), Some("   ".to_string())] {
            let provider = FixerProvider::new(&mock_server.uri(), api_key, false).unwrap();
            let err = provider.latest_rates().await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RateError>(),
                Some(RateError::MissingApiKey)
            ));
        }
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri())
            .latest_rates()
            .await
            .unwrap_err();
        match err.downcast_ref::<RateError>() {
            Some(RateError::Transport { status, body }) => {
                assert_eq!(*status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_error_payload_is_surfaced() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "success": false,
            "error": { "code": 101, "type": "invalid_access_key", "info": "No API Key was specified." }
        }"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri())
            .latest_rates()
            .await
            .unwrap_err();
        match err.downcast_ref::<RateError>() {
            Some(RateError::Provider { message }) => {
                assert!(message.contains("101"), "message: {message}");
                assert!(message.contains("invalid_access_key"), "message: {message}");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_historical_fetch_walks_back_from_today() {
        let mock_server = MockServer::start().await;
        let today = Utc::now().date_naive();

        let usd_by_offset = [1.08, 1.09, 1.1];
        for offset in 0..3 {
            let date = today - Duration::days(offset);
            let mock_response = format!(
                r#"{{ "success": true, "rates": {{ "CHF": 0.96, "USD": {} }} }}"#,
                usd_by_offset[offset as usize]
            );
            Mock::given(method("GET"))
                .and(path(format!("/{}", date.format("%Y-%m-%d"))))
                .and(query_param("symbols", "CHF,USD"))
                .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
                .mount(&mock_server)
                .await;
        }

        let daily = provider(&mock_server.uri())
            .historical_rates("CHF", "USD", 3)
            .await
            .unwrap();

        assert_eq!(daily.len(), 3);
        let dates: Vec<_> = daily.keys().copied().collect();
        assert_eq!(
            dates,
            vec![today - Duration::days(2), today - Duration::days(1), today]
        );
        assert_eq!(daily[&today]["USD"], 1.08);
        assert_eq!(daily[&(today - Duration::days(2))]["USD"], 1.1);
    }

    #[tokio::test]
    async fn test_historical_rejects_zero_days_without_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri())
            .historical_rates("CHF", "USD", 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RateError>(),
            Some(RateError::InvalidDayCount(0))
        ));
    }

    #[tokio::test]
    async fn test_historical_aborts_on_first_failed_day() {
        let mock_server = MockServer::start().await;
        let today = Utc::now().date_naive();

        // Only today is mounted; yesterday 404s and ends the fetch.
        Mock::given(method("GET"))
            .and(path(format!("/{}", today.format("%Y-%m-%d"))))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{ "success": true, "rates": { "CHF": 0.96, "USD": 1.08 } }"#),
            )
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri())
            .historical_rates("CHF", "USD", 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RateError>(),
            Some(RateError::Transport { status: 404, .. })
        ));
    }

    #[test]
    fn test_premium_upgrades_scheme() {
        let free = FixerProvider::new("http://data.fixer.io/api", None, false).unwrap();
        assert_eq!(free.base_url, "http://data.fixer.io/api");

        let premium = FixerProvider::new("http://data.fixer.io/api", None, true).unwrap();
        assert_eq!(premium.base_url, "https://data.fixer.io/api");
    }
}
