//! HTTP client for the geocoding and forecast services.

use crate::error::{Error, Result};
use crate::types::{DailyWeatherRecord, ForecastResponse, GeocodeResponse, GeocodeResult};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Display language for geocoding results.
const LANGUAGE: &str = "tr";
/// All daily windows are requested in this timezone.
const TIMEZONE: &str = "Europe/Istanbul";
/// The four daily metrics a record is built from.
const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code";

/// Client for the two Open-Meteo endpoints.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteo {
    /// Client against the public Open-Meteo hosts.
    pub fn new() -> Self {
        Self::with_base_urls(GEOCODING_URL, FORECAST_URL)
    }

    /// Client against explicit endpoint URLs (used by tests to point at a
    /// local stub).
    pub fn with_base_urls(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    /// Look a city up, returning the service's single best match.
    ///
    /// `country` narrows the search when given; the service's own
    /// relevance ranking decides the returned candidate.
    pub async fn geocode(&self, city: &str, country: Option<&str>) -> Result<GeocodeResult> {
        tracing::debug!(city, country, "geocoding lookup");

        let mut request = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1"), ("language", LANGUAGE)]);
        if let Some(country) = country {
            request = request.query(&[("country", country)]);
        }

        let response = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Unavailable(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|err| Error::SchemaMismatch(err.to_string()))?;

        let first = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(city.to_string()))?;

        tracing::info!(
            name = %first.name,
            latitude = first.latitude,
            longitude = first.longitude,
            "geocoding match"
        );
        Ok(first)
    }

    /// Fetch the daily record for a single date at the given coordinates.
    ///
    /// The window is `start_date == end_date == date`; the date string is
    /// passed through as-is, so an impossible calendar date surfaces as
    /// whatever the provider answers for it.
    pub async fn daily_weather(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<DailyWeatherRecord> {
        tracing::debug!(latitude, longitude, date, "daily forecast lookup");

        let response = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                ("daily", DAILY_METRICS),
                ("timezone", TIMEZONE),
                ("start_date", date),
                ("end_date", date),
            ])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Unavailable(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|err| Error::SchemaMismatch(err.to_string()))?;

        let record = DailyWeatherRecord::from_series(date, &parsed.daily)?;
        tracing::info!(
            date = %record.date,
            max = record.temperature_max_c,
            min = record.temperature_min_c,
            "daily record fetched"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> OpenMeteo {
        OpenMeteo::with_base_urls(
            format!("{}/v1/search", server.url()),
            format!("{}/v1/forecast", server.url()),
        )
    }

    #[tokio::test]
    async fn geocode_returns_the_first_match() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "İstanbul".into()),
                Matcher::UrlEncoded("count".into(), "1".into()),
                Matcher::UrlEncoded("language".into(), "tr".into()),
                Matcher::UrlEncoded("country".into(), "TR".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"results":[{"latitude":41.01,"longitude":28.98,"name":"İstanbul","country":"Türkiye","timezone":"Europe/Istanbul"}]}"#,
            )
            .create_async()
            .await;

        let result = client_for(&server)
            .geocode("İstanbul", Some("TR"))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(result.name, "İstanbul");
        assert_eq!(result.latitude, 41.01);
        assert_eq!(result.country.as_deref(), Some("Türkiye"));
    }

    #[tokio::test]
    async fn geocode_with_no_results_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server).geocode("Yokşehir", None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(city) if city == "Yokşehir"));
    }

    #[tokio::test]
    async fn geocode_with_absent_results_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"generationtime_ms":0.3}"#)
            .create_async()
            .await;

        let err = client_for(&server).geocode("Yokşehir", None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn geocode_maps_http_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).geocode("İstanbul", None).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn geocode_maps_malformed_bodies() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results":[{"latitude":"not a number"}]}"#)
            .create_async()
            .await;

        let err = client_for(&server).geocode("İstanbul", None).await.unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn daily_weather_requests_a_single_day_window() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start_date".into(), "2025-08-29".into()),
                Matcher::UrlEncoded("end_date".into(), "2025-08-29".into()),
                Matcher::UrlEncoded("timezone".into(), "Europe/Istanbul".into()),
                Matcher::UrlEncoded(
                    "daily".into(),
                    "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code".into(),
                ),
            ]))
            .with_status(200)
            .with_body(
                r#"{"daily":{"time":["2025-08-29"],"temperature_2m_max":[28],"temperature_2m_min":[19],"precipitation_sum":[0],"weather_code":[1]}}"#,
            )
            .create_async()
            .await;

        let record = client_for(&server)
            .daily_weather(41.01, 28.98, "2025-08-29")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(record.date, "2025-08-29");
        assert_eq!(record.temperature_max_c, 28.0);
        assert_eq!(record.temperature_min_c, 19.0);
        assert_eq!(record.precipitation_mm, 0.0);
        assert_eq!(record.weather_code, 1);
    }

    #[tokio::test]
    async fn daily_weather_rejects_mismatched_arrays() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"daily":{"time":["2025-08-29"],"temperature_2m_max":[28,29],"temperature_2m_min":[19],"precipitation_sum":[0],"weather_code":[1]}}"#,
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .daily_weather(41.01, 28.98, "2025-08-29")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn daily_weather_rejects_empty_arrays() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"daily":{"time":[],"temperature_2m_max":[],"temperature_2m_min":[],"precipitation_sum":[],"weather_code":[]}}"#,
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .daily_weather(41.01, 28.98, "2025-08-29")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }
}
