use async_trait::async_trait;
use serde::Deserialize;
use serde_json::error::Category;
use std::{fmt::Display, str::FromStr, time::Duration};
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::WeatherError,
    model::{Location, WeatherRecord},
    transport::{HttpTransport, ReqwestTransport, TransportError},
};

use super::WeatherProvider;

/// Current-conditions lookup against a wttr.in-compatible endpoint
/// (`GET {base_url}/{city}?format=j1`).
#[derive(Debug, Clone)]
pub struct WttrProvider<T = ReqwestTransport> {
    base_url: String,
    timeout: Duration,
    transport: T,
}

impl WttrProvider<ReqwestTransport> {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> WttrProvider<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The city becomes a single percent-encoded path segment.
    pub fn request_url(&self, city: &str) -> String {
        format!("{}/{}?format=j1", self.base_url, urlencoding::encode(city))
    }

    async fn fetch(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::empty_city());
        }

        let url = self.request_url(city);
        debug!(url = %url, "Fetching current weather");

        let res = self.transport.get(&url, self.timeout).await.map_err(|e| match e {
            TransportError::Timeout => WeatherError::timeout(self.timeout.as_secs()),
            TransportError::Connect(detail) => {
                debug!(%detail, "connection failed");
                WeatherError::connection_failed()
            }
            TransportError::Other(detail) => WeatherError::network(detail),
        })?;

        if res.is_error() {
            debug!(status = res.status, body = %truncate_body(&res.body), "error status");
            return Err(if res.status == 404 {
                WeatherError::city_not_found(city)
            } else {
                WeatherError::http_status(res.status)
            });
        }

        parse_weather(&res.body)
    }
}

#[async_trait]
impl<T: HttpTransport> WeatherProvider for WttrProvider<T> {
    #[instrument(skip(self), fields(provider = "wttr"))]
    async fn get_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let result = self.fetch(city).await;
        if let Err(err) = &result {
            warn!(kind = %err.kind, message = %err.message, "weather lookup failed");
        }
        result
    }
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    #[serde(rename = "FeelsLikeF")]
    feels_like_f: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "winddir16Point")]
    winddir_16_point: String,
    pressure: String,
    visibility: String,
    #[serde(rename = "uvIndex")]
    uv_index: String,
    cloudcover: String,
}

#[derive(Debug, Deserialize)]
struct WttrArea {
    #[serde(rename = "areaName")]
    area_name: Vec<WttrValue>,
    country: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCurrent>,
    nearest_area: Vec<WttrArea>,
}

/// Parse a `format=j1` body into a [`WeatherRecord`].
///
/// Nothing is built until every field has been extracted, so callers either
/// get a complete record or an error.
pub fn parse_weather(body: &[u8]) -> Result<WeatherRecord, WeatherError> {
    let parsed: WttrResponse = serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Io => WeatherError::unexpected(e),
        Category::Syntax | Category::Data | Category::Eof => WeatherError::invalid_response(e),
    })?;

    let current = first(&parsed.current_condition, "current_condition")?;
    let area = first(&parsed.nearest_area, "nearest_area")?;

    let location = Location::new(
        first(&area.area_name, "areaName")?.value.clone(),
        first(&area.country, "country")?.value.clone(),
    );

    Ok(WeatherRecord {
        location,
        temperature_c: int_field("temp_C", &current.temp_c)?,
        temperature_f: int_field("temp_F", &current.temp_f)?,
        feels_like_c: int_field("FeelsLikeC", &current.feels_like_c)?,
        feels_like_f: int_field("FeelsLikeF", &current.feels_like_f)?,
        condition: first(&current.weather_desc, "weatherDesc")?.value.clone(),
        humidity: int_field("humidity", &current.humidity)?,
        wind_speed_kmph: int_field("windspeedKmph", &current.windspeed_kmph)?,
        wind_direction: current.winddir_16_point.clone(),
        pressure: int_field("pressure", &current.pressure)?,
        visibility: int_field("visibility", &current.visibility)?,
        uv_index: int_field("uvIndex", &current.uv_index)?,
        cloud_cover: int_field("cloudcover", &current.cloudcover)?,
    })
}

fn first<'a, V>(items: &'a [V], key: &str) -> Result<&'a V, WeatherError> {
    items
        .first()
        .ok_or_else(|| WeatherError::invalid_response(format!("`{key}` list is empty")))
}

fn int_field<N>(key: &str, raw: &str) -> Result<N, WeatherError>
where
    N: FromStr,
    N::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        WeatherError::invalid_response(format!("field `{key}` is not an integer ({raw:?}): {e}"))
    })
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 200;
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > MAX {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::{Value, json};

    fn london() -> Value {
        json!({
            "current_condition": [{
                "temp_C": "20",
                "temp_F": "68",
                "FeelsLikeC": "18",
                "FeelsLikeF": "64",
                "weatherDesc": [{"value": "Partly cloudy"}],
                "humidity": "65",
                "windspeedKmph": "15",
                "winddir16Point": "NW",
                "pressure": "1013",
                "visibility": "10",
                "uvIndex": "5",
                "cloudcover": "50"
            }],
            "nearest_area": [{
                "areaName": [{"value": "London"}],
                "country": [{"value": "United Kingdom"}]
            }]
        })
    }

    fn parse_value(v: &Value) -> Result<WeatherRecord, WeatherError> {
        parse_weather(&serde_json::to_vec(v).expect("serialize fixture"))
    }

    #[test]
    fn parses_every_field() {
        let rec = parse_value(&london()).expect("valid payload");

        assert_eq!(rec.location, Location::new("London", "United Kingdom"));
        assert_eq!(rec.temperature_c, 20);
        assert_eq!(rec.temperature_f, 68);
        assert_eq!(rec.feels_like_c, 18);
        assert_eq!(rec.feels_like_f, 64);
        assert_eq!(rec.condition, "Partly cloudy");
        assert_eq!(rec.humidity, 65);
        assert_eq!(rec.wind_speed_kmph, 15);
        assert_eq!(rec.wind_direction, "NW");
        assert_eq!(rec.pressure, 1013);
        assert_eq!(rec.visibility, 10);
        assert_eq!(rec.uv_index, 5);
        assert_eq!(rec.cloud_cover, 50);
    }

    #[test]
    fn ignores_unrelated_keys() {
        let mut payload = london();
        payload["weather"] = json!([{"maxtempC": "22"}]);
        payload["current_condition"][0]["precipMM"] = json!("0.0");

        assert!(parse_value(&payload).is_ok());
    }

    #[test]
    fn negative_temperatures_are_fine() {
        let mut payload = london();
        payload["current_condition"][0]["temp_C"] = json!("-12");
        payload["current_condition"][0]["humidity"] = json!("140");

        let rec = parse_value(&payload).expect("valid payload");
        assert_eq!(rec.temperature_c, -12);
        assert_eq!(rec.humidity, 140);
    }

    #[test]
    fn missing_top_level_key_is_invalid_response() {
        for key in ["current_condition", "nearest_area"] {
            let mut payload = london();
            payload.as_object_mut().expect("object").remove(key);

            let err = parse_value(&payload).unwrap_err();
            assert_eq!(err.kind, FailureKind::InvalidResponse);
            assert!(err.message.contains(key), "{}", err.message);
        }
    }

    #[test]
    fn missing_nested_key_is_invalid_response() {
        let mut payload = london();
        payload["current_condition"][0].as_object_mut().expect("object").remove("uvIndex");

        let err = parse_value(&payload).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
        assert!(err.message.contains("uvIndex"));
    }

    #[test]
    fn empty_lists_are_invalid_response() {
        let mut payload = london();
        payload["current_condition"] = json!([]);
        let err = parse_value(&payload).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
        assert!(err.message.contains("current_condition"));

        let mut payload = london();
        payload["nearest_area"][0]["country"] = json!([]);
        let err = parse_value(&payload).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
        assert!(err.message.contains("country"));
    }

    #[test]
    fn non_numeric_text_is_invalid_response() {
        let mut payload = london();
        payload["current_condition"][0]["pressure"] = json!("high");

        let err = parse_value(&payload).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
        assert!(err.message.contains("pressure"));
    }

    #[test]
    fn negative_wind_speed_is_rejected() {
        let mut payload = london();
        payload["current_condition"][0]["windspeedKmph"] = json!("-3");

        let err = parse_value(&payload).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
    }

    #[test]
    fn non_json_body_is_invalid_response() {
        let err = parse_weather(b"<html>Unknown location</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
        assert!(err.message.starts_with("Invalid response format"));
    }

    #[test]
    fn request_url_encodes_city_and_trims_base() {
        let cfg = Config { base_url: "https://wttr.in/".into(), ..Config::default() };
        let provider = WttrProvider::new(&cfg);

        assert_eq!(provider.request_url("London"), "https://wttr.in/London?format=j1");
        assert_eq!(provider.request_url("New York"), "https://wttr.in/New%20York?format=j1");
        assert_eq!(provider.request_url("São Paulo"), "https://wttr.in/S%C3%A3o%20Paulo?format=j1");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(body.as_bytes());
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
