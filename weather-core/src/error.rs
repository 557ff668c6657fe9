use std::fmt;
use thiserror::Error;

/// Closed set of ways a weather lookup can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NetworkError,
    CityNotFound,
    InvalidResponse,
    Timeout,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NetworkError => "NETWORK_ERROR",
            FailureKind::CityNotFound => "CITY_NOT_FOUND",
            FailureKind::InvalidResponse => "INVALID_RESPONSE",
            FailureKind::Timeout => "TIMEOUT",
            FailureKind::Unknown => "UNKNOWN",
        }
    }

    /// Short status line a front-end shows above the detailed message.
    pub fn status_message(&self) -> &'static str {
        match self {
            FailureKind::NetworkError => "Error fetching weather data",
            FailureKind::CityNotFound => "City not found",
            FailureKind::InvalidResponse => "Invalid response from weather service",
            FailureKind::Timeout => "Request timed out",
            FailureKind::Unknown => "An error occurred",
        }
    }

    pub const fn all() -> &'static [FailureKind] {
        &[
            FailureKind::NetworkError,
            FailureKind::CityNotFound,
            FailureKind::InvalidResponse,
            FailureKind::Timeout,
            FailureKind::Unknown,
        ]
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure returned by a [`crate::WeatherProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct WeatherError {
    pub kind: FailureKind,
    pub message: String,
}

impl WeatherError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn empty_city() -> Self {
        Self::new(FailureKind::InvalidResponse, "City name cannot be empty")
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::new(FailureKind::Timeout, format!("Request timed out after {timeout_secs} seconds"))
    }

    pub fn connection_failed() -> Self {
        Self::new(FailureKind::NetworkError, "Failed to connect to weather service")
    }

    pub fn city_not_found(city: &str) -> Self {
        Self::new(FailureKind::CityNotFound, format!("City '{city}' not found"))
    }

    pub fn http_status(status: u16) -> Self {
        Self::new(FailureKind::NetworkError, format!("HTTP error: {status}"))
    }

    pub fn network(detail: impl fmt::Display) -> Self {
        Self::new(FailureKind::NetworkError, format!("Network error: {detail}"))
    }

    pub fn invalid_response(detail: impl fmt::Display) -> Self {
        Self::new(FailureKind::InvalidResponse, format!("Invalid response format: {detail}"))
    }

    pub fn unexpected(detail: impl fmt::Display) -> Self {
        Self::new(FailureKind::Unknown, format!("Unexpected error: {detail}"))
    }
}
