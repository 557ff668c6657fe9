//! What the user sees for one lookup, independent of the terminal.

use weather_finder_core::{WeatherError, WeatherProvider, WeatherRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// A status line plus the text shown underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub tone: Tone,
    pub status: String,
    pub body: String,
}

impl Screen {
    pub fn from_outcome(outcome: &Result<WeatherRecord, WeatherError>) -> Self {
        match outcome {
            Ok(record) => Self {
                tone: Tone::Success,
                status: "Weather data retrieved successfully!".to_string(),
                body: record.format_display(),
            },
            Err(err) => Self {
                tone: Tone::Error,
                status: err.kind.status_message().to_string(),
                body: err.message.clone(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.tone == Tone::Success
    }
}

/// Handle one line of user input. Blank input is answered locally.
pub async fn lookup(provider: &dyn WeatherProvider, input: &str) -> Screen {
    let city = input.trim();
    if city.is_empty() {
        return Screen {
            tone: Tone::Error,
            status: "Please enter a city name".to_string(),
            body: String::new(),
        };
    }

    println!("Fetching weather for {city}...");
    Screen::from_outcome(&provider.get_weather(city).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use weather_finder_core::{FailureKind, Location};

    #[derive(Debug, Default)]
    struct CannedProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for CannedProvider {
        async fn get_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if city == "Oslo" {
                Ok(oslo())
            } else {
                Err(WeatherError::city_not_found(city))
            }
        }
    }

    fn oslo() -> WeatherRecord {
        WeatherRecord {
            location: Location::new("Oslo", "Norway"),
            temperature_c: -4,
            temperature_f: 25,
            feels_like_c: -9,
            feels_like_f: 16,
            condition: "Light snow".to_string(),
            humidity: 86,
            wind_speed_kmph: 11,
            wind_direction: "SSW".to_string(),
            pressure: 1002,
            visibility: 6,
            uv_index: 1,
            cloud_cover: 100,
        }
    }

    #[test]
    fn success_screen_shows_record() {
        let screen = Screen::from_outcome(&Ok(oslo()));
        assert!(screen.is_success());
        assert_eq!(screen.status, "Weather data retrieved successfully!");
        assert!(screen.body.starts_with("Location: Oslo, Norway\n"));
    }

    #[test]
    fn error_screen_maps_every_kind() {
        for kind in FailureKind::all() {
            let screen = Screen::from_outcome(&Err(WeatherError::new(*kind, "detail")));
            assert_eq!(screen.tone, Tone::Error);
            assert_eq!(screen.status, kind.status_message());
            assert_eq!(screen.body, "detail");
        }
    }

    #[tokio::test]
    async fn blank_input_skips_the_provider() {
        let provider = CannedProvider::default();
        let screen = lookup(&provider, "   ").await;

        assert_eq!(screen.status, "Please enter a city name");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_renders_provider_outcome() {
        let provider = CannedProvider::default();

        let screen = lookup(&provider, " Oslo ").await;
        assert!(screen.is_success());

        let screen = lookup(&provider, "Nowhere").await;
        assert_eq!(screen.status, "City not found");
        assert!(screen.body.contains("Nowhere"));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
