use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved place as reported by the weather service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub area_name: String,
    pub country: String,
}

impl Location {
    pub fn new(area_name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { area_name: area_name.into(), country: country.into() }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.area_name, self.country)
    }
}

/// Point-in-time snapshot of current conditions, flattened from the
/// provider payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: Location,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub feels_like_c: i32,
    pub feels_like_f: i32,
    pub condition: String,
    /// Percent. Not range-checked.
    pub humidity: i32,
    pub wind_speed_kmph: u32,
    /// 16-point compass direction, e.g. "NW".
    pub wind_direction: String,
    /// Millibars.
    pub pressure: i32,
    /// Kilometers.
    pub visibility: i32,
    pub uv_index: i32,
    pub cloud_cover: i32,
}

impl WeatherRecord {
    /// Multi-line, human-readable block, one field per line.
    pub fn format_display(&self) -> String {
        format!(
            "Location: {}\n\
             Temperature: {}°C ({}°F)\n\
             Feels Like: {}°C ({}°F)\n\
             Condition: {}\n\
             Humidity: {}%\n\
             Wind Speed: {} km/h\n\
             Wind Direction: {}\n\
             Pressure: {} mb\n\
             Visibility: {} km\n\
             UV Index: {}\n\
             Cloud Cover: {}%\n",
            self.location,
            self.temperature_c,
            self.temperature_f,
            self.feels_like_c,
            self.feels_like_f,
            self.condition,
            self.humidity,
            self.wind_speed_kmph,
            self.wind_direction,
            self.pressure,
            self.visibility,
            self.uv_index,
            self.cloud_cover,
        )
    }
}
