//! Core library for the weather finder.
//!
//! This crate defines:
//! - The fetch-and-parse service for current conditions by city name
//! - The flat weather record and its display formatting
//! - The failure taxonomy every lookup resolves to
//! - An injectable HTTP transport and on-disk configuration
//!
//! It is used by `weather-finder-cli`, but any front-end can call
//! [`WeatherProvider::get_weather`] and render the outcome.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod transport;

pub use config::Config;
pub use error::{FailureKind, WeatherError};
pub use model::{Location, WeatherRecord};
pub use provider::{WeatherProvider, provider_from_config, wttr::WttrProvider};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
