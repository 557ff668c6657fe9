use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tracing::info;
use weather_finder_core::{Config, WeatherProvider, provider_from_config};

use crate::shell::{self, Screen};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city name")]
pub struct Cli {
    /// Override the configured weather endpoint.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the configured request timeout, in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Print the record as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until cancelled (default).
    Interactive,

    /// Interactively set the endpoint and timeout.
    Configure,

    /// Print where the configuration file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show { ref city, json }) => {
                let provider = self.provider()?;
                show(provider.as_ref(), city, json).await
            }
            Some(Command::Interactive) | None => {
                let provider = self.provider()?;
                interactive(provider.as_ref()).await
            }
        }
    }

    fn provider(&self) -> anyhow::Result<Box<dyn WeatherProvider>> {
        let config = Config::load()?.with_overrides(self.base_url.clone(), self.timeout);
        info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "using configuration");
        provider_from_config(&config)
    }
}

/// Map `-v` occurrences to a tracing filter.
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

async fn show(provider: &dyn WeatherProvider, city: &str, json: bool) -> anyhow::Result<ExitCode> {
    match provider.get_weather(city).await {
        Ok(record) if json => {
            let out = serde_json::to_string_pretty(&record)
                .context("Failed to serialize weather record")?;
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        outcome => {
            let screen = Screen::from_outcome(&outcome);
            if screen.is_success() {
                print!("{}", screen.body);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", screen.status);
                eprintln!("{}", screen.body);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<ExitCode> {
    println!("Weather Finder (Esc to quit)");

    loop {
        let input = match Text::new("City:").with_placeholder("Enter city name...").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to read city name")),
        };

        let screen = shell::lookup(provider, &input).await;
        println!("{}", screen.status);
        if !screen.body.is_empty() {
            println!("{}", screen.body.trim_end());
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

fn configure() -> anyhow::Result<ExitCode> {
    let current = Config::load()?;

    let base_url = Text::new("Weather endpoint:")
        .with_default(&current.base_url)
        .prompt()
        .context("Failed to read endpoint")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    let config = Config { base_url: base_url.trim().to_string(), timeout_secs };
    config.validate()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
