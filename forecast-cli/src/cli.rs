use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ForecastQuery, ForecastService, Include, TimelineClient, Units,
    source::source_from_config,
};

use crate::{interactive, render};

/// Forecast window used when neither the flag nor the config sets one.
const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast lookup (Visual Crossing)")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for a location.
    Show {
        /// City or location, e.g. "Rio de Janeiro,BR".
        location: String,

        /// Unit group: metric or us.
        #[arg(long)]
        units: Option<Units>,

        /// Number of days to forecast (at least 1).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Include the hourly breakdown for the next two days.
        #[arg(long)]
        hourly: bool,

        /// Include current conditions.
        #[arg(long)]
        current: bool,

        /// Print the normalized forecast as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for locations until cancelled.
    Interactive {
        /// Initial unit group: metric or us.
        #[arg(long)]
        units: Option<Units>,
    },

    /// Store the API key and default units.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { location, units, days, hourly, current, json } => {
                let config = Config::load()?;
                let mut service = build_service(&config)?;

                let query = ForecastQuery::new(location, units.unwrap_or(config.units()))
                    .with_window(days.or(config.days).unwrap_or(DEFAULT_WINDOW_DAYS))
                    .with_include(Include { days: true, hours: hourly, current });

                let forecast = service
                    .lookup(&query)
                    .await
                    .map_err(|err| anyhow!(err.user_message()))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&forecast)?);
                } else {
                    println!("{}", render::report(&forecast, hourly));
                }
            }
            Command::Interactive { units } => {
                let config = Config::load()?;
                let service = build_service(&config)?;
                let window = config.days.unwrap_or(DEFAULT_WINDOW_DAYS);
                interactive::run(service, units.unwrap_or(config.units()), window).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn build_service(config: &Config) -> anyhow::Result<ForecastService<TimelineClient>> {
    let source = source_from_config(config).context("Failed to set up the weather client")?;
    Ok(ForecastService::new(source, config.api_key(), config))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .with_help_message("Leave empty to rely on the VISUALCROSSING_API_KEY variable")
        .prompt()?;
    config.set_api_key(api_key);

    let current = config.units();
    let options = vec![current, current.toggled()];
    let units = inquire::Select::new("Default units:", options).prompt()?;
    config.units = Some(units);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
