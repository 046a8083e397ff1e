//! Prompt loop: ask for a location, show the forecast or the error, repeat.

use forecast_core::{ForecastError, ForecastQuery, ForecastService, Include, Units, WeatherSource};
use inquire::{Confirm, InquireError, Text};

use crate::render;

/// Trimmed location from the text prompt, rejected before any other prompt when blank.
fn prompted_location(input: &str) -> Result<&str, ForecastError> {
    let location = input.trim();
    if location.is_empty() {
        return Err(ForecastError::EmptyLocation);
    }
    Ok(location)
}

pub async fn run<S: WeatherSource>(
    mut service: ForecastService<S>,
    mut units: Units,
    window: u32,
) -> anyhow::Result<()> {
    if !service.has_credential() {
        return Err(anyhow::anyhow!(ForecastError::MissingCredential.user_message()));
    }

    let mut last_location = String::new();

    loop {
        let location = match Text::new("City (e.g. Rio de Janeiro,BR):")
            .with_initial_value(&last_location)
            .prompt()
        {
            Ok(location) => location,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let location = match prompted_location(&location) {
            Ok(location) => location.to_string(),
            Err(err) => {
                eprintln!("{}\n", err.user_message());
                continue;
            }
        };

        let use_fahrenheit = match Confirm::new("Use °F?").with_default(units == Units::Us).prompt()
        {
            Ok(answer) => answer,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        units = if use_fahrenheit { Units::Us } else { Units::Metric };

        let query = ForecastQuery::new(location.as_str(), units)
            .with_window(window)
            .with_include(Include::all());

        match service.lookup(&query).await {
            Ok(forecast) => {
                last_location = location;
                println!("{}\n", render::report(&forecast, true));
            }
            Err(err) => {
                tracing::debug!(error = %err, "lookup failed");
                eprintln!("{}\n", err.user_message());
            }
        }
    }

    Ok(())
}
