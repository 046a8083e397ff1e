//! Error classes surfaced to the user and the status-code diagnostics table.

use thiserror::Error;

/// Name of the environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "VISUALCROSSING_API_KEY";

/// User-facing classification of a failed upstream exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    InvalidLocation,
    InvalidCredential,
    RateLimited,
    Upstream(u16),
    InvalidResponse,
    Unreachable,
}

impl Diagnostic {
    pub fn user_message(&self) -> String {
        match self {
            Diagnostic::InvalidLocation => {
                "Could not fetch the forecast: check the city/location name.".to_string()
            }
            Diagnostic::InvalidCredential => {
                "Authentication failed: the API key is invalid or expired.".to_string()
            }
            Diagnostic::RateLimited => {
                "Rate limit exceeded for the weather service. Try again later.".to_string()
            }
            Diagnostic::Upstream(status) => {
                format!("Weather service error ({status}). Try again later.")
            }
            Diagnostic::InvalidResponse => {
                "Invalid response from the weather service (no 'days').".to_string()
            }
            Diagnostic::Unreachable => {
                "Could not reach the weather service. Check your connection.".to_string()
            }
        }
    }
}

/// Classify an HTTP exchange.
///
/// Returns `None` only for a 2xx status with a parseable body. Transport
/// failures never reach this function; they map to [`Diagnostic::Unreachable`].
pub fn diagnose(status: u16, body_parseable: bool) -> Option<Diagnostic> {
    match status {
        200..=299 if body_parseable => None,
        200..=299 => Some(Diagnostic::InvalidResponse),
        400 => Some(Diagnostic::InvalidLocation),
        401 | 403 => Some(Diagnostic::InvalidCredential),
        429 => Some(Diagnostic::RateLimited),
        other => Some(Diagnostic::Upstream(other)),
    }
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("No API key configured (config file or VISUALCROSSING_API_KEY)")]
    MissingCredential,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Upstream request failed: {0:?}")]
    Status(Diagnostic),

    #[error("Invalid response from weather service: {0}")]
    InvalidResponse(String),

    #[error("Connection to weather service failed: {0}")]
    Transport(String),
}

impl ForecastError {
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            ForecastError::Status(d) => Some(*d),
            ForecastError::InvalidResponse(_) => Some(Diagnostic::InvalidResponse),
            ForecastError::Transport(_) => Some(Diagnostic::Unreachable),
            ForecastError::MissingCredential
            | ForecastError::InvalidConfig(_)
            | ForecastError::EmptyLocation => None,
        }
    }

    /// Text shown to the user in place of a forecast.
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::MissingCredential => format!(
                "No API key configured.\n\
                 Hint: run `forecast configure` or set {API_KEY_ENV}."
            ),
            ForecastError::InvalidConfig(reason) => format!(
                "Configuration error: {reason}\n\
                 Hint: check the config file (`forecast config-path`)."
            ),
            ForecastError::EmptyLocation => "Enter a city to get started.".to_string(),
            other => other
                .diagnostic()
                .map(|d| d.user_message())
                .unwrap_or_else(|| other.to_string()),
        }
    }

    /// Configuration problems stop a lookup before any request is made.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ForecastError::MissingCredential | ForecastError::InvalidConfig(_))
    }
}

impl From<reqwest::Error> for ForecastError {
    /// The request URL carries the API key, so it is dropped from the message.
    fn from(err: reqwest::Error) -> Self {
        ForecastError::Transport(err.without_url().to_string())
    }
}
