use async_trait::async_trait;
use std::fmt::Debug;

use crate::{ForecastQuery, config::Config, error::ForecastError};

pub mod timeline;

pub use timeline::TimelineClient;

/// Something that can answer a timeline query with a raw JSON body.
///
/// Implementations report non-2xx statuses and connection failures as
/// [`ForecastError`]; interpreting the body is left to the caller.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_timeline(
        &self,
        api_key: &str,
        query: &ForecastQuery,
    ) -> Result<String, ForecastError>;
}

/// Construct the HTTP source from config.
pub fn source_from_config(config: &Config) -> Result<TimelineClient, ForecastError> {
    TimelineClient::new(config.base_url())
}
