use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::{
    ForecastQuery,
    error::{ForecastError, diagnose},
};

use super::WeatherSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Visual Crossing timeline endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct TimelineClient {
    base_url: Url,
    http: Client,
}

impl TimelineClient {
    pub fn new(base_url: &str) -> Result<Self, ForecastError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ForecastError::InvalidConfig(format!("invalid base_url '{base_url}': {e}"))
        })?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ForecastError::InvalidConfig(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { base_url, http })
    }

    /// Full request URL for `query`, without the credential.
    pub fn request_url(&self, query: &ForecastQuery) -> Result<Url, ForecastError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ForecastError::InvalidConfig(format!("base_url cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().push(query.location.trim());
            if let Some(window) = query.window_segment() {
                segments.push(&window);
            }
        }

        url.query_pairs_mut()
            .append_pair("unitGroup", query.units.as_query_value())
            .append_pair("contentType", "json")
            .append_pair("include", &query.include.as_query_value());

        Ok(url)
    }
}

#[async_trait]
impl WeatherSource for TimelineClient {
    async fn fetch_timeline(
        &self,
        api_key: &str,
        query: &ForecastQuery,
    ) -> Result<String, ForecastError> {
        let url = self.request_url(query)?;
        tracing::info!(%url, "requesting timeline");

        let res = self.http.get(url).query(&[("key", api_key)]).send().await?;

        let status = res.status();
        let body = res.text().await?;

        let parseable = serde_json::from_str::<serde_json::Value>(&body).is_ok();
        match diagnose(status.as_u16(), parseable) {
            None => Ok(body),
            Some(diagnostic) => {
                tracing::warn!(
                    status = status.as_u16(),
                    body = %truncate_body(&body),
                    "timeline request failed"
                );
                Err(ForecastError::Status(diagnostic))
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
